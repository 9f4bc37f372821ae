use crate::config::app_config;
use crate::modules::user::routes::OPERATOR_ROLE;
use anyhow::{Context, Result};
use chrono::Utc;
use entity::enums::{OperatorStatus, RecordState};
use entity::{permission, role, role_permission, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

/// Directories the api writes rendered documents and scratch files to
const REQUIRED_DIRS: [&str; 2] = ["temp", "pdf"];

/// Seed data the application expects on every startup, every step is
/// idempotent so restarting never duplicates rows.
pub async fn run(db: &DatabaseConnection) -> Result<()> {
    for dir in REQUIRED_DIRS {
        std::fs::create_dir_all(dir).with_context(|| format!("failed to create {} dir", dir))?;
    }

    let read = ensure_permission(db, "Lectura", "r", "consultar registros").await?;
    let write = ensure_permission(db, "Escritura", "w", "crear registros").await?;
    let edit = ensure_permission(db, "Edición", "e", "modificar y eliminar registros").await?;

    let admin_role = ensure_role(db, "Administrador General", &[read.id, write.id, edit.id]).await?;
    ensure_role(db, "Administrador Comercial", &[read.id, write.id]).await?;
    ensure_role(db, "Administrador de sistemas", &[read.id, write.id, edit.id]).await?;
    ensure_role(db, OPERATOR_ROLE, &[read.id, write.id]).await?;

    ensure_admin_user(db, admin_role.id).await?;

    Ok(())
}

async fn ensure_permission(
    db: &DatabaseConnection,
    name: &str,
    access_code: &str,
    description: &str,
) -> Result<permission::Model> {
    let existing = permission::Entity::find()
        .filter(permission::Column::Name.eq(name))
        .one(db)
        .await?;

    if let Some(permission) = existing {
        return Ok(permission);
    }

    let now = Utc::now();

    let created = permission::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(String::from(name)),
        access_code: Set(String::from(access_code)),
        description: Set(String::from(description)),
    }
    .insert(db)
    .await?;

    info!("created permission {}", name);

    Ok(created)
}

async fn ensure_role(
    db: &DatabaseConnection,
    name: &str,
    permission_ids: &[Uuid],
) -> Result<role::Model> {
    let existing = role::Entity::find()
        .filter(role::Column::Name.eq(name))
        .one(db)
        .await?;

    if let Some(role) = existing {
        return Ok(role);
    }

    let now = Utc::now();

    let role = role::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(String::from(name)),
    }
    .insert(db)
    .await?;

    for permission_id in permission_ids {
        role_permission::ActiveModel {
            role_id: Set(role.id),
            permission_id: Set(*permission_id),
        }
        .insert(db)
        .await?;
    }

    info!("created role {}", name);

    Ok(role)
}

async fn ensure_admin_user(db: &DatabaseConnection, role_id: Uuid) -> Result<()> {
    let cfg = app_config();

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(cfg.admin_email.clone()))
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = bcrypt::hash(&cfg.admin_password, bcrypt::DEFAULT_COST)
        .context("failed to hash the admin password")?;

    let now = Utc::now();

    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        status: Set(OperatorStatus::Disponible),
        first_name: Set(String::from("Administrador")),
        last_name: Set(String::from("General")),
        email: Set(cfg.admin_email.clone()),
        id_number: Set(String::from("0")),
        password: Set(password_hash),
        role_id: Set(role_id),
    }
    .insert(db)
    .await?;

    info!("created the admin user {}", cfg.admin_email);

    Ok(())
}
