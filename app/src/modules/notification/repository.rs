use crate::database::error::DbError;
use chrono::Utc;
use entity::enums::{NotificationKind, NotificationStatus, RecordState};
use entity::notification;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Inserts a notification unless an unread one with the same kind and
/// message already exists, repeated events on the same subject show up
/// only once until the first notification is read.
///
/// returns the existing unread notification instead of inserting when
/// the new one would repeat it.
pub async fn create_deduplicated<C: ConnectionTrait>(
    db: &C,
    kind: NotificationKind,
    title: &str,
    message: &str,
    subject_id: &str,
) -> Result<notification::Model, DbError> {
    let existing = notification::Entity::find()
        .filter(notification::Column::State.eq(RecordState::Activo))
        .filter(notification::Column::Status.eq(NotificationStatus::NoLeido))
        .filter(notification::Column::Kind.eq(kind))
        .filter(notification::Column::Message.eq(message))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        return Ok(existing);
    }

    let now = Utc::now();

    let notification = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        status: Set(NotificationStatus::NoLeido),
        title: Set(String::from(title)),
        message: Set(String::from(message)),
        kind: Set(kind),
        subject_id: Set(String::from(subject_id)),
    };

    Ok(notification.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn unread_notification(message: &str) -> notification::Model {
        let now = Utc::now();

        notification::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            status: NotificationStatus::NoLeido,
            title: String::from("Cargue realizado"),
            message: String::from(message),
            kind: NotificationKind::Cargue,
            subject_id: String::from("12345"),
        }
    }

    #[tokio::test]
    async fn repeated_unread_notifications_are_not_inserted() {
        let existing = unread_notification("cargue en la sucursal 12345");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let returned = create_deduplicated(
            &db,
            NotificationKind::Cargue,
            "Cargue realizado",
            "cargue en la sucursal 12345",
            "12345",
        )
        .await
        .unwrap();

        assert_eq!(returned.id, existing.id);

        // only the dedup lookup should have hit the database
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn unseen_notifications_are_inserted() {
        let inserted = unread_notification("cargue en la sucursal 54321");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![], vec![inserted.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let created = create_deduplicated(
            &db,
            NotificationKind::Cargue,
            "Cargue realizado",
            "cargue en la sucursal 54321",
            "54321",
        )
        .await
        .unwrap();

        assert_eq!(created.message, inserted.message);
    }
}
