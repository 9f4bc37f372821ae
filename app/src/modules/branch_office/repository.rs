use crate::database::error::DbError;
use chrono::Utc;
use entity::enums::TankStatus;
use entity::{
    branch_office, branch_office_city, branch_office_client, branch_office_factor,
    branch_office_zone, city, client, factor, stationary_tank, zone,
};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    LoaderTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::dto::BranchOfficeDto;

/// Upper bound (inclusive) for public branch office codes
pub const MAX_BRANCH_OFFICE_CODE: u32 = 99_999;

fn draw_code(rng: &mut impl RngCore) -> i32 {
    (rng.next_u32() % MAX_BRANCH_OFFICE_CODE + 1) as i32
}

/// Draws random public codes until one not present in the table is
/// found. The code space is five digits so collisions are rare, the
/// attempt cap only guards against a nearly full table.
pub async fn generate_unique_code<C: ConnectionTrait>(db: &C) -> Result<i32, DbErr> {
    let mut rng = ChaCha8Rng::from_entropy();

    for _ in 0..100 {
        let code = draw_code(&mut rng);

        let in_use = branch_office::Entity::find()
            .filter(branch_office::Column::BranchOfficeCode.eq(code))
            .one(db)
            .await?
            .is_some();

        if !in_use {
            return Ok(code);
        }
    }

    Err(DbErr::Custom(String::from(
        "failed to draw a free branch office code",
    )))
}

/// Replaces every catalog join row of a branch office
pub async fn replace_catalog_relations<C: ConnectionTrait>(
    db: &C,
    branch_office_id: Uuid,
    city_ids: &[Uuid],
    zone_ids: &[Uuid],
    factor_ids: &[Uuid],
    client_ids: &[Uuid],
) -> Result<(), DbErr> {
    branch_office_city::Entity::delete_many()
        .filter(branch_office_city::Column::BranchOfficeId.eq(branch_office_id))
        .exec(db)
        .await?;

    for city_id in city_ids {
        branch_office_city::ActiveModel {
            branch_office_id: Set(branch_office_id),
            city_id: Set(*city_id),
        }
        .insert(db)
        .await?;
    }

    branch_office_zone::Entity::delete_many()
        .filter(branch_office_zone::Column::BranchOfficeId.eq(branch_office_id))
        .exec(db)
        .await?;

    for zone_id in zone_ids {
        branch_office_zone::ActiveModel {
            branch_office_id: Set(branch_office_id),
            zone_id: Set(*zone_id),
        }
        .insert(db)
        .await?;
    }

    branch_office_factor::Entity::delete_many()
        .filter(branch_office_factor::Column::BranchOfficeId.eq(branch_office_id))
        .exec(db)
        .await?;

    for factor_id in factor_ids {
        branch_office_factor::ActiveModel {
            branch_office_id: Set(branch_office_id),
            factor_id: Set(*factor_id),
        }
        .insert(db)
        .await?;
    }

    branch_office_client::Entity::delete_many()
        .filter(branch_office_client::Column::BranchOfficeId.eq(branch_office_id))
        .exec(db)
        .await?;

    for client_id in client_ids {
        branch_office_client::ActiveModel {
            branch_office_id: Set(branch_office_id),
            client_id: Set(*client_id),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Replaces the tank join rows of a branch office, marking removed
/// tanks NO ASIGNADO and kept or added ones ASIGNADO
pub async fn replace_tank_relations<C: ConnectionTrait>(
    db: &C,
    branch_office_id: Uuid,
    tank_ids: &[Uuid],
) -> Result<(), DbErr> {
    let previous: Vec<Uuid> = entity::branch_office_stationary_tank::Entity::find()
        .filter(
            entity::branch_office_stationary_tank::Column::BranchOfficeId.eq(branch_office_id),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.stationary_tank_id)
        .collect();

    let removed: Vec<Uuid> = previous
        .iter()
        .filter(|id| !tank_ids.contains(id))
        .copied()
        .collect();

    entity::branch_office_stationary_tank::Entity::delete_many()
        .filter(
            entity::branch_office_stationary_tank::Column::BranchOfficeId.eq(branch_office_id),
        )
        .exec(db)
        .await?;

    for tank_id in tank_ids {
        entity::branch_office_stationary_tank::ActiveModel {
            branch_office_id: Set(branch_office_id),
            stationary_tank_id: Set(*tank_id),
        }
        .insert(db)
        .await?;
    }

    set_tanks_status(db, &removed, TankStatus::NoAsignado).await?;
    set_tanks_status(db, tank_ids, TankStatus::Asignado).await?;

    Ok(())
}

/// Sets the status of a batch of tanks
pub async fn set_tanks_status<C: ConnectionTrait>(
    db: &C,
    tank_ids: &[Uuid],
    status: TankStatus,
) -> Result<(), DbErr> {
    for tank_id in tank_ids {
        let Some(tank) = stationary_tank::Entity::find_by_id(*tank_id).one(db).await? else {
            continue;
        };

        let mut tank = tank.into_active_model();

        tank.status = Set(status);
        tank.updated_at = Set(Utc::now());

        tank.update(db).await?;
    }

    Ok(())
}

/// Loads the catalog relations of a batch of offices in bulk
pub async fn with_relations<C: ConnectionTrait>(
    db: &C,
    offices: Vec<branch_office::Model>,
) -> Result<Vec<BranchOfficeDto>, DbError> {
    let cities = offices
        .load_many_to_many(city::Entity, branch_office_city::Entity, db)
        .await?;

    let zones = offices
        .load_many_to_many(zone::Entity, branch_office_zone::Entity, db)
        .await?;

    let factors = offices
        .load_many_to_many(factor::Entity, branch_office_factor::Entity, db)
        .await?;

    let clients = offices
        .load_many_to_many(client::Entity, branch_office_client::Entity, db)
        .await?;

    let tanks = offices
        .load_many_to_many(
            stationary_tank::Entity,
            entity::branch_office_stationary_tank::Entity,
            db,
        )
        .await?;

    let dtos = offices
        .into_iter()
        .zip(cities)
        .zip(zones)
        .zip(factors)
        .zip(clients)
        .zip(tanks)
        .map(
            |(((((branch_office, cities), zones), factors), clients), stationary_tanks)| {
                BranchOfficeDto {
                    branch_office,
                    cities,
                    zones,
                    factors,
                    clients,
                    stationary_tanks,
                }
            },
        )
        .collect();

    Ok(dtos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_codes_stay_in_the_public_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10_000 {
            let code = draw_code(&mut rng);
            assert!((1..=MAX_BRANCH_OFFICE_CODE as i32).contains(&code));
        }
    }
}
