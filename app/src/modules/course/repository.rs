use crate::database::error::DbError;
use crate::modules::location::dto::LocationDto;
use crate::modules::notification::repository as notifications;
use chrono::Utc;
use entity::enums::{BranchOfficeStatus, NotificationKind, OperatorStatus, RecordState};
use entity::{branch_office, course, course_location, location, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, LoaderTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::dto::CourseDto;

/// A route is complete once every branch office of every stop has been
/// billed. Routes without any office are never considered complete.
pub fn is_complete(office_statuses: &[BranchOfficeStatus]) -> bool {
    !office_statuses.is_empty()
        && office_statuses
            .iter()
            .all(|status| *status == BranchOfficeStatus::Cargado)
}

/// Loads the operator and stops of a batch of courses
pub async fn with_relations<C: ConnectionTrait>(
    db: &C,
    courses: Vec<course::Model>,
) -> Result<Vec<CourseDto>, DbError> {
    let operators = courses.load_one(user::Entity, db).await?;

    let locations = courses
        .load_many_to_many(location::Entity, course_location::Entity, db)
        .await?;

    let mut dtos = vec![];

    for ((course, operator), locations) in courses.into_iter().zip(operators).zip(locations) {
        let branch_offices = locations
            .load_many_to_many(
                branch_office::Entity,
                entity::location_branch_office::Entity,
                db,
            )
            .await?;

        let locations = locations
            .into_iter()
            .zip(branch_offices)
            .map(|(location, branch_offices)| LocationDto {
                location,
                branch_offices,
            })
            .collect();

        dtos.push(CourseDto {
            course,
            operator,
            locations,
        });
    }

    Ok(dtos)
}

/// Hard deletes a course and its stop join rows, freeing its operator
pub async fn remove_course<C: ConnectionTrait>(db: &C, course: course::Model) -> Result<(), DbErr> {
    let operator = user::Entity::find_by_id(course.operator_id).one(db).await?;

    course_location::Entity::delete_many()
        .filter(course_location::Column::CourseId.eq(course.id))
        .exec(db)
        .await?;

    course::Entity::delete_by_id(course.id).exec(db).await?;

    if let Some(operator) = operator {
        let mut operator = operator.into_active_model();

        operator.status = Set(OperatorStatus::Disponible);
        operator.updated_at = Set(Utc::now());

        operator.update(db).await?;
    }

    Ok(())
}

/// Checks every active route for completion, settling the finished
/// ones.
///
/// Settling a route flips its branch offices from CARGADO back to
/// EFECTIVO, hard deletes the route, frees the operator and emits a
/// DERROTERO notification.
pub async fn settle_completed_courses(db: &DatabaseConnection) -> Result<Vec<Uuid>, DbError> {
    let courses = course::Entity::find()
        .filter(course::Column::State.eq(RecordState::Activo))
        .all(db)
        .await?;

    let mut settled = vec![];

    for course in courses {
        let locations = course.find_related(location::Entity).all(db).await?;

        let mut offices = vec![];

        for location in &locations {
            offices.extend(location.find_related(branch_office::Entity).all(db).await?);
        }

        let statuses: Vec<BranchOfficeStatus> =
            offices.iter().map(|office| office.status).collect();

        if !is_complete(&statuses) {
            continue;
        }

        let course_id = course.id;
        let operator_id = course.operator_id;

        db.transaction::<_, (), DbErr>(|tx| {
            Box::pin(async move {
                for office in offices {
                    let mut office = office.into_active_model();

                    office.status = Set(BranchOfficeStatus::Efectivo);
                    office.updated_at = Set(Utc::now());

                    office.update(tx).await?;
                }

                remove_course(tx, course).await
            })
        })
        .await
        .map_err(DbError::from)?;

        info!("settled completed course {}", course_id);

        let message = match user::Entity::find_by_id(operator_id).one(db).await? {
            Some(operator) => format!(
                "El operario {} {} ha finalizado su derrotero",
                operator.first_name, operator.last_name
            ),
            None => String::from("Un operario ha finalizado su derrotero"),
        };

        notifications::create_deduplicated(
            db,
            NotificationKind::Derrotero,
            "Derrotero finalizado",
            &message,
            &operator_id.to_string(),
        )
        .await?;

        settled.push(course_id);
    }

    Ok(settled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_without_offices_are_never_complete() {
        assert!(!is_complete(&[]));
    }

    #[test]
    fn routes_are_complete_only_when_every_office_is_billed() {
        use BranchOfficeStatus::*;

        assert!(is_complete(&[Cargado, Cargado]));
        assert!(!is_complete(&[Cargado, EnCurso]));
        assert!(!is_complete(&[Asignado]));
        assert!(!is_complete(&[Efectivo, Cargado]));
    }
}
