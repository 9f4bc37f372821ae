use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// A delivery route ("derrotero") assigning one operator to a set of
/// locations. The only entity that is hard-deleted: settlement removes
/// the course once every branch office of every location is CARGADO.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::course::Model)]
#[sea_orm(table_name = "course")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,

    pub operator_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OperatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Operator,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_location::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_location::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
