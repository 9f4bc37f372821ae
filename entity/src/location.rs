use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// A stop of a delivery route, grouping the branch offices visited there.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::location::Model)]
#[sea_orm(table_name = "location")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        super::location_branch_office::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::location_branch_office::Relation::Location.def().rev())
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_location::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_location::Relation::Location.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
