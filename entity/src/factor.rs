use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Correction factor applied when converting charge readings, kept as a
/// catalog so branch offices can share them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::factor::Model)]
#[sea_orm(table_name = "factor")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,
    pub name: String,

    #[sea_orm(column_type = "Double")]
    pub value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_factor::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_factor::Relation::Factor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
