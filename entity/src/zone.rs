use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::zone::Model)]
#[sea_orm(table_name = "zone")]
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
        super::branch_office_zone::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_zone::Relation::Zone.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
