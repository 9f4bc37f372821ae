use crate::enums::{RecordState, TankStatus};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::stationary_tank::Model)]
#[sea_orm(table_name = "stationary_tank")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,

    /// ASIGNADO while allocated to a branch office, tanks cannot be
    /// deleted in that status
    pub status: TankStatus,

    #[sea_orm(unique)]
    pub serial: String,

    /// capacity in kilograms
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_stationary_tank::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::branch_office_stationary_tank::Relation::StationaryTank
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
