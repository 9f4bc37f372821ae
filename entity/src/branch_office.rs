use crate::enums::{BranchOfficeStatus, RecordState};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::branch_office::Model)]
#[sea_orm(table_name = "branch_office")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,
    pub status: BranchOfficeStatus,

    pub name: String,

    #[sea_orm(unique)]
    pub nit: String,

    /// public numeric code used by tablets and billing, drawn at random
    /// on creation and guaranteed unique by rejection sampling
    #[sea_orm(unique)]
    pub branch_office_code: i32,

    pub address: String,
    pub latitude: String,
    pub longitude: String,

    pub phone: String,
    pub email: String,

    /// price per kilogram charged at this office, snapshotted into bills
    #[sea_orm(column_type = "Double")]
    pub kilogram_value: f64,

    pub tank_stock: i32,
    pub general_ticket: bool,

    #[sea_orm(column_type = "Text")]
    pub geofence: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bill::Entity")]
    Bill,
}

impl Related<super::bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bill.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_city::Relation::City.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_city::Relation::BranchOffice.def().rev())
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_zone::Relation::Zone.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_zone::Relation::BranchOffice.def().rev())
    }
}

impl Related<super::factor::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_factor::Relation::Factor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::branch_office_factor::Relation::BranchOffice
                .def()
                .rev(),
        )
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_client::Relation::Client.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::branch_office_client::Relation::BranchOffice
                .def()
                .rev(),
        )
    }
}

impl Related<super::stationary_tank::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_stationary_tank::Relation::StationaryTank.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::branch_office_stationary_tank::Relation::BranchOffice
                .def()
                .rev(),
        )
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::location_branch_office::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::location_branch_office::Relation::BranchOffice
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
