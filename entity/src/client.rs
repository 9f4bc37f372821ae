use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::client::Model)]
#[sea_orm(table_name = "client")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,

    pub first_name: String,
    pub last_name: String,

    /// citizenship card number
    pub cc: String,

    pub phone: String,
    pub email: String,

    pub occupation_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::occupation::Entity",
        from = "Column::OccupationId",
        to = "super::occupation::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Occupation,
    #[sea_orm(has_many = "super::bill::Entity")]
    Bill,
}

impl Related<super::occupation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Occupation.def()
    }
}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_client::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_client::Relation::Client.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
