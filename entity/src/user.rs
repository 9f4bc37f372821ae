use crate::enums::{OperatorStatus, RecordState};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::user::Model)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,

    /// whether the operator is free or currently driving a route
    pub status: OperatorStatus,

    pub first_name: String,
    pub last_name: String,

    #[sea_orm(unique)]
    pub email: String,

    /// national identification number, also accepted as a login credential
    #[sea_orm(unique)]
    pub id_number: String,

    /// bcrypt hash
    #[serde(skip_serializing)]
    pub password: String,

    pub role_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Role,
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
    #[sea_orm(has_many = "super::propane_truck::Entity")]
    PropaneTruck,
    #[sea_orm(has_many = "super::bill::Entity")]
    Bill,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::propane_truck::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropaneTruck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
