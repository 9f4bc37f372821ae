use crate::enums::RecordState;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Immutable record of a completed charge ("remisión").
///
/// Branch office, client and operator fields are denormalized snapshots
/// taken at creation time so later edits to those entities never change
/// what was billed. `total` is derived once from the office's kilogram
/// value and the delivered mass.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::bill::Model)]
#[sea_orm(table_name = "bill")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,

    pub branch_office_id: Uuid,
    pub operator_id: Uuid,
    pub client_id: Uuid,

    // branch office snapshot
    pub branch_office_name: String,
    pub branch_office_nit: String,
    pub branch_office_address: String,
    pub branch_office_code: i32,

    // client snapshot
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_cc: String,

    // operator snapshot
    pub operator_first_name: String,
    pub operator_last_name: String,

    // charge metrics
    #[sea_orm(column_type = "Double")]
    pub densidad: f64,
    #[sea_orm(column_type = "Double")]
    pub temperatura: f64,
    #[sea_orm(column_type = "Double")]
    pub masa_total: f64,
    #[sea_orm(column_type = "Double")]
    pub volumen_total: f64,

    /// charge window, (fecha_inicial, hora_inicial) is unique and acts
    /// as the duplicate submission guard
    pub fecha_inicial: NaiveDate,
    pub fecha_final: NaiveDate,
    pub hora_inicial: String,
    pub hora_final: String,

    /// kilogram_value of the office at creation time x masa_total
    #[sea_orm(column_type = "Double")]
    pub total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branch_office::Entity",
        from = "Column::BranchOfficeId",
        to = "super::branch_office::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    BranchOffice,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OperatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Operator,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Client,
}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchOffice.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
