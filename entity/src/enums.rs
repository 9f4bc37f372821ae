use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Soft-delete lifecycle shared by every record, nothing is ever
/// physically removed except courses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum RecordState {
    #[sea_orm(string_value = "ACTIVO")]
    #[serde(rename = "ACTIVO")]
    Activo,
    #[sea_orm(string_value = "PENDIENTE")]
    #[serde(rename = "PENDIENTE")]
    Pendiente,
    #[sea_orm(string_value = "INACTIVO")]
    #[serde(rename = "INACTIVO")]
    Inactivo,
}

/// Operational lifecycle of a branch office, driven by the route and
/// billing workflows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum BranchOfficeStatus {
    /// ready to be assigned to a route
    #[sea_orm(string_value = "EFECTIVO")]
    #[serde(rename = "EFECTIVO")]
    Efectivo,
    #[sea_orm(string_value = "ASIGNADO")]
    #[serde(rename = "ASIGNADO")]
    Asignado,
    #[sea_orm(string_value = "EN CURSO")]
    #[serde(rename = "EN CURSO")]
    EnCurso,
    /// product was delivered and billed
    #[sea_orm(string_value = "CARGADO")]
    #[serde(rename = "CARGADO")]
    Cargado,
    #[sea_orm(string_value = "PENDIENTE")]
    #[serde(rename = "PENDIENTE")]
    Pendiente,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum TankStatus {
    #[sea_orm(string_value = "NO ASIGNADO")]
    #[serde(rename = "NO ASIGNADO")]
    NoAsignado,
    #[sea_orm(string_value = "ASIGNADO")]
    #[serde(rename = "ASIGNADO")]
    Asignado,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum OperatorStatus {
    #[sea_orm(string_value = "DISPONIBLE")]
    #[serde(rename = "DISPONIBLE")]
    Disponible,
    #[sea_orm(string_value = "EN RUTA")]
    #[serde(rename = "EN RUTA")]
    EnRuta,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum NotificationStatus {
    #[sea_orm(string_value = "NO LEIDO")]
    #[serde(rename = "NO LEIDO")]
    NoLeido,
    #[sea_orm(string_value = "LEIDO")]
    #[serde(rename = "LEIDO")]
    Leido,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum NotificationKind {
    /// a bill was created for a branch office
    #[sea_orm(string_value = "CARGUE")]
    #[serde(rename = "CARGUE")]
    Cargue,
    /// a delivery route was completed
    #[sea_orm(string_value = "DERROTERO")]
    #[serde(rename = "DERROTERO")]
    Derrotero,
    #[sea_orm(string_value = "TABLET")]
    #[serde(rename = "TABLET")]
    Tablet,
}
