use entity::enums::BranchOfficeStatus;
use entity::{bill, branch_office, city, client, factor, stationary_tank, zone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchOfficeDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// tax identification number
    #[validate(length(min = 5, max = 20))]
    pub nit: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 1, max = 50))]
    pub latitude: String,

    #[validate(length(min = 1, max = 50))]
    pub longitude: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: String,

    /// price per kilogram charged at this office
    #[validate(range(min = 0.0))]
    pub kilogram_value: f64,

    #[validate(range(min = 0))]
    pub tank_stock: i32,

    pub general_ticket: bool,

    /// geofence polygon serialized by the caller
    pub geofence: String,

    #[serde(default)]
    pub city_ids: Vec<Uuid>,

    #[serde(default)]
    pub zone_ids: Vec<Uuid>,

    #[serde(default)]
    pub factor_ids: Vec<Uuid>,

    #[serde(default)]
    pub client_ids: Vec<Uuid>,

    /// tanks to allocate to the new office, they are switched to
    /// ASIGNADO in the same transaction
    #[serde(default)]
    pub stationary_tank_ids: Vec<Uuid>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchOfficeDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub nit: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub latitude: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub longitude: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(range(min = 0.0))]
    pub kilogram_value: Option<f64>,

    #[validate(range(min = 0))]
    pub tank_stock: Option<i32>,

    pub general_ticket: Option<bool>,

    pub geofence: Option<String>,

    pub city_ids: Option<Vec<Uuid>>,

    pub zone_ids: Option<Vec<Uuid>>,

    pub factor_ids: Option<Vec<Uuid>>,

    pub client_ids: Option<Vec<Uuid>>,

    /// replaces the allocated tanks, removed tanks go back to
    /// NO ASIGNADO and added ones to ASIGNADO
    pub stationary_tank_ids: Option<Vec<Uuid>>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchOfficeStatusDto {
    pub status: BranchOfficeStatus,
}

/// A branch office with all of its catalog relations loaded
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchOfficeDto {
    #[serde(flatten)]
    pub branch_office: branch_office::Model,

    pub cities: Vec<city::Model>,
    pub zones: Vec<zone::Model>,
    pub factors: Vec<factor::Model>,
    pub clients: Vec<client::Model>,
    pub stationary_tanks: Vec<stationary_tank::Model>,
}

/// A branch office with its billing history
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchOfficeWithBillsDto {
    #[serde(flatten)]
    pub branch_office: branch_office::Model,

    pub bills: Vec<bill::Model>,
}
