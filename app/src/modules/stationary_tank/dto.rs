use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStationaryTankDto {
    #[validate(length(min = 1, max = 255))]
    pub serial: String,

    /// capacity in kilograms
    #[validate(range(min = 1))]
    pub capacity: i32,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStationaryTankDto {
    #[validate(length(min = 1, max = 255))]
    pub serial: Option<String>,

    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
}

/// Ids of the tanks to release back to the unassigned pool
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStationaryTanksDto {
    #[validate(length(min = 1))]
    pub tank_ids: Vec<Uuid>,
}
