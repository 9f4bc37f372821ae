use entity::{branch_office, location};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// ids of the branch offices visited at this stop
    pub branch_office_ids: Vec<Uuid>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub branch_office_ids: Option<Vec<Uuid>>,
}

/// A location with its branch offices loaded
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(flatten)]
    pub location: location::Model,

    pub branch_offices: Vec<branch_office::Model>,
}
