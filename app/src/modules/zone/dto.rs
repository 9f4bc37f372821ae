use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZoneDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}
