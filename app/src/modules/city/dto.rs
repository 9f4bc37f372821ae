use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCityDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub department_id: Uuid,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub department_id: Option<Uuid>,
}
