use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}
