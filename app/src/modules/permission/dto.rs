use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// single letter access code: r / w / e
    #[validate(length(min = 1, max = 1))]
    pub access_code: String,

    pub description: String,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 1))]
    pub access_code: Option<String>,

    pub description: Option<String>,
}
