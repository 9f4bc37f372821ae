use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFactorDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub value: f64,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFactorDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub value: Option<f64>,
}
