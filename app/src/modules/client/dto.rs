use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientDto {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    /// citizenship card number
    #[validate(length(min = 5, max = 20))]
    pub cc: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: String,

    pub occupation_id: Option<Uuid>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientDto {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub cc: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub occupation_id: Option<Uuid>,
}
