use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropaneTruckDto {
    /// license plate, upper-cased before being stored
    #[validate(length(min = 3, max = 10))]
    pub plate: String,

    /// capacity in kilograms
    #[validate(range(min = 1))]
    pub capacity: i32,

    pub operator_id: Option<Uuid>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropaneTruckDto {
    #[validate(length(min = 3, max = 10))]
    pub plate: Option<String>,

    #[validate(range(min = 1))]
    pub capacity: Option<i32>,

    pub operator_id: Option<Uuid>,
}
