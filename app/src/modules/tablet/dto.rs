use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTabletDto {
    #[validate(length(min = 1, max = 255))]
    pub imei: String,

    /// code of the branch office the device is installed at
    pub branch_office_code: i32,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTabletDto {
    #[validate(length(min = 1, max = 255))]
    pub imei: Option<String>,

    pub branch_office_code: Option<i32>,
}
