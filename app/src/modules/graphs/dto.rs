use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Month selector, MM/YY
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthDto {
    #[validate(length(equal = 5))]
    pub date: String,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPurchaseDto {
    /// public code of the branch office to aggregate
    pub branch_office_code: i32,

    /// month to aggregate, MM/YY
    #[validate(length(equal = 5))]
    pub date: String,
}

/// Mass and money delivered on a single day
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPurchasePoint {
    pub date: NaiveDate,
    pub masa_total: f64,
    pub total: f64,
}
