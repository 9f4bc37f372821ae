use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillDto {
    pub branch_office_id: Uuid,
    pub operator_id: Uuid,
    pub client_id: Uuid,

    #[validate(range(min = 0.0))]
    pub densidad: f64,

    pub temperatura: f64,

    #[validate(range(min = 0.0))]
    pub masa_total: f64,

    #[validate(range(min = 0.0))]
    pub volumen_total: f64,

    /// charge start date as sent by the tablets, DD/MM/YY
    #[validate(length(equal = 8))]
    pub fecha_inicial: String,

    /// charge end date, DD/MM/YY
    #[validate(length(equal = 8))]
    pub fecha_final: String,

    #[validate(length(min = 1, max = 20))]
    pub hora_inicial: String,

    #[validate(length(min = 1, max = 20))]
    pub hora_final: String,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillDto {
    #[validate(range(min = 0.0))]
    pub densidad: Option<f64>,

    pub temperatura: Option<f64>,

    /// updating the delivered mass recomputes the bill total
    #[validate(range(min = 0.0))]
    pub masa_total: Option<f64>,

    #[validate(range(min = 0.0))]
    pub volumen_total: Option<f64>,

    #[validate(length(min = 1, max = 20))]
    pub hora_inicial: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub hora_final: Option<String>,
}

/// Month selector as sent by the tablets, MM/YY
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillsByDateDto {
    #[validate(length(equal = 5))]
    pub date: String,
}
