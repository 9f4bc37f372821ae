use entity::enums::OperatorStatus;
use entity::{role, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    /// national identification number, digits only
    #[validate(length(min = 5, max = 20))]
    pub id_number: String,

    #[validate(length(min = 5))]
    pub password: String,

    pub role_id: Uuid,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub id_number: Option<String>,

    /// when sent the password is re-hashed before being stored
    #[validate(length(min = 5))]
    pub password: Option<String>,

    pub status: Option<OperatorStatus>,

    pub role_id: Option<Uuid>,
}

/// A user with its role loaded
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(flatten)]
    pub user: user::Model,

    pub role: Option<role::Model>,
}
