use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignIn {
    /// email address or national id number of the user
    #[validate(length(min = 1))]
    pub user: String,

    #[validate(length(min = 5))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user: entity::user::Model,

    /// short lived bearer token to be sent on the authorization header
    pub token: String,
}
