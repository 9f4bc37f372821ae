use super::dto::{SignIn, SignInResponse};
use super::jwt;
use crate::{
    database::error::DbError,
    modules::common::{
        error_codes::WRONG_PASSWORD,
        extractors::{DbConnection, ValidatedJson},
        responses::{internal_error_res, SimpleError},
    },
    server::controller::AppState,
};
use axum::{routing::post, Json, Router};
use entity::enums::RecordState;
use entity::user;
use http::StatusCode;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

#[cfg(not(test))]
pub fn create_router(_state: AppState) -> Router<AppState> {
    Router::new().route("/login", post(sign_in))
}

/// Sign in with a email or id number plus a password
#[utoipa::path(
    post,
    tag = "auth",
    path = "/auth/login",
    request_body(content = SignIn, content_type = "application/json"),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = SignInResponse,
        ),
        (
            status = UNAUTHORIZED,
            description = "wrong password",
            body = SimpleError,
        ),
        (
            status = NOT_FOUND,
            description = "user not found",
            body = SimpleError,
        ),
    ),
)]
pub async fn sign_in(
    DbConnection(db): DbConnection,
    ValidatedJson(payload): ValidatedJson<SignIn>,
) -> Result<Json<SignInResponse>, (StatusCode, SimpleError)> {
    let user = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(payload.user.clone()))
                .add(user::Column::IdNumber.eq(payload.user.clone())),
        )
        .filter(user::Column::State.ne(RecordState::Inactivo))
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let password_matches =
        bcrypt::verify(&payload.password, &user.password).or(Err(internal_error_res()))?;

    if !password_matches {
        return Err((StatusCode::UNAUTHORIZED, SimpleError::from(WRONG_PASSWORD)));
    }

    let mut claims = jwt::Claims {
        sub: user.id.to_string(),
        ..Default::default()
    };
    claims.set_expiration_in(jwt::session_duration());

    let token = jwt::encode(&claims).or(Err(internal_error_res()))?;

    Ok(Json(SignInResponse { user, token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use entity::enums::OperatorStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn init_test_config() {
        std::env::set_var("JWT_SECRET", "test only secret, at least 256 bits long!");
        std::env::set_var("ADMIN_PASSWORD", "test-admin-password");
    }

    fn stored_user(password: &str) -> user::Model {
        let now = chrono::Utc::now();

        user::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            status: OperatorStatus::Disponible,
            first_name: String::from("Marta"),
            last_name: String::from("Quintero"),
            email: String::from("marta@example.com"),
            id_number: String::from("52123456"),
            // min cost to keep the test fast
            password: bcrypt::hash(password, 4).unwrap(),
            role_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn sign_in_rejects_a_wrong_password() {
        let user = stored_user("correct-password");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user.clone()]])
            .into_connection();

        let (status, error) = sign_in(
            DbConnection(db),
            ValidatedJson(SignIn {
                user: user.email,
                password: String::from("not-the-password"),
            }),
        )
        .await
        .expect_err("a wrong password must not sign in");

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(serde_json::to_value(error).unwrap()["error"], WRONG_PASSWORD);
    }

    #[tokio::test]
    async fn sign_in_issues_a_token_for_the_user() {
        init_test_config();

        let user = stored_user("correct-password");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user.clone()]])
            .into_connection();

        let Json(response) = sign_in(
            DbConnection(db),
            ValidatedJson(SignIn {
                user: user.id_number,
                password: String::from("correct-password"),
            }),
        )
        .await
        .unwrap();

        let claims = jwt::decode(&response.token).unwrap();

        assert_eq!(claims.claims.sub, user.id.to_string());
        assert_eq!(response.user.id, user.id);
    }
}
