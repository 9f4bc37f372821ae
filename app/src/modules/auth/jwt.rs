use crate::config::app_config;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

/// duration of a session token issued on sign in
pub fn session_duration() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    // Audience
    pub aud: String,
    // Issued at (as UTC timestamp)
    pub iat: usize,
    // Issuer
    pub iss: String,
    // Subject (whom token refers to), here the id of the user
    pub sub: String,
    // Expiration time (as UTC timestamp, validate_exp defaults to true in validation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

impl Default for Claims {
    fn default() -> Claims {
        let now = Utc::now();

        Claims {
            aud: String::from("back office users"),
            iat: now.timestamp() as usize,
            iss: String::from("distribution API"),
            sub: String::new(),
            exp: None,
        }
    }
}

impl Claims {
    /// sets the claims `iat` (issued at) to the current time, and the `exp` to now + duration
    pub fn set_expiration_in(&mut self, duration: Duration) -> &Self {
        let now = Utc::now();

        self.exp = Some((now + duration).timestamp() as usize);
        self.iat = now.timestamp() as usize;

        self
    }
}

pub fn encode(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(app_config().jwt_secret.as_ref()),
    )
}

pub fn decode(jwt: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["back office users"]);

    jsonwebtoken::decode::<Claims>(
        jwt,
        &DecodingKey::from_secret(app_config().jwt_secret.as_ref()),
        &validation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_config() {
        std::env::set_var("JWT_SECRET", "test only secret, at least 256 bits long!");
        std::env::set_var("ADMIN_PASSWORD", "test-admin-password");
    }

    #[test]
    fn issued_tokens_can_be_decoded() {
        init_test_config();

        let mut claims = Claims {
            sub: String::from("4e9f7d35-5c1a-4b5a-9f40-4f6d9f2d6a01"),
            ..Default::default()
        };
        claims.set_expiration_in(session_duration());

        let token = encode(&claims).unwrap();
        let decoded = decode(&token).unwrap();

        assert_eq!(decoded.claims.sub, claims.sub);
        assert_eq!(decoded.claims.aud, "back office users");
    }

    #[test]
    fn expired_tokens_are_rejected() {
        init_test_config();

        let mut claims = Claims::default();
        claims.set_expiration_in(Duration::hours(-2));

        let token = encode(&claims).unwrap();

        assert!(decode(&token).is_err());
    }
}
