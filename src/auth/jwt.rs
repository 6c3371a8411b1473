//! Verification of access tokens issued by the external identity provider.

use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    match &config.jwt_audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AppError::Unauthorized
    })
}

#[cfg(test)]
pub fn issue_test_token(user_id: Uuid, secret: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + chrono::Duration::seconds(ttl_secs)).timestamp(),
        iat: Some(now.timestamp()),
        email: Some("someone@example.com".into()),
        aud: Some("authenticated".into()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(audience: Option<&str>) -> Config {
        Config {
            jwt_audience: audience.map(String::from),
            ..Config::for_tests()
        }
    }

    #[test]
    fn accepts_valid_token() {
        let user = Uuid::new_v4();
        let token = issue_test_token(user, "test-secret", 300);
        let data = verify_token(&token, &config(None)).unwrap();
        assert_eq!(data.claims.sub, user);
    }

    #[test]
    fn checks_audience_when_configured() {
        let token = issue_test_token(Uuid::new_v4(), "test-secret", 300);
        assert!(verify_token(&token, &config(Some("authenticated"))).is_ok());
        assert!(verify_token(&token, &config(Some("service_role"))).is_err());
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let cfg = config(None);
        let forged = issue_test_token(Uuid::new_v4(), "other-secret", 300);
        assert!(matches!(verify_token(&forged, &cfg), Err(AppError::Unauthorized)));

        let expired = issue_test_token(Uuid::new_v4(), "test-secret", -600);
        assert!(matches!(verify_token(&expired, &cfg), Err(AppError::Unauthorized)));
    }
}
