//! Bearer-token service. Tokens are HS256 JWTs carrying the user id, email
//! and role; expiry is enforced on verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_hours: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` and `JWT_EXPIRES_HOURS` from the environment, with
    /// development defaults.
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev_secret_change_me".to_string()),
            expires_hours: std::env::var("JWT_EXPIRES_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 7),
        }
    }
}

/// Claims stored in the token: `{sub, email, role}` plus timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_hours: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expires_hours: config.expires_hours,
        }
    }

    pub fn sign(&self, user: &shared::User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expires_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signing token: {e}")))
    }

    /// Missing signature, tampering and expiry all collapse to 401.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("invalid_token"))
    }

    /// Extract the token from an `Authorization: Bearer <token>` value.
    pub fn from_bearer(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> shared::User {
        shared::User {
            id: 42,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            role: "supervisor".to_string(),
        }
    }

    fn service(expires_hours: i64) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "unit-test-secret".to_string(),
            expires_hours,
        })
    }

    #[test]
    fn sign_then_verify_round_trips_the_claims() {
        let svc = service(1);
        let token = svc.sign(&test_user()).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, "supervisor");
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let svc = service(-2);
        let token = svc.sign(&test_user()).unwrap();
        assert!(matches!(
            svc.verify(&token),
            Err(AppError::Unauthorized("invalid_token"))
        ));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = service(1).sign(&test_user()).unwrap();
        let other = JwtService::new(&JwtConfig {
            secret: "different".to_string(),
            expires_hours: 1,
        });
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(JwtService::from_bearer("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::from_bearer("Basic abc"), None);
        assert_eq!(JwtService::from_bearer(""), None);
    }
}
