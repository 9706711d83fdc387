//! Authenticated-user extractor. Handlers that take a [`CurrentUser`]
//! argument reject requests without a valid bearer token with 401; role
//! checks on top of that return 403.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::jwt::JwtService;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl CurrentUser {
    /// 403 unless the user's role is one of `allowed`.
    pub fn require_role(&self, allowed: &[&str]) -> Result<(), AppError> {
        if allowed.iter().any(|r| r.eq_ignore_ascii_case(&self.role)) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    JwtService: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtService::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();
        let token =
            JwtService::from_bearer(header).ok_or(AppError::Unauthorized("missing_token"))?;
        let claims = jwt.verify(token)?;
        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
