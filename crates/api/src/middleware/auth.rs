//! Authentication extractors for Axum handlers.
//!
//! Two flavours: [`AuthUser`] rejects with 401 when no valid token is
//! presented (write paths), while [`OptionalAuthUser`] degrades to
//! anonymous (read paths). Neither distinguishes *why* a token was
//! rejected; the cause is logged server-side only.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use boxd_core::error::CoreError;
use boxd_core::types::UserId;

use crate::auth::verifier::verify_bearer;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer token in the
/// `Authorization` header. Rejection is a 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The provider-assigned user id (from `claims.sub`).
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing or invalid bearer token".into(),
            ))),
        }
    }
}

/// Caller identity for read paths: `Some(user_id)` when a valid token
/// was presented, `None` otherwise. Never rejects -- a missing, expired,
/// or malformed token is treated identically to anonymous access.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<UserId>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(authenticate(parts, state)))
    }
}

/// Resolve the caller's identity from the request headers, or `None`.
fn authenticate(parts: &Parts, state: &AppState) -> Option<UserId> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;

    match verify_bearer(token, &state.config.auth) {
        Ok(claims) => Some(claims.sub),
        Err(err) => {
            tracing::debug!(error = %err, "Bearer token rejected");
            None
        }
    }
}
