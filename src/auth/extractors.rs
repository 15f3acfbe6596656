use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::users::model::Role;

/// Authenticated caller, extracted from the bearer token and passed into
/// handlers explicitly instead of being fished out of ambient request state.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for Requester {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing Authorization header"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| AppError::unauthorized("invalid auth scheme"))?;

        let payload = state
            .tokens
            .validate(token)
            .map_err(|_| AppError::unauthorized("invalid or expired token"))?;

        debug!(user_id = %payload.user_id, role = %payload.role, "requester authenticated");

        Ok(Requester {
            user_id: payload.user_id,
            role: payload.role,
        })
    }
}
