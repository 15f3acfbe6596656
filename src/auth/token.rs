use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::model::Role;

/// Identity carried inside an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: Uuid,
    pub role: Role,
}

/// Bearer credential handed to the caller after a successful login. The
/// service keeps no record of it.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub expiry: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("cannot sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    Invalid,
}

/// Issues and checks bearer tokens for a payload and an expiry in seconds.
pub trait TokenProvider: Send + Sync {
    fn generate(&self, payload: TokenPayload, expiry_secs: u64) -> Result<Token, TokenError>;
    fn validate(&self, token: &str) -> Result<TokenPayload, TokenError>;
}
