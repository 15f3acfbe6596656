use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registration payload. Consumed by `register`; the persisted row is derived
/// from it and it is not retained.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_valid_email(self.email.trim()) {
            return Err(AppError::invalid_request("invalid email"));
        }
        if self.password.len() < 8 {
            return Err(AppError::invalid_request(
                "password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// Login payload; never persisted.
#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Partial update applied to an existing user by id. Absent fields keep their
/// stored value. Password changes are not accepted here: updates are applied
/// as-is, with no hashing step.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub email: Option<String>,
}

/// Uniform success envelope wrapping every 200 response.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub data: T,
}

impl<T> SuccessBody<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
