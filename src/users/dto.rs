use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for create and update.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
}

impl UserPayload {
    /// Requires a well-formed email and a non-empty password.
    pub fn validate(mut self) -> Result<Self> {
        self.email = self.email.trim().to_owned();

        if self.email.is_empty() {
            return Err(Error::constraint("error validating user: email is required"));
        }
        if self.password.is_empty() {
            return Err(Error::constraint(
                "error validating user: password is required",
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(Error::constraint("error validating user: invalid email"));
        }
        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Trims the email the same way `UserPayload::validate` does on create.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_owned();
        self
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
