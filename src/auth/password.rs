use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

use crate::error::Error as AppError;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password does not match")]
    Mismatch,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AppError::unauthorized("invalid password"),
            PasswordError::Hash(msg) => AppError::Unexpected(anyhow::anyhow!(msg)),
            PasswordError::Task(e) => AppError::from(e),
        }
    }
}

/// Salted Argon2 hash in PHC string form.
pub fn encode(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::Hash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify(hash: &str, candidate: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        PasswordError::Hash(e.to_string())
    })?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(PasswordError::Mismatch),
        Err(e) => Err(PasswordError::Hash(e.to_string())),
    }
}

/// [`encode`] on the blocking pool.
pub async fn encode_blocking(plain: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || encode(&plain)).await?
}

/// [`verify`] on the blocking pool.
pub async fn verify_blocking(hash: String, candidate: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify(&hash, &candidate)).await?
}
