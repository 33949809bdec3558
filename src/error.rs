use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a request can end in.
///
/// Lower layers pick the variant; only the error-mapping middleware decides
/// what status, body and log line it becomes.
#[derive(Debug, Error)]
pub enum Error {
    /// Already carries the status the client should see.
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error("{0}")]
    Constraint(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("requested object does not exist")]
    NotFound,

    #[error("request deadline exceeded")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn request(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Constraint("user already exists".into())
            }
            other => Self::Unexpected(anyhow::Error::new(other).context("database")),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => Self::Constraint(rejection.body_text()),
            other => Self::request(other.status(), other.body_text()),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Unexpected(anyhow::Error::new(err).context("blocking task"))
        }
    }
}

/// Carries an unclassified error from a handler out to the mapping layer.
#[derive(Debug, Clone)]
pub struct PendingError(pub Arc<Error>);

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Placeholder status; replaced once the mapping layer sees the error.
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        res.extensions_mut().insert(PendingError(Arc::new(self)));
        res
    }
}
