use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub address: String,
    #[serde(skip_serializing)]
    pub password: String, // Argon2 hash, never exposed in JSON
    #[serde(with = "time::serde::rfc3339")]
    pub created_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_time: OffsetDateTime,
}

/// Input for a new record; `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: Option<String>,
    pub email: String,
    pub password: String,
    pub address: String,
}

/// The mutable part of an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub id: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

/// Current UTC time truncated to whole seconds.
pub fn now_seconds() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - time::Duration::nanoseconds(i64::from(now.nanosecond()))
}
