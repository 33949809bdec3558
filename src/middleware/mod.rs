//! Cross-cutting request handling, applied in `app::build_app`.

pub mod auth;
pub mod errors;
pub mod timeout;

pub use auth::require_bearer;
pub use errors::map_errors;
pub use timeout::enforce_deadline;
