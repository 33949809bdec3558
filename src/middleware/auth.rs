use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::Error, state::AppState};

/// Rejects the request unless it carries `Authorization: Bearer <token>`
/// signed with the shared secret, unexpired and for our audience.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| Error::unauthorized("missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::unauthorized("invalid token format"))?;

    let claims = state
        .keys
        .verify(token)
        .map_err(|e| Error::unauthorized(format!("invalid token: {e}")))?;
    debug!(email = %claims.email, "bearer token accepted");

    Ok(next.run(req).await)
}
