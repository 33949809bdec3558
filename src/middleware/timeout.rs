use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::Error, state::AppState};

/// Bounds the rest of the chain by the configured request timeout.
///
/// When the deadline passes the inner future is dropped, which aborts any
/// store call in flight and hands its connection back to the pool.
pub async fn enforce_deadline(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    let limit = state.config.request_timeout;
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(res) => Ok(res),
        Err(_) => {
            debug!(timeout_ms = limit.as_millis() as u64, "request deadline elapsed");
            Err(Error::Timeout)
        }
    }
}
