use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{Error, PendingError};

/// How an error is reported to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub status: StatusCode,
    pub message: String,
    pub log: bool,
}

pub fn classify(err: &Error) -> Classified {
    let (status, log) = match err {
        Error::Request { status, .. } => (*status, status.is_server_error()),
        Error::Constraint(_) => (StatusCode::BAD_REQUEST, false),
        Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, true),
        Error::Timeout | Error::Cancelled => (StatusCode::REQUEST_TIMEOUT, true),
        Error::NotFound => (StatusCode::NOT_FOUND, false),
        Error::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, true),
    };
    let message = match err {
        Error::Unexpected(_) => "internal server error".to_owned(),
        other => other.to_string(),
    };
    Classified {
        status,
        message,
        log,
    }
}

/// Turns any [`Error`] returned further down the chain into its status and
/// JSON body, logging the ones that point at a server-side problem.
pub async fn map_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let headers = req.headers().clone();

    let mut res = next.run(req).await;
    let Some(PendingError(err)) = res.extensions_mut().remove::<PendingError>() else {
        return res;
    };

    let classified = classify(&err);
    if classified.log {
        let detail = format!("{err:#}");
        error!(
            headers = %flatten_headers(&headers),
            method = %method,
            uri = %uri,
            status = classified.status.as_u16(),
            error = %detail,
            "request failed"
        );
    }

    (
        classified.status,
        Json(json!({ "message": classified.message })),
    )
        .into_response()
}

fn flatten_headers(headers: &HeaderMap) -> String {
    headers
        .keys()
        .map(|name| {
            let values: Vec<&str> = headers
                .get_all(name)
                .iter()
                .map(|v| v.to_str().unwrap_or("<binary>"))
                .collect();
            format!("{}:{}", name, values.join(","))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
