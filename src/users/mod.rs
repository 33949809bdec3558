use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod service;

/// Routes reachable without a bearer token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::create_user))
        .route("/user/login", post(handlers::login))
}

/// Routes that sit behind bearer verification.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/user/:user_id",
        get(handlers::get_user)
            .put(handlers::update_user)
            .delete(handlers::delete_user),
    )
}
