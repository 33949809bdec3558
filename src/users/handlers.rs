use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, TokenResponse, UserPayload},
    model::{NewUser, User, UserChanges},
};
use crate::{auth::password, error::Result, state::AppState};

// Error paths return the service error untouched; the mapping layer owns
// status selection.

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let input = payload.validate()?;
    let hashed = password::encode_blocking(input.password).await?;

    let user = state
        .users
        .create(NewUser {
            id: input.id,
            email: input.email,
            password: hashed,
            address: input.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    let user = state.users.get(&user_id).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(creds) = payload?;
    let creds = creds.normalized();
    state.users.login(&creds.email, &creds.password).await?;

    let token = state.keys.sign(&creds.email)?;
    Ok(Json(TokenResponse {
        token: format!("Bearer {token}"),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(payload) = payload?;
    let input = payload.validate()?;
    let hashed = password::encode_blocking(input.password).await?;

    state
        .users
        .update(UserChanges {
            id: user_id,
            email: input.email,
            password: hashed,
            address: input.address,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    state.users.delete(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
