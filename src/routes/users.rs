use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    types::{User, UserPayload},
};

fn parse_id(raw: &str) -> AppResult<u64> {
    raw.parse::<u64>().map_err(|_| AppError::InvalidInput(format!("Invalid user id: {}", raw)))
}

fn parse_payload(payload: Result<Json<UserPayload>, JsonRejection>) -> AppResult<UserPayload> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let req = parse_payload(payload)?;
    let user = state.store.create(req.name);
    state.metrics.inc_users_created();
    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

// Unknown ids answer 200 with a JSON null
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Option<User>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(id)))
}

pub async fn get_all_users(State(state): State<AppState>) -> Json<BTreeMap<u64, User>> {
    Json(state.store.get_all())
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id)?;
    let req = parse_payload(payload)?;
    let user = state.store.update(id, req.name)?;
    state.metrics.inc_users_updated();
    tracing::info!(id = user.id, "user updated");
    Ok(Json(user))
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    if state.store.delete(id).is_some() {
        state.metrics.inc_users_deleted();
        tracing::info!(id, "user deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
