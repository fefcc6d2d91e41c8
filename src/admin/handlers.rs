use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use crate::fleet::Server;
use crate::health;
use crate::http::request::EnableRequest;
use crate::http::AppState;

#[derive(Debug, Serialize)]
pub struct EnableResponse {
    pub changed: bool,
    pub server: Server,
}

pub async fn put_enable(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<EnableRequest>,
) -> Result<Json<EnableResponse>, StatusCode> {
    let changed = health::set_enabled(&state.registry, &name, body.enable).ok_or(StatusCode::NOT_FOUND)?;
    let server = state.registry.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(EnableResponse { changed, server }))
}
