// Admin session - credentials come from the environment, not the store

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{issue_token, Role};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = &state.config.auth;
    if req.email.trim().to_lowercase() != auth.admin_email.to_lowercase()
        || req.password != auth.admin_password
    {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = issue_token(0, Role::Admin, &auth.jwt_secret, auth.token_ttl)?;
    let cookie = format!(
        "token={}; HttpOnly; Path=/; Max-Age={}",
        token, auth.token_ttl
    );
    info!("Admin logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok(serde_json::json!({ "role": "admin" }))),
    ))
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}
