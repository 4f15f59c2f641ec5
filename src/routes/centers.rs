// Center registration, login, and admin management

use axum::{
    extract::{Extension, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{hash_password, issue_token, verify_password, Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, Center};

pub const NOT_APPROVED_MESSAGE: &str = "Your account has not been approved yet";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCenterRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub wallet_balance: Option<f64>,
    pub document_path: Option<String>,
    pub profile_image_path: Option<String>,
}

/// What the API exposes; never the stored password hash.
#[derive(Debug, Serialize)]
pub struct CenterView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub status: ApprovalStatus,
    pub wallet_balance: f64,
    pub document_path: Option<String>,
    pub profile_image_path: Option<String>,
}

impl CenterView {
    pub fn from(id: i64, center: Center) -> Self {
        CenterView {
            id,
            name: center.name,
            email: center.email,
            phone: center.phone,
            address: center.address,
            status: center.status,
            wallet_balance: center.wallet_balance,
            document_path: center.document_path,
            profile_image_path: center.profile_image_path,
        }
    }
}

fn require_fields(req: &RegisterRequest) -> AppResult<()> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.phone.trim().is_empty()
        || req.password.is_empty()
    {
        return Err(AppError::Validation(
            "name, email, phone and password are required".to_string(),
        ));
    }
    Ok(())
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CenterView>>)> {
    require_fields(&req)?;

    let email = req.email.trim().to_lowercase();
    if Center::find_by_key(&state.store, "email", &email).await?.is_some() {
        return Err(AppError::BadRequest("Email is already registered".to_string()));
    }

    let center = Center::new(
        req.name.trim().to_string(),
        email,
        req.phone.trim().to_string(),
        hash_password(&req.password)?,
    );
    let id = Center::create(&state.store, &center).await?;
    info!("Registered center {} ({}), pending approval", center.name, id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CenterView::from(id, center))),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = req.email.trim().to_lowercase();
    let (id, center) = Center::find_by_key(&state.store, "email", &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&req.password, &center.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    // Correct password is not enough: only approved centers may log in
    if center.status != ApprovalStatus::Approved {
        return Err(AppError::Forbidden(NOT_APPROVED_MESSAGE.to_string()));
    }

    let token = issue_token(
        id,
        Role::Center,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl,
    )?;
    let cookie = format!(
        "token={}; HttpOnly; Path=/; Max-Age={}",
        token, state.config.auth.token_ttl
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok(CenterView::from(id, center))),
    ))
}

async fn list_centers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<ApiResponse<Vec<CenterView>>>> {
    principal.require_role(Role::Admin)?;
    let centers = Center::gen_all(&state.store, None).await?;
    let views = centers
        .into_iter()
        .map(|(id, c)| CenterView::from(id, c))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CenterView>>> {
    // Admins see any center; a center sees itself
    if principal.role != Role::Admin && !(principal.role == Role::Center && principal.id == id) {
        return Err(AppError::Forbidden("Not allowed".to_string()));
    }
    let (id, center) = Center::gen_enforce(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(CenterView::from(id, center))))
}

/// Admin-seeded centers are created directly approved.
async fn create_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CenterView>>)> {
    principal.require_role(Role::Admin)?;
    require_fields(&req)?;

    let email = req.email.trim().to_lowercase();
    if Center::find_by_key(&state.store, "email", &email).await?.is_some() {
        return Err(AppError::BadRequest("Email is already registered".to_string()));
    }

    let center = Center::new_approved(
        req.name.trim().to_string(),
        email,
        req.phone.trim().to_string(),
        hash_password(&req.password)?,
    );
    let id = Center::create(&state.store, &center).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CenterView::from(id, center))),
    ))
}

async fn update_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCenterRequest>,
) -> AppResult<Json<ApiResponse<CenterView>>> {
    if principal.role != Role::Admin && !(principal.role == Role::Center && principal.id == id) {
        return Err(AppError::Forbidden("Not allowed".to_string()));
    }

    let (id, mut center) = Center::gen_enforce(&state.store, id).await?;

    if let Some(name) = req.name {
        center.name = name;
    }
    if let Some(phone) = req.phone {
        center.phone = phone;
    }
    if let Some(address) = req.address {
        center.address = Some(address);
    }
    if let Some(document_path) = req.document_path {
        center.document_path = Some(document_path);
    }
    if let Some(profile_image_path) = req.profile_image_path {
        center.profile_image_path = Some(profile_image_path);
    }
    // Wallet credits are admin-only
    if let Some(balance) = req.wallet_balance {
        principal.require_role(Role::Admin)?;
        if balance < 0.0 {
            return Err(AppError::Validation(
                "Wallet balance cannot be negative".to_string(),
            ));
        }
        center.wallet_balance = balance;
    }

    Center::update(&state.store, id, &center).await?;
    Ok(Json(ApiResponse::ok(CenterView::from(id, center))))
}

async fn approve_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CenterView>>> {
    set_approval(state, principal, id, ApprovalStatus::Approved).await
}

async fn reject_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CenterView>>> {
    set_approval(state, principal, id, ApprovalStatus::Rejected).await
}

async fn set_approval(
    state: AppState,
    principal: Principal,
    id: i64,
    to: ApprovalStatus,
) -> AppResult<Json<ApiResponse<CenterView>>> {
    principal.require_role(Role::Admin)?;

    let (id, mut center) = Center::gen_enforce(&state.store, id).await?;
    center.status = center.status.transition(to)?;
    Center::update(&state.store, id, &center).await?;
    info!("Center {} moved to {}", id, center.status.as_str());

    Ok(Json(ApiResponse::ok(CenterView::from(id, center))))
}

async fn delete_center(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    principal.require_role(Role::Admin)?;
    Center::delete(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/centers/register", post(register))
        .route("/api/centers/login", post(login))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/centers", get(list_centers).post(create_center))
        .route(
            "/api/centers/{id}",
            get(get_center).put(update_center).delete(delete_center),
        )
        .route("/api/centers/{id}/approve", post(approve_center))
        .route("/api/centers/{id}/reject", post(reject_center))
}
