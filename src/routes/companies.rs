// Company registration, login, OTP password reset, and admin management

use axum::{
    extract::{Extension, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::centers::NOT_APPROVED_MESSAGE;
use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{hash_password, issue_token, verify_password, Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, Company};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub contact_person: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub contact_person: Option<String>,
    pub status: ApprovalStatus,
    pub document_path: Option<String>,
    pub profile_image_path: Option<String>,
}

impl CompanyView {
    fn from(id: i64, company: Company) -> Self {
        CompanyView {
            id,
            name: company.name,
            email: company.email,
            phone: company.phone,
            contact_person: company.contact_person,
            status: company.status,
            document_path: company.document_path,
            profile_image_path: company.profile_image_path,
        }
    }
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CompanyView>>)> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.phone.trim().is_empty()
        || req.password.is_empty()
    {
        return Err(AppError::Validation(
            "name, email, phone and password are required".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();
    if Company::find_by_key(&state.store, "email", &email).await?.is_some() {
        return Err(AppError::BadRequest("Email is already registered".to_string()));
    }

    let mut company = Company::new(
        req.name.trim().to_string(),
        email,
        req.phone.trim().to_string(),
        hash_password(&req.password)?,
    );
    company.contact_person = req.contact_person;

    let id = Company::create(&state.store, &company).await?;
    info!("Registered company {} ({}), pending approval", company.name, id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CompanyView::from(id, company))),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = req.email.trim().to_lowercase();
    let (id, company) = Company::find_by_key(&state.store, "email", &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&req.password, &company.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    if company.status != ApprovalStatus::Approved {
        return Err(AppError::Forbidden(NOT_APPROVED_MESSAGE.to_string()));
    }

    let token = issue_token(
        id,
        Role::Company,
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
        Json(ApiResponse::ok(CompanyView::from(id, company))),
    ))
}

/// Issue a reset OTP. The response never reveals whether the email exists;
/// the code itself would go out by mail and is only logged here.
async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let email = req.email.trim().to_lowercase();

    if let Some((id, mut company)) = Company::find_by_key(&state.store, "email", &email).await? {
        let code = company.issue_reset_otp();
        Company::update(&state.store, id, &company).await?;
        info!("Issued password reset OTP for company {}: {}", id, code);
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "message": "If the account exists, a reset code has been sent"
    }))))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if req.new_password.is_empty() {
        return Err(AppError::Validation("new_password is required".to_string()));
    }

    let email = req.email.trim().to_lowercase();
    let (id, mut company) = Company::find_by_key(&state.store, "email", &email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset code".to_string()))?;

    if !company.reset_otp_matches(req.otp.trim(), Utc::now().timestamp()) {
        return Err(AppError::BadRequest("Invalid or expired reset code".to_string()));
    }

    company.password_hash = hash_password(&req.new_password)?;
    company.clear_reset_otp();
    Company::update(&state.store, id, &company).await?;
    info!("Company {} reset its password", id);

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "message": "Password updated"
    }))))
}

async fn list_companies(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<ApiResponse<Vec<CompanyView>>>> {
    principal.require_role(Role::Admin)?;
    let companies = Company::gen_all(&state.store, None).await?;
    let views = companies
        .into_iter()
        .map(|(id, c)| CompanyView::from(id, c))
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_company(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CompanyView>>> {
    if principal.role != Role::Admin && !(principal.role == Role::Company && principal.id == id) {
        return Err(AppError::Forbidden("Not allowed".to_string()));
    }
    let (id, company) = Company::gen_enforce(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(CompanyView::from(id, company))))
}

async fn approve_company(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CompanyView>>> {
    set_approval(state, principal, id, ApprovalStatus::Approved).await
}

async fn reject_company(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CompanyView>>> {
    set_approval(state, principal, id, ApprovalStatus::Rejected).await
}

async fn set_approval(
    state: AppState,
    principal: Principal,
    id: i64,
    to: ApprovalStatus,
) -> AppResult<Json<ApiResponse<CompanyView>>> {
    principal.require_role(Role::Admin)?;

    let (id, mut company) = Company::gen_enforce(&state.store, id).await?;
    company.status = company.status.transition(to)?;
    Company::update(&state.store, id, &company).await?;
    info!("Company {} moved to {}", id, company.status.as_str());

    Ok(Json(ApiResponse::ok(CompanyView::from(id, company))))
}

async fn delete_company(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    principal.require_role(Role::Admin)?;
    Company::delete(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/companies/register", post(register))
        .route("/api/companies/login", post(login))
        .route("/api/companies/forgot-password", post(forgot_password))
        .route("/api/companies/reset-password", post(reset_password))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/companies", get(list_companies))
        .route(
            "/api/companies/{id}",
            get(get_company).delete(delete_company),
        )
        .route("/api/companies/{id}/approve", post(approve_company))
        .route("/api/companies/{id}/reject", post(reject_company))
}
