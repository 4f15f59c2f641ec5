// Course catalog - public reads, admin writes

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::{Course, SessionPricing};

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub pricing: SessionPricing,
}

#[derive(Debug, Serialize)]
pub struct CourseView {
    pub id: i64,
    #[serde(flatten)]
    pub course: Course,
}

fn validate(req: &CourseRequest) -> AppResult<()> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if req.base_price < 0.0 {
        return Err(AppError::Validation("base_price cannot be negative".to_string()));
    }
    Ok(())
}

async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CourseView>>>> {
    let courses = Course::gen_all(&state.store, None).await?;
    let views = courses
        .into_iter()
        .map(|(id, course)| CourseView { id, course })
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CourseView>>> {
    let (id, course) = Course::gen_enforce(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(CourseView { id, course })))
}

async fn create_course(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CourseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CourseView>>)> {
    principal.require_role(Role::Admin)?;
    validate(&req)?;

    let course = Course {
        title: req.title.trim().to_string(),
        description: req.description,
        base_price: req.base_price,
        pricing: req.pricing,
    };
    let id = Course::create(&state.store, &course).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CourseView { id, course })),
    ))
}

async fn update_course(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> AppResult<Json<ApiResponse<CourseView>>> {
    principal.require_role(Role::Admin)?;
    validate(&req)?;

    let (id, _) = Course::gen_enforce(&state.store, id).await?;
    let course = Course {
        title: req.title.trim().to_string(),
        description: req.description,
        base_price: req.base_price,
        pricing: req.pricing,
    };
    Course::update(&state.store, id, &course).await?;

    Ok(Json(ApiResponse::ok(CourseView { id, course })))
}

async fn delete_course(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    principal.require_role(Role::Admin)?;
    Course::delete(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/{id}", get(get_course))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/courses", post(create_course))
        .route(
            "/api/admin/courses/{id}",
            axum::routing::put(update_course).delete(delete_course),
        )
}
