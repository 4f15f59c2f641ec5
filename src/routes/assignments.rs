// Assignments and case studies - chapter content with append-only blocks

use axum::{
    extract::{Extension, Path, Query, State},
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
use crate::models::{Assignment, CaseStudy, Question};

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub chapter_id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AddSimulationRequest {
    pub kind: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionSetRequest {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct AddContentBlockRequest {
    pub kind: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterFilter {
    pub chapter_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentView {
    pub id: i64,
    #[serde(flatten)]
    pub assignment: Assignment,
}

#[derive(Debug, Serialize)]
pub struct CaseStudyView {
    pub id: i64,
    #[serde(flatten)]
    pub case_study: CaseStudy,
}

fn require_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    Ok(())
}

// --- assignments ---

async fn create_assignment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AssignmentView>>)> {
    principal.require_role(Role::Admin)?;
    require_title(&req.title)?;

    let assignment = Assignment::new(req.chapter_id, req.title.trim().to_string());
    let id = Assignment::create(&state.store, &assignment).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AssignmentView { id, assignment })),
    ))
}

async fn list_assignments(
    State(state): State<AppState>,
    Query(filter): Query<ChapterFilter>,
) -> AppResult<Json<ApiResponse<Vec<AssignmentView>>>> {
    let assignments = Assignment::gen_all(&state.store, None).await?;
    let views = assignments
        .into_iter()
        .filter(|(_, a)| filter.chapter_id.map(|c| a.chapter_id == c).unwrap_or(true))
        .map(|(id, assignment)| AssignmentView { id, assignment })
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AssignmentView>>> {
    let (id, assignment) = Assignment::gen_enforce(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(AssignmentView { id, assignment })))
}

async fn add_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<AddTaskRequest>,
) -> AppResult<Json<ApiResponse<AssignmentView>>> {
    principal.require_role(Role::Admin)?;
    require_title(&req.title)?;

    let (id, mut assignment) = Assignment::gen_enforce(&state.store, id).await?;
    assignment.add_task(req.title.trim().to_string(), req.description, req.due_days);
    Assignment::update(&state.store, id, &assignment).await?;

    Ok(Json(ApiResponse::ok(AssignmentView { id, assignment })))
}

async fn add_simulation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<AddSimulationRequest>,
) -> AppResult<Json<ApiResponse<AssignmentView>>> {
    principal.require_role(Role::Admin)?;
    if req.kind.trim().is_empty() {
        return Err(AppError::Validation("kind is required".to_string()));
    }

    let (id, mut assignment) = Assignment::gen_enforce(&state.store, id).await?;
    assignment.add_simulation(req.kind.trim().to_string(), req.config);
    Assignment::update(&state.store, id, &assignment).await?;

    Ok(Json(ApiResponse::ok(AssignmentView { id, assignment })))
}

async fn add_assignment_question_set(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<AddQuestionSetRequest>,
) -> AppResult<Json<ApiResponse<AssignmentView>>> {
    principal.require_role(Role::Admin)?;
    require_title(&req.title)?;

    let (id, mut assignment) = Assignment::gen_enforce(&state.store, id).await?;
    assignment.add_question_set(req.title.trim().to_string(), req.questions);
    Assignment::update(&state.store, id, &assignment).await?;

    Ok(Json(ApiResponse::ok(AssignmentView { id, assignment })))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    principal.require_role(Role::Admin)?;
    Assignment::delete(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// --- case studies ---

async fn create_case_study(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CaseStudyView>>)> {
    principal.require_role(Role::Admin)?;
    require_title(&req.title)?;

    let case_study = CaseStudy::new(req.chapter_id, req.title.trim().to_string());
    let id = CaseStudy::create(&state.store, &case_study).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CaseStudyView { id, case_study })),
    ))
}

async fn list_case_studies(
    State(state): State<AppState>,
    Query(filter): Query<ChapterFilter>,
) -> AppResult<Json<ApiResponse<Vec<CaseStudyView>>>> {
    let case_studies = CaseStudy::gen_all(&state.store, None).await?;
    let views = case_studies
        .into_iter()
        .filter(|(_, c)| filter.chapter_id.map(|f| c.chapter_id == f).unwrap_or(true))
        .map(|(id, case_study)| CaseStudyView { id, case_study })
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_case_study(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CaseStudyView>>> {
    let (id, case_study) = CaseStudy::gen_enforce(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(CaseStudyView { id, case_study })))
}

async fn add_content_block(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<AddContentBlockRequest>,
) -> AppResult<Json<ApiResponse<CaseStudyView>>> {
    principal.require_role(Role::Admin)?;
    if req.kind.trim().is_empty() || req.body.trim().is_empty() {
        return Err(AppError::Validation("kind and body are required".to_string()));
    }

    let (id, mut case_study) = CaseStudy::gen_enforce(&state.store, id).await?;
    case_study.add_content_block(req.kind.trim().to_string(), req.body);
    CaseStudy::update(&state.store, id, &case_study).await?;

    Ok(Json(ApiResponse::ok(CaseStudyView { id, case_study })))
}

async fn add_case_study_question_set(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<AddQuestionSetRequest>,
) -> AppResult<Json<ApiResponse<CaseStudyView>>> {
    principal.require_role(Role::Admin)?;
    require_title(&req.title)?;

    let (id, mut case_study) = CaseStudy::gen_enforce(&state.store, id).await?;
    case_study.add_question_set(req.title.trim().to_string(), req.questions);
    CaseStudy::update(&state.store, id, &case_study).await?;

    Ok(Json(ApiResponse::ok(CaseStudyView { id, case_study })))
}

async fn delete_case_study(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    principal.require_role(Role::Admin)?;
    CaseStudy::delete(&state.store, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/assignments",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/api/assignments/{id}",
            get(get_assignment).delete(delete_assignment),
        )
        .route("/api/assignments/{id}/tasks", post(add_task))
        .route("/api/assignments/{id}/simulations", post(add_simulation))
        .route(
            "/api/assignments/{id}/question-sets",
            post(add_assignment_question_set),
        )
        .route(
            "/api/case-studies",
            get(list_case_studies).post(create_case_study),
        )
        .route(
            "/api/case-studies/{id}",
            get(get_case_study).delete(delete_case_study),
        )
        .route(
            "/api/case-studies/{id}/content-blocks",
            post(add_content_block),
        )
        .route(
            "/api/case-studies/{id}/question-sets",
            post(add_case_study_question_set),
        )
}
