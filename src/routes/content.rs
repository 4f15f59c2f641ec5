// Site content documents - read publicly, replaced wholesale by admins

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use tracing::info;

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::ContentDocument;

/// Slugs the dashboard manages.
const KNOWN_SLUGS: [&str; 3] = ["about-us", "footer", "digital-hub"];

fn check_slug(slug: &str) -> AppResult<()> {
    if KNOWN_SLUGS.contains(&slug) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Unknown content slug '{}'", slug)))
    }
}

async fn get_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ContentDocument>>> {
    check_slug(&slug)?;

    let (_, doc) = ContentDocument::find_by_key(&state.store, "slug", &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No content for '{}'", slug)))?;

    Ok(Json(ApiResponse::ok(doc)))
}

/// PUT replaces the whole document; there is no partial merge.
async fn put_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<ContentDocument>>> {
    principal.require_role(Role::Admin)?;
    check_slug(&slug)?;

    let doc = ContentDocument {
        slug: slug.clone(),
        body,
    };

    match ContentDocument::find_by_key(&state.store, "slug", &slug).await? {
        Some((id, _)) => ContentDocument::update(&state.store, id, &doc).await?,
        None => {
            ContentDocument::create(&state.store, &doc).await?;
        }
    }
    info!("Content document '{}' replaced", slug);

    Ok(Json(ApiResponse::ok(doc)))
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/content/{slug}", get(get_content))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/api/admin/content/{slug}", put(put_content))
}
