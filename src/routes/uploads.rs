// File uploads - multipart fields persisted under the uploads directory

use axum::{
    extract::{Extension, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use std::path::Path as FsPath;
use uuid::Uuid;

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::Principal;
use crate::error::{AppError, AppResult};

/// Multipart field names accepted for upload.
const ALLOWED_FIELDS: [&str; 3] = ["document", "profileImage", "paymentScreenshot"];

/// Persist one uploaded file under `dir` with a generated name; returns the
/// stored relative path.
pub async fn save_upload(dir: &str, original_name: &str, bytes: &[u8]) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let ext = FsPath::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let stored = format!("{}/{}.{}", dir, Uuid::new_v4(), ext);

    tokio::fs::write(&stored, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    Ok(stored)
}

#[derive(Debug, serde::Serialize)]
pub struct UploadView {
    pub field: String,
    pub path: String,
}

/// Accepts `document`, `profileImage` and `paymentScreenshot` fields and
/// stores each to disk. The caller records the returned path on the owning
/// document (center/company profile update, checkout, ...).
async fn upload(
    State(state): State<AppState>,
    Extension(_principal): Extension<Principal>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Vec<UploadView>>>)> {
    let mut stored = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if !ALLOWED_FIELDS.contains(&name.as_str()) {
            return Err(AppError::Validation(format!(
                "Unexpected upload field '{}'",
                name
            )));
        }

        let original = field.file_name().unwrap_or("upload.bin").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let path = save_upload(&state.config.uploads.dir, &original, &bytes).await?;
        stored.push(UploadView { field: name, path });
    }

    if stored.is_empty() {
        return Err(AppError::Validation("No files in request".to_string()));
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(stored))))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/uploads", post(upload))
}
