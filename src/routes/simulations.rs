// Stateless simulation endpoints - wizard step definitions and tax math.
// Intermediate wizard state never touches the store; it lives with the
// client exactly as it did in the original forms.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::simulation::{
    compute_invoice, compute_tds, e_invoice, gst_registration, is_valid, tds_certificate,
    FieldKind, GstInvoice, TaxBreakdown, TdsInput, TdsResult, WizardStep,
};

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

async fn wizard_steps(
    Path(kind): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<WizardStep>>>> {
    let wizard = match kind.as_str() {
        "gst-registration" => gst_registration(),
        "e-invoice" => e_invoice(),
        "tds-certificate" => tds_certificate(),
        other => {
            return Err(AppError::NotFound(format!(
                "Unknown simulation '{}'",
                other
            )))
        }
    };

    Ok(Json(ApiResponse::ok(wizard.steps().to_vec())))
}

async fn compute_gst(
    State(_state): State<AppState>,
    Json(invoice): Json<GstInvoice>,
) -> AppResult<Json<ApiResponse<TaxBreakdown>>> {
    let breakdown = compute_invoice(&invoice)?;
    Ok(Json(ApiResponse::ok(breakdown)))
}

async fn compute_tds_handler(
    State(_state): State<AppState>,
    Json(input): Json<TdsInput>,
) -> AppResult<Json<ApiResponse<TdsResult>>> {
    let result = compute_tds(&input)?;
    Ok(Json(ApiResponse::ok(result)))
}

async fn validate_field(
    Json(req): Json<ValidateRequest>,
) -> Json<ApiResponse<ValidateResponse>> {
    Json(ApiResponse::ok(ValidateResponse {
        valid: is_valid(req.kind, &req.value),
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/simulations/{kind}/steps", get(wizard_steps))
        .route("/api/simulations/gst/compute", post(compute_gst))
        .route("/api/simulations/tds/compute", post(compute_tds_handler))
        .route("/api/simulations/validate", post(validate_field))
}
