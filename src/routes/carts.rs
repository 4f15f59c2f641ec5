// Per-student carts and manual-payment checkout

use axum::{
    extract::{Extension, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use super::uploads::save_upload;
use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, Cart, CartItem, Course, PaymentProof, SessionType};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub course_id: i64,
    pub session: SessionType,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub student_id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct ProofView {
    pub id: i64,
    #[serde(flatten)]
    pub proof: PaymentProof,
}

#[derive(Debug, Deserialize)]
pub struct ResolveProofRequest {
    pub approve: bool,
    pub note: Option<String>,
}

async fn load_cart(state: &AppState, student_id: &str) -> AppResult<Option<(i64, Cart)>> {
    Cart::find_by_key(&state.store, "student_id", student_id).await
}

/// Resolve every course referenced by the cart; items whose course is gone
/// simply price to nothing.
async fn course_map(state: &AppState, cart: &Cart) -> AppResult<HashMap<i64, Course>> {
    let mut courses = HashMap::new();
    for item in &cart.items {
        if courses.contains_key(&item.course_id) {
            continue;
        }
        if let Some((id, course)) = Course::gen_nullable(&state.store, item.course_id).await? {
            courses.insert(id, course);
        }
    }
    Ok(courses)
}

async fn cart_view(state: &AppState, cart: Cart) -> AppResult<CartView> {
    let courses = course_map(state, &cart).await?;
    Ok(CartView {
        total: cart.total_price(&courses),
        student_id: cart.student_id,
        items: cart.items,
    })
}

async fn get_cart(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let cart = match load_cart(&state, &student_id).await? {
        Some((_, cart)) => cart,
        None => Cart::new(student_id),
    };
    Ok(Json(ApiResponse::ok(cart_view(&state, cart).await?)))
}

async fn add_item(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    if req.quantity == 0 {
        return Err(AppError::Validation("quantity must be positive".to_string()));
    }
    // The course must exist to be added, even though pricing re-resolves later
    Course::gen_enforce(&state.store, req.course_id).await?;

    let item = CartItem {
        course_id: req.course_id,
        session: req.session,
        quantity: req.quantity,
    };

    let cart = match load_cart(&state, &student_id).await? {
        Some((id, mut cart)) => {
            cart.add_item(item);
            Cart::update(&state.store, id, &cart).await?;
            cart
        }
        None => {
            let mut cart = Cart::new(student_id);
            cart.add_item(item);
            Cart::create(&state.store, &cart).await?;
            cart
        }
    };

    Ok(Json(ApiResponse::ok(cart_view(&state, cart).await?)))
}

async fn remove_item(
    State(state): State<AppState>,
    Path((student_id, course_id, session)): Path<(String, i64, SessionType)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let (id, mut cart) = load_cart(&state, &student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

    cart.remove_item(course_id, session);
    Cart::update(&state.store, id, &cart).await?;

    Ok(Json(ApiResponse::ok(cart_view(&state, cart).await?)))
}

/// Checkout: no gateway, no webhooks. The student submits a UTR and a
/// payment screenshot; both wait for manual admin reconciliation.
async fn checkout(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ProofView>>)> {
    let (cart_id, cart) = load_cart(&state, &student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

    if cart.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let mut utr: Option<String> = None;
    let mut screenshot: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "utr" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read utr: {}", e)))?;
                utr = Some(value);
            }
            "paymentScreenshot" => {
                let original = field.file_name().unwrap_or("screenshot.png").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read screenshot: {}", e))
                })?;
                screenshot = Some((original, bytes.to_vec()));
            }
            other => {
                return Err(AppError::Validation(format!(
                    "Unexpected checkout field '{}'",
                    other
                )));
            }
        }
    }

    let utr = utr
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("utr is required".to_string()))?;
    let (original, bytes) = screenshot
        .ok_or_else(|| AppError::Validation("paymentScreenshot is required".to_string()))?;

    let courses = course_map(&state, &cart).await?;
    let amount = cart.total_price(&courses);

    let screenshot_path = save_upload(&state.config.uploads.dir, &original, &bytes).await?;

    let proof = PaymentProof {
        student_id: cart.student_id.clone(),
        utr: utr.trim().to_string(),
        amount,
        screenshot_path,
        items: cart.items.clone(),
        status: ApprovalStatus::Pending,
        review_note: None,
        submitted_at: Utc::now().timestamp(),
    };
    let proof_id = PaymentProof::create(&state.store, &proof).await?;

    // Checkout empties the cart; the proof keeps the snapshot
    let mut emptied = cart;
    emptied.items.clear();
    Cart::update(&state.store, cart_id, &emptied).await?;

    info!(
        "Student {} submitted payment proof {} for {:.2} (UTR {})",
        emptied.student_id, proof_id, proof.amount, proof.utr
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ProofView {
            id: proof_id,
            proof,
        })),
    ))
}

async fn list_proofs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<ApiResponse<Vec<ProofView>>>> {
    principal.require_role(Role::Admin)?;
    let proofs = PaymentProof::gen_all(&state.store, None).await?;
    let views = proofs
        .into_iter()
        .map(|(id, proof)| ProofView { id, proof })
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn resolve_proof(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<ResolveProofRequest>,
) -> AppResult<Json<ApiResponse<ProofView>>> {
    principal.require_role(Role::Admin)?;

    let (id, mut proof) = PaymentProof::gen_enforce(&state.store, id).await?;
    let target = if req.approve {
        ApprovalStatus::Approved
    } else {
        ApprovalStatus::Rejected
    };
    proof.status = proof.status.transition(target)?;
    proof.review_note = req.note;
    PaymentProof::update(&state.store, id, &proof).await?;
    info!("Payment proof {} marked {}", id, proof.status.as_str());

    Ok(Json(ApiResponse::ok(ProofView { id, proof })))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/carts/{student_id}", get(get_cart))
        .route("/api/carts/{student_id}/items", post(add_item))
        .route(
            "/api/carts/{student_id}/items/{course_id}/{session}",
            delete(remove_item),
        )
        .route("/api/carts/{student_id}/checkout", post(checkout))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payment-proofs", get(list_proofs))
        .route("/api/payment-proofs/{id}/resolve", post(resolve_proof))
}
