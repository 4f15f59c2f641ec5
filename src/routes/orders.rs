// Kit orders - totals are recomputed server-side and checked against the
// center's wallet before anything persists

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiResponse;
use crate::app_state::AppState;
use crate::auth::{Principal, Role};
use crate::document::DocumentOps;
use crate::error::{AppError, AppResult};
use crate::models::{Center, KitOrder, OrderStatus};
use crate::pricing::{compute_totals, verify_totals, OrderLine, OrderTotals};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    /// Client-computed totals, if submitted; they are verified against the
    /// server recomputation and rejected on any mismatch.
    pub totals: Option<OrderTotals>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i64,
    #[serde(flatten)]
    pub order: KitOrder,
}

async fn create_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderView>>)> {
    principal.require_role(Role::Center)?;

    let totals = match &req.totals {
        Some(claimed) => verify_totals(&req.items, claimed)?,
        None => compute_totals(&req.items)?,
    };

    // Wallet check happens once, at creation
    let (center_id, center) = Center::gen_enforce(&state.store, principal.id).await?;
    if totals.payable > center.wallet_balance {
        return Err(AppError::BadRequest(format!(
            "Payable {:.2} exceeds wallet balance {:.2}",
            totals.payable, center.wallet_balance
        )));
    }

    let order = KitOrder::new(center_id, req.items, totals, Utc::now().timestamp());
    let id = KitOrder::create(&state.store, &order).await?;
    info!(
        "Center {} placed kit order {} (payable {:.2})",
        center_id, id, order.totals.payable
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(OrderView { id, order })),
    ))
}

/// Admins see every order; a center sees its own.
async fn list_orders(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let orders = KitOrder::gen_all(&state.store, None).await?;
    let views = orders
        .into_iter()
        .filter(|(_, order)| match principal.role {
            Role::Admin => true,
            Role::Center => order.center_id == principal.id,
            Role::Company => false,
        })
        .map(|(id, order)| OrderView { id, order })
        .collect();
    Ok(Json(ApiResponse::ok(views)))
}

async fn get_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let (id, order) = KitOrder::gen_enforce(&state.store, id).await?;
    let allowed = principal.role == Role::Admin
        || (principal.role == Role::Center && order.center_id == principal.id);
    if !allowed {
        return Err(AppError::Forbidden("Not allowed".to_string()));
    }
    Ok(Json(ApiResponse::ok(OrderView { id, order })))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    principal.require_role(Role::Admin)?;

    let (id, mut order) = KitOrder::gen_enforce(&state.store, id).await?;
    order.status = order.status.transition(req.status)?;
    KitOrder::update(&state.store, id, &order).await?;
    info!("Kit order {} moved to {}", id, order.status.as_str());

    Ok(Json(ApiResponse::ok(OrderView { id, order })))
}

/// A center can cancel its own order while the transition allows it.
async fn cancel_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    principal.require_role(Role::Center)?;

    let (id, mut order) = KitOrder::gen_enforce(&state.store, id).await?;
    if order.center_id != principal.id {
        return Err(AppError::Forbidden("Not allowed".to_string()));
    }
    order.status = order.status.transition(OrderStatus::Cancelled)?;
    KitOrder::update(&state.store, id, &order).await?;

    Ok(Json(ApiResponse::ok(OrderView { id, order })))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/kit-orders", get(list_orders).post(create_order))
        .route("/api/kit-orders/{id}", get(get_order))
        .route("/api/kit-orders/{id}/status", put(update_status))
        .route("/api/kit-orders/{id}/cancel", post(cancel_order))
}
