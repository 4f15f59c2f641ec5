// REST API surface - resourceful routers over the document store

use axum::{middleware, Router};
use serde::Serialize;

use crate::app_state::AppState;
use crate::auth::middleware::auth_middleware;

pub mod admin;
pub mod assignments;
pub mod carts;
pub mod centers;
pub mod companies;
pub mod content;
pub mod courses;
pub mod orders;
pub mod simulations;
pub mod uploads;

/// Standard JSON envelope: `{ success, data, error? }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Assemble the full API router. Public routes (registration, login,
/// catalog, carts, simulations, site content reads) are open; everything
/// else sits behind the token-cookie middleware.
pub fn api_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(admin::public_routes())
        .merge(centers::public_routes())
        .merge(companies::public_routes())
        .merge(courses::public_routes())
        .merge(carts::routes())
        .merge(content::public_routes())
        .merge(simulations::routes());

    let protected = Router::new()
        .merge(centers::admin_routes())
        .merge(companies::admin_routes())
        .merge(courses::admin_routes())
        .merge(orders::routes())
        .merge(assignments::routes())
        .merge(content::admin_routes())
        .merge(carts::admin_routes())
        .merge(uploads::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}
