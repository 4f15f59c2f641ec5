// Institute backend - course catalog, approval-gated registration,
// kit orders, carts, and tax simulation services

pub mod app_state;
pub mod auth;
pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod simulation;
pub mod store;

// Re-exports for convenience
pub use error::{AppError, AppResult};
