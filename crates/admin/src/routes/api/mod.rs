//! API route handlers.
//!
//! JSON endpoints for product CRUD and session preferences.

pub mod preferences;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(preferences::router())
}
