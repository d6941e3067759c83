//! API routes module
//!
//! This module defines all HTTP API routes for the Coffee Shops API.

pub mod coffee_shops;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/coffee-shops", coffee_shops::router(state))
        .merge(health::router(state.clone()))
}
