//! Coffee shops API routes
//!
//! This module wires up the coffee shops domain to HTTP routes.

use axum::Router;
use domain_coffee_shops::{CoffeeShopService, MongoCoffeeShopRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Create coffee shops router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoCoffeeShopRepository::new(state.db.clone());

    // Create the service
    let service = CoffeeShopService::new(Arc::new(repository));

    // Return the domain's router
    handlers::router(service)
}
