//! Coffee Shops Domain
//!
//! This module provides a complete domain implementation for managing coffee
//! shops and their product lists using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, id resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_coffee_shops::{
//!     handlers,
//!     mongodb::MongoCoffeeShopRepository,
//!     service::CoffeeShopService,
//! };
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("coffee");
//!
//! // Create a repository and service
//! let repository = MongoCoffeeShopRepository::new(db);
//! let service = CoffeeShopService::new(Arc::new(repository));
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CoffeeShopError, CoffeeShopResult};
pub use handlers::ApiDoc;
pub use models::{
    CoffeeShop, CreateCoffeeShop, CreateProduct, Product, ProductCategory, SearchQuery,
    SetFavorite,
};
pub use mongodb::MongoCoffeeShopRepository;
pub use repository::{CoffeeShopRepository, InMemoryCoffeeShopRepository};
pub use service::CoffeeShopService;
