use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Coffee shop domain errors
#[derive(Debug, Error)]
pub enum CoffeeShopError {
    /// Shop not found (the string is whatever identifier the caller sent)
    #[error("Coffee shop not found: {0}")]
    NotFound(String),

    /// Input failed domain validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend failure
    #[error("Database error: {0}")]
    Database(String),
}

pub type CoffeeShopResult<T> = Result<T, CoffeeShopError>;

impl From<mongodb::error::Error> for CoffeeShopError {
    fn from(err: mongodb::error::Error) -> Self {
        CoffeeShopError::Database(err.to_string())
    }
}

/// Map domain errors to the shared API error type.
///
/// Identifiers that do not resolve to a shop map to 404, never to a
/// generic server error.
impl From<CoffeeShopError> for AppError {
    fn from(err: CoffeeShopError) -> Self {
        match err {
            CoffeeShopError::NotFound(id) => {
                AppError::NotFound(format!("Coffee shop {id} not found"))
            }
            CoffeeShopError::Validation(msg) => AppError::BadRequest(msg),
            CoffeeShopError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for CoffeeShopError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
