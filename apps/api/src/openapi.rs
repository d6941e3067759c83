//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee Shops API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing coffee shops and their products",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/coffee-shops", api = domain_coffee_shops::ApiDoc)
    ),
    tags(
        (name = "Coffee Shops", description = "Coffee shop management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
