use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CoffeeShopResult;
use crate::models::{
    CoffeeShop, CreateCoffeeShop, CreateProduct, Product, ProductCategory, SearchQuery,
    SetFavorite,
};
use crate::repository::CoffeeShopRepository;
use crate::service::CoffeeShopService;

/// OpenAPI documentation for the Coffee Shops API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_coffee_shops,
        create_coffee_shop,
        search_coffee_shops,
        get_coffee_shop,
        set_favorite,
        products_by_category,
    ),
    components(
        schemas(
            CoffeeShop,
            CreateCoffeeShop,
            CreateProduct,
            Product,
            ProductCategory,
            SetFavorite
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Coffee Shops", description = "Coffee shop management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the coffee shops router with all HTTP endpoints
pub fn router<R: CoffeeShopRepository + 'static>(service: CoffeeShopService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_coffee_shops).post(create_coffee_shop))
        .route("/search", get(search_coffee_shops))
        .route("/{id}", get(get_coffee_shop))
        .route("/{id}/favorite", put(set_favorite))
        .route("/{id}/products/{category}", get(products_by_category))
        .with_state(shared_service)
}

/// List all coffee shops
#[utoipa::path(
    get,
    path = "",
    tag = "Coffee Shops",
    responses(
        (status = 200, description = "List of coffee shops", body = Vec<CoffeeShop>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_coffee_shops<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
) -> CoffeeShopResult<Json<Vec<CoffeeShop>>> {
    let shops = service.list().await?;
    Ok(Json(shops))
}

/// Create a new coffee shop
#[utoipa::path(
    post,
    path = "",
    tag = "Coffee Shops",
    request_body = CreateCoffeeShop,
    responses(
        (status = 201, description = "Coffee shop created successfully", body = CoffeeShop),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_coffee_shop<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCoffeeShop>,
) -> CoffeeShopResult<impl IntoResponse> {
    let shop = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// Search coffee shops by name
///
/// The term is matched case-insensitively as a literal substring.
/// Without a term, every shop is returned.
#[utoipa::path(
    get,
    path = "/search",
    tag = "Coffee Shops",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching coffee shops", body = Vec<CoffeeShop>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_coffee_shops<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
    Query(query): Query<SearchQuery>,
) -> CoffeeShopResult<Json<Vec<CoffeeShop>>> {
    let shops = service.search(query.q.as_deref().unwrap_or("")).await?;
    Ok(Json(shops))
}

/// Get a coffee shop by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Coffee Shops",
    params(
        ("id" = String, Path, description = "Coffee shop ID")
    ),
    responses(
        (status = 200, description = "Coffee shop found", body = CoffeeShop),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_coffee_shop<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
    Path(id): Path<String>,
) -> CoffeeShopResult<Json<CoffeeShop>> {
    let shop = service.get(&id).await?;
    Ok(Json(shop))
}

/// Set the favorite flag on a coffee shop
#[utoipa::path(
    put,
    path = "/{id}/favorite",
    tag = "Coffee Shops",
    params(
        ("id" = String, Path, description = "Coffee shop ID")
    ),
    request_body = SetFavorite,
    responses(
        (status = 200, description = "Favorite flag updated", body = CoffeeShop),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn set_favorite<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<SetFavorite>,
) -> CoffeeShopResult<Json<CoffeeShop>> {
    let shop = service.set_favorite(&id, body.favorite).await?;
    Ok(Json(shop))
}

/// List a shop's products in one category
#[utoipa::path(
    get,
    path = "/{id}/products/{category}",
    tag = "Coffee Shops",
    params(
        ("id" = String, Path, description = "Coffee shop ID"),
        ("category" = String, Path, description = "Product category (coffee, food, drinks)")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<R: CoffeeShopRepository>(
    State(service): State<Arc<CoffeeShopService<R>>>,
    Path((id, category)): Path<(String, String)>,
) -> CoffeeShopResult<Json<Vec<Product>>> {
    let products = service.products_by_category(&id, &category).await?;
    Ok(Json(products))
}
