//! HTTP-level tests for the coffee shops router.
//!
//! Runs the full extractor/handler/service stack against the in-memory
//! repository, no database required.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use domain_coffee_shops::{
    CoffeeShopService, InMemoryCoffeeShopRepository, handlers,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (Router, CoffeeShopService<InMemoryCoffeeShopRepository>) {
    let repository = Arc::new(InMemoryCoffeeShopRepository::new());
    let service = CoffeeShopService::new(repository);
    (handlers::router(service.clone()), service)
}

fn shop_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "12 Harbor St",
        "rating": 4.5,
        "products": [
            { "name": "Espresso", "description": "double shot", "price": 2.5, "category": "coffee" },
            { "name": "Croissant", "price": 3.0, "category": "food" },
            { "name": "Lemonade", "price": 2.0, "category": "drinks" }
        ]
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_create_returns_201_and_shop_is_retrievable() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "POST", "/", Some(shop_payload("Bluebird Cafe"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Bluebird Cafe");
    assert_eq!(body["favorite"], false);
    assert_eq!(body["products"].as_array().unwrap().len(), 3);
    assert_eq!(body["products"][0]["description"], "double shot");
    assert!(body["products"][1].get("description").is_none());

    let id = body["_id"].as_str().unwrap().to_string();
    let (status, fetched) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["_id"], id.as_str());
    assert_eq!(fetched["name"], "Bluebird Cafe");
}

#[tokio::test]
async fn test_create_trims_name_and_address() {
    let (app, _) = test_app();

    let mut payload = shop_payload("  Roast House  ");
    payload["address"] = json!(" 5 Dock Rd ");

    let (status, body) = send(&app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Roast House");
    assert_eq!(body["address"], "5 Dock Rd");
}

#[tokio::test]
async fn test_create_keeps_and_trims_product_description() {
    let (app, _) = test_app();

    let mut payload = shop_payload("Bluebird Cafe");
    payload["products"][0]["description"] = json!("  double shot  ");

    let (status, body) = send(&app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["products"][0]["description"], "double shot");

    let id = body["_id"].as_str().unwrap().to_string();
    let (_, fetched) = send(&app, "GET", &format!("/{id}/products/coffee"), None).await;
    assert_eq!(fetched[0]["description"], "double shot");
}

#[tokio::test]
async fn test_create_with_out_of_range_rating_returns_400() {
    let (app, _) = test_app();

    let mut payload = shop_payload("Bad Rating");
    payload["rating"] = json!(7.5);

    let (status, body) = send(&app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["rating"].is_array());

    // Nothing was persisted
    let (_, shops) = send(&app, "GET", "/", None).await;
    assert!(shops.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_blank_name_returns_400() {
    let (app, _) = test_app();

    let (status, _) = send(&app, "POST", "/", Some(shop_payload("   "))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_missing_name_returns_400() {
    let (app, _) = test_app();

    let payload = json!({ "address": "12 Harbor St", "rating": 4.0 });
    let (status, body) = send(&app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_with_unknown_category_is_rejected() {
    let (app, _) = test_app();

    let payload = json!({
        "name": "Tea Corner",
        "address": "9 Leaf St",
        "rating": 3.5,
        "products": [{ "name": "Oolong", "price": 4.0, "category": "tea" }]
    });
    let (status, _) = send(&app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_literal() {
    let (app, service) = test_app();

    for name in ["Bluebird Cafe", "BLUE MOUNTAIN", "Redstone"] {
        let payload = shop_payload(name);
        let input = serde_json::from_value(payload).unwrap();
        service.create(input).await.unwrap();
    }

    let (status, body) = send(&app, "GET", "/search?q=blue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Regex metacharacters match literally, not as wildcards
    let (status, body) = send(&app, "GET", "/search?q=.*", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // No term matches everything
    let (status, body) = send(&app, "GET", "/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_with_unknown_id_returns_404() {
    let (app, _) = test_app();

    let id = uuid::Uuid::now_v7();
    let (status, body) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_with_malformed_id_returns_404() {
    let (app, _) = test_app();

    let (status, _) = send(&app, "GET", "/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_favorite_updates_flag_and_persists() {
    let (app, _) = test_app();

    let (_, created) = send(&app, "POST", "/", Some(shop_payload("Bluebird Cafe"))).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{id}/favorite"),
        Some(json!({ "favorite": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorite"], true);
    assert_eq!(body["name"], "Bluebird Cafe");
    assert_eq!(body["rating"], 4.5);

    let (_, fetched) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(fetched["favorite"], true);

    // And back off again
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{id}/favorite"),
        Some(json!({ "favorite": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorite"], false);
}

#[tokio::test]
async fn test_set_favorite_on_unknown_shop_returns_404() {
    let (app, _) = test_app();

    let id = uuid::Uuid::now_v7();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/{id}/favorite"),
        Some(json!({ "favorite": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_products_filtered_by_category() {
    let (app, _) = test_app();

    let (_, created) = send(&app, "POST", "/", Some(shop_payload("Bluebird Cafe"))).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/{id}/products/coffee"), None).await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Espresso");

    // Unknown category is an empty list, not an error
    let (status, body) = send(&app, "GET", &format!("/{id}/products/tea"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_products_for_unknown_shop_returns_404() {
    let (app, _) = test_app();

    let id = uuid::Uuid::now_v7();
    let (status, _) = send(&app, "GET", &format!("/{id}/products/coffee"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
