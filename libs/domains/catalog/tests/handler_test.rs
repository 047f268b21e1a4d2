//! Handler tests for the Catalog domain
//!
//! These tests drive the catalog router through HTTP requests against the
//! in-memory read model loaded from `tests/fixtures/catalog.json`:
//! - Response shapes (list item / detail view)
//! - Pagination headers and Link navigation
//! - Not-found and method-not-allowed responses
//!
//! The router is mounted under `/api` the same way the service mounts it.

use axum::body::Body;
use axum::Router;
use axum::http::{Request, StatusCode, header};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const BASE_URL: &str = "http://shop.test";

async fn app() -> Router {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json");
    let catalog = Arc::new(InMemoryCatalog::load(path).await.unwrap());
    let service = CatalogService::from_shared(catalog.clone(), catalog.clone(), catalog);
    let serializer = CatalogSerializer::new(
        LinkBuilder::new(BASE_URL),
        ThumbnailResolver::new("http://shop.test/static"),
    );
    Router::new().nest("/api", handlers::router(service, serializer))
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .await
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn header_str<'a>(response: &'a axum::response::Response, name: &str) -> &'a str {
    response.headers()[name].to_str().unwrap()
}

#[tokio::test]
async fn test_list_returns_all_products_newest_first() {
    let response = get("/api/items").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-total-count"), "4");
    assert_eq!(header_str(&response, "x-pagination-page-count"), "1");
    assert_eq!(header_str(&response, "x-pagination-current-page"), "1");
    assert_eq!(header_str(&response, "x-pagination-per-page"), "20");

    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![43, 42, 41, 40]);
}

#[tokio::test]
async fn test_list_item_shape() {
    let body = json_body(get("/api/items").await.into_body()).await;
    let lamp = &body[1];

    assert_eq!(lamp["code"], "P42");
    assert_eq!(lamp["category"]["id"], 1);
    assert_eq!(
        lamp["category"]["_links"]["self"]["href"],
        "http://shop.test/api/items/category/1"
    );
    assert_eq!(lamp["price"]["new"], 1500);
    assert!(lamp["price"]["old"].is_null());
    assert!(lamp["thumbnail"].is_null());
    assert_eq!(lamp["_links"]["self"]["href"], "http://shop.test/api/items/42");
    assert_eq!(lamp["_links"]["stock"]["href"], "http://shop.test/api/cart/add/42");

    let bulb = &body[0];
    assert_eq!(bulb["price"]["old"], 450);
    assert_eq!(
        bulb["thumbnail"],
        "http://shop.test/static/cache/products/catalog_list_12.png"
    );
}

#[tokio::test]
async fn test_list_pagination_and_links() {
    let response = get("/api/items?page=2&per-page=2&sort=price").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-page-count"), "2");
    assert_eq!(header_str(&response, "x-pagination-current-page"), "2");

    let link = header_str(&response, "link").to_string();
    assert!(link.contains("<http://shop.test/api/items?page=2&per-page=2&sort=price>; rel=self"));
    assert!(link.contains("<http://shop.test/api/items?page=1&per-page=2&sort=price>; rel=prev"));
    assert!(link.contains("rel=last"));
    assert!(!link.contains("rel=next"));

    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![41, 40]);
}

#[tokio::test]
async fn test_page_past_the_end_is_clamped() {
    let response = get("/api/items?page=99&per_page=3").await;

    assert_eq!(header_str(&response, "x-pagination-current-page"), "2");
    assert_eq!(header_str(&response, "x-pagination-per-page"), "3");
    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![40]);
}

#[tokio::test]
async fn test_middle_page_links_both_ways() {
    let response = get("/api/items?page=2&per-page=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-page-count"), "4");

    let link = header_str(&response, "link").to_string();
    assert_eq!(
        link,
        "<http://shop.test/api/items?page=2&per-page=1>; rel=self, \
         <http://shop.test/api/items?page=1&per-page=1>; rel=first, \
         <http://shop.test/api/items?page=1&per-page=1>; rel=prev, \
         <http://shop.test/api/items?page=3&per-page=1>; rel=next, \
         <http://shop.test/api/items?page=4&per-page=1>; rel=last"
    );

    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![42]);
}

#[tokio::test]
async fn test_negative_page_is_clamped() {
    let response = get("/api/items?page=-1&per-page=-5").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-current-page"), "1");
    assert_eq!(header_str(&response, "x-pagination-per-page"), "1");
    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![43]);
}

#[tokio::test]
async fn test_oversized_paging_numbers_are_clamped() {
    let response = get("/api/items?page=99999999999999999999&per-page=99999999999").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-current-page"), "1");
    assert_eq!(header_str(&response, "x-pagination-per-page"), "50");
    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![43, 42, 41, 40]);
}

#[tokio::test]
async fn test_non_numeric_paging_falls_back_to_defaults() {
    let response = get("/api/items?page=abc&per-page=xyz").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-current-page"), "1");
    assert_eq!(header_str(&response, "x-pagination-per-page"), "20");
    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![43, 42, 41, 40]);
}

#[tokio::test]
async fn test_undecodable_query_is_bad_request() {
    let response = get("/api/items?sort=price&sort=name").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_by_category_includes_additional_memberships() {
    let response = get("/api/items/category/7").await;

    assert_eq!(response.status(), StatusCode::OK);
    let link = header_str(&response, "link").to_string();
    assert!(link.starts_with("<http://shop.test/api/items/category/7?page=1&per-page=20>; rel=self"));

    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![42, 41]);
}

#[tokio::test]
async fn test_list_by_empty_category_has_no_pages() {
    let response = get("/api/items/category/9").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pagination-total-count"), "0");
    assert_eq!(header_str(&response, "x-pagination-page-count"), "0");
    assert_eq!(header_str(&response, "x-pagination-current-page"), "1");
    let body = json_body(response.into_body()).await;
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn test_list_by_tag() {
    let response = get("/api/items/tag/3").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(ids(&body), vec![43, 42]);
}

#[tokio::test]
async fn test_unknown_category_tag_or_product_is_not_found() {
    for uri in [
        "/api/items/category/99",
        "/api/items/tag/99",
        "/api/items/999",
        "/api/items/abc",
        "/api/items/category/-1",
    ] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["code"], 1004, "{}", uri);
        assert_eq!(body["message"], "The requested page does not exist.", "{}", uri);
    }
}

#[tokio::test]
async fn test_view_returns_detail() {
    let response = get("/api/items/42").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-pagination-total-count").is_none());

    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], 42);
    assert_eq!(body["code"], "P42");
    assert_eq!(body["description"], "Warm light for late nights");
    assert_eq!(body["categories"]["main"]["id"], 1);

    let other: Vec<_> = body["categories"]["other"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(other, vec![7, 8]);

    assert_eq!(body["tags"][0]["name"], "sale");
    assert_eq!(
        body["tags"][0]["_links"]["self"]["href"],
        "http://shop.test/api/items/tag/3"
    );
    assert_eq!(body["price"]["new"], 1500);
    assert!(body["price"]["old"].is_null());
}

#[tokio::test]
async fn test_self_links_route_back_to_the_entity() {
    let list = json_body(get("/api/items").await.into_body()).await;

    for item in list.as_array().unwrap() {
        let href = item["_links"]["self"]["href"].as_str().unwrap();
        let path = href.strip_prefix(BASE_URL).unwrap();
        let view = json_body(get(path).await.into_body()).await;
        assert_eq!(view["id"], item["id"]);

        let href = item["category"]["_links"]["self"]["href"].as_str().unwrap();
        let path = href.strip_prefix(BASE_URL).unwrap();
        let response = get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let in_category = json_body(response.into_body()).await;
        assert!(ids(&in_category).contains(&item["id"].as_i64().unwrap()));
    }
}

#[tokio::test]
async fn test_write_methods_are_not_allowed() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
}
