//! Readiness endpoint plus the request-id and CORS layers around the catalog routes.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_ok_when_catalog_tables_exist(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["schema"], json!({"categories": true, "products": true}));
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_when_a_table_is_missing(pool: PgPool) {
    sqlx::query("DROP TABLE products").execute(&pool).await.unwrap();

    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["schema"]["categories"], true);
    assert_eq!(json["schema"]["products"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_unavailable_without_a_database(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["status"], "unavailable");
    assert_eq!(json["schema"], Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn caller_request_id_is_echoed_on_error_responses(pool: PgPool) {
    let request = Request::builder()
        .uri("/api/v1/products/missing")
        .header("x-request-id", "catalog-req-42")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "catalog-req-42"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generated_request_id_is_a_uuid(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/categories").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id should be set")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_patch_on_products(pool: PgPool) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/products")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PATCH")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"), "got: {methods}");
}
