//! Integration tests for the health endpoint and cross-cutting HTTP
//! behaviour (request ids, CORS, unknown routes).

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

/// `/health` answers 200 with the service status, crate version, and a
/// database reachability flag, and needs no token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/no/such/route", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Every response carries the request id assigned on the way in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_id_round_trips(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health", None).await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be set")
        .to_str()
        .expect("header should be ASCII");

    // MakeRequestUuid produces hyphenated UUIDs.
    assert_eq!(header.len(), 36);
}

/// A browser preflight from the configured dev origin is accepted with the
/// origin echoed back.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cors_preflight_allows_dev_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/walk-events")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type,authorization")
        .body(Body::empty())
        .expect("request should build");

    let response = app.oneshot(preflight).await.expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("allow-origin header should be set")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .expect("allow-methods header should be set")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST") && allow_methods.contains("DELETE"),
        "unexpected allow-methods: {allow_methods}"
    );
}
