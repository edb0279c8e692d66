//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of a `#[sqlx::test]`-provided pool, and provides request/seeding helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use barkpark_api::auth::jwt::JwtConfig;
use barkpark_api::config::ServerConfig;
use barkpark_api::router::build_app_router;
use barkpark_api::state::AppState;
use barkpark_core::types::DbId;
use barkpark_db::models::dog::CreateDog;
use barkpark_db::models::owner::CreateOwner;
use barkpark_db::models::user::CreateUser;
use barkpark_db::models::walk_event::CreateWalkEvent;
use barkpark_db::repositories::{DogRepo, OwnerRepo, UserRepo, WalkEventRepo};

/// Signing secret shared by [`test_config`] and [`token_for`].
const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// stack (CORS, request ID, timeout, tracing, panic recovery) that
/// production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Sign an access token for the given user, valid against [`test_config`].
pub fn token_for(user_id: DbId, role: &str) -> String {
    test_config()
        .jwt
        .sign(user_id, role)
        .expect("token signing should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn post(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, token, None).await
}

pub async fn put(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::PUT, uri, token, None).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a user with the given role, returning its id.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            role: Some(role.to_string()),
        },
    )
    .await
    .expect("user should insert")
    .id
}

/// Insert an owner profile linked to a user account, with one dog.
/// Returns `(owner_id, dog_id)`.
pub async fn seed_owner_with_dog(pool: &PgPool, user_id: DbId, tag: &str) -> (DbId, DbId) {
    let owner = OwnerRepo::create(
        pool,
        &CreateOwner {
            user_id: Some(user_id),
            name: format!("Owner {tag}"),
            email: None,
            phone: None,
        },
    )
    .await
    .expect("owner should insert");

    let dog = DogRepo::create(
        pool,
        &CreateDog {
            owner_id: owner.id,
            name: format!("Dog {tag}"),
            breed: None,
            notes: None,
        },
    )
    .await
    .expect("dog should insert");

    (owner.id, dog.id)
}

/// Insert a scheduled walk event with the given capacity, returning its id.
pub async fn seed_event(pool: &PgPool, organizer: DbId, capacity: i32) -> DbId {
    WalkEventRepo::create(
        pool,
        organizer,
        &CreateWalkEvent {
            title: "Morning pack walk".to_string(),
            description: None,
            event_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            start_time: chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            location: "Riverside park".to_string(),
            capacity,
            fee: Some(500),
        },
    )
    .await
    .expect("event should insert")
    .id
}
