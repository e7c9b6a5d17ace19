#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use pickup_api::auth::jwt::{generate_access_token, JwtConfig};
use pickup_api::config::ServerConfig;
use pickup_api::router::build_app_router;
use pickup_api::state::AppState;
use pickup_core::types::DbId;
use pickup_db::models::driver::{Driver, DriverInput};
use pickup_db::models::status::UserRole;
use pickup_db::models::user::{CreateUser, User};
use pickup_db::repositories::{DriverRepo, UserRepo};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and flight sync disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        lock_timeout_ms: 2_000,
        flight_api_url: None,
        flight_sync_interval_secs: 1800,
        jwt: JwtConfig {
            secret: "pickup-api-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack the binary uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, Arc::new(config.clone()));
    build_app_router(state, &config)
}

/// A bearer token for `user_id` carrying `role`, signed with the test secret.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, open_id: &str, role: UserRole) -> User {
    let input = CreateUser {
        open_id: open_id.to_string(),
        name: open_id.to_string(),
        phone: None,
        role: Some(role),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// Seed a user and return it together with a token for its role.
pub async fn seed_user_with_token(
    pool: &PgPool,
    open_id: &str,
    role: UserRole,
) -> (User, String) {
    let user = seed_user(pool, open_id, role).await;
    let token = token_for(user.id, role.as_str());
    (user, token)
}

pub async fn seed_driver(pool: &PgPool, seats: i32, checked: i32, carry_on: i32) -> Driver {
    let input = DriverInput {
        name: "Chen".to_string(),
        car_model: "Previa".to_string(),
        max_seats: seats,
        max_checked: checked,
        max_carry_on: carry_on,
    };
    DriverRepo::create(pool, &input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Requests
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
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
