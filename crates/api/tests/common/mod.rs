//! Shared helpers for API integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use roombook_api::auth::jwt::TokenConfig;
use roombook_api::auth::password::hash_password;
use roombook_api::config::ServerConfig;
use roombook_api::router::build_app_router;
use roombook_api::state::AppState;
use roombook_db::models::equipment::{CreateEquipment, Equipment};
use roombook_db::models::room::{CreateRoom, Room};
use roombook_db::models::user::{CreateUser, User};
use roombook_db::repositories::{EquipmentRepo, RoomRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sweep_interval_secs: 300,
        tokens: TokenConfig {
            secret: "integration-test-secret".to_string(),
            ttl_mins: 15,
        },
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let b = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => b.header("authorization", format!("Bearer {t}")),
        None => b,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("GET", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = builder("POST", uri, None)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = builder("POST", uri, Some(token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = builder("PUT", uri, Some(token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a body verbatim as `application/json`, valid or not.
pub async fn post_raw_json_auth(
    app: Router,
    uri: &str,
    body: &str,
    token: &str,
) -> Response<Body> {
    let request = builder("POST", uri, Some(token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("POST", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("DELETE", uri, Some(token)).body(Body::empty()).unwrap()).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with the given role name and [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.edu"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("access_token")
        .to_string()
}

/// Create a user and return their access token along with the row.
pub async fn user_with_token(
    app: &Router,
    pool: &PgPool,
    username: &str,
    role: &str,
) -> (User, String) {
    let user = create_user(pool, username, role).await;
    let token = login(app.clone(), username).await;
    (user, token)
}

pub async fn create_room(pool: &PgPool, name: &str) -> Room {
    let input = CreateRoom {
        name: name.to_string(),
        room_type: "Laboratory".to_string(),
        capacity: 40,
        is_active: Some(true),
    };
    RoomRepo::create(pool, &input).await.unwrap()
}

pub async fn create_equipment(pool: &PgPool, name: &str) -> Equipment {
    let input = CreateEquipment {
        name: name.to_string(),
        description: String::new(),
        total_quantity: 3,
    };
    EquipmentRepo::create(pool, &input).await.unwrap()
}

/// JSON body for `POST /bookings` on 2030-06-03 between the given UTC hours.
pub fn booking_body(room_id: i64, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "room_id": room_id,
        "start_time": format!("2030-06-03T{start}:00Z"),
        "end_time": format!("2030-06-03T{end}:00Z"),
        "purpose": "Thesis defense rehearsal",
    })
}
