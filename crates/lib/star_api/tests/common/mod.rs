//! Shared helpers for router tests: in-memory state and request plumbing.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use star_api::{AppState, config::ApiConfig};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-do-not-use-in-prod";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        jwt_secret: TEST_SECRET.into(),
        bcrypt_cost: 4,
    }
}

pub fn app() -> Router {
    let state = AppState::in_memory(test_config()).expect("in-memory state");
    star_api::router(state)
}

/// Send a request through the router and return status plus parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

/// Register a user and return the issued token.
pub async fn register_token(app: &Router, email: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({"email": email, "password": "pass1234"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["token"].as_str().expect("token").to_string()
}
