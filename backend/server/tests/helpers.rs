#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use server::{app, config::Config, login::LoginState, login_app, state::AppState};
use tower::ServiceExt; // oneshot()

pub const CONTENT_COUNT: usize = 23;

pub fn test_config() -> Config {
    Config {
        bcrypt_cost: 4,
        content_count: CONTENT_COUNT,
        content_seed: Some(7),
        ..Config::default()
    }
}

pub fn make_app() -> Router {
    app(AppState::new(test_config()).unwrap())
}

pub fn make_app_with_state() -> (Router, Arc<AppState>) {
    let state = AppState::new(test_config()).unwrap();
    (app(state.clone()), state)
}

pub fn make_login_app() -> Router {
    login_app(LoginState::new())
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, json_request("POST", uri, body, None)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    send(app, json_request("PUT", uri, body, Some(token))).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    send(app, json_request("POST", uri, body, Some(token))).await
}

/// Raw body, with a `Content-Type` only when one is given.
pub async fn post_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::post(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// Logs the seeded demo account in and returns its token.
pub async fn demo_token(app: &Router) -> String {
    let (status, body) = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "username": "demo", "password": "password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["data"]["token"].as_str().unwrap().to_string()
}
