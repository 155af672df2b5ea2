use axum::http::StatusCode;
use serde_json::json;

mod helpers;
use helpers::{get, make_login_app, post_json, post_raw};

#[tokio::test]
async fn login_with_seeded_account() {
    let app = make_login_app();
    let (status, body) = post_json(
        &app,
        "/api/login",
        json!({ "account": "test", "password": "123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().unwrap().starts_with("token_1_"));
    assert_eq!(body["user"], json!({ "id": 1, "name": "测试用户", "account": "test" }));
}

#[tokio::test]
async fn login_failures() {
    let app = make_login_app();

    let (status, body) = post_json(
        &app,
        "/api/login",
        json!({ "account": "test", "password": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = post_json(&app, "/api/login", json!({ "account": "test" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_and_fetch() {
    let app = make_login_app();

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "account": "amy", "password": "pw", "name": "Amy" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], 4);

    let (status, body) = get(&app, "/api/user/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["account"], "amy");

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "account": "amy", "password": "pw", "name": "Amy" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_users_and_routes() {
    let app = make_login_app();

    let (status, _) = get(&app, "/api/user/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/user/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = get(&app, "/api/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_bodies_keep_the_success_envelope() {
    let app = make_login_app();

    let (status, body) = post_raw(&app, "/api/login", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = post_json(&app, "/api/register", json!({ "account": ["amy"], "password": "pw", "name": "Amy" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
