//! # Login server
//!
//! The standalone account service the mobile client logs in against. Plain
//! text passwords and opaque `token_<id>_<millis>` tokens: it is a mock and
//! nothing verifies those tokens afterwards.
//!
//! Every response carries `success: bool` instead of the `status` string the
//! catalog server uses.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::utils::timestamp;

#[derive(Debug, Clone)]
pub struct LoginUser {
    pub id: u64,
    pub account: String,
    pub password: String,
    pub name: String,
}

impl LoginUser {
    fn new(id: u64, account: &str, password: &str, name: &str) -> Self {
        Self {
            id,
            account: account.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    fn public(&self) -> PublicUser<'_> {
        PublicUser {
            id: self.id,
            name: &self.name,
            account: &self.account,
        }
    }
}

#[derive(Debug, Serialize)]
struct PublicUser<'a> {
    id: u64,
    name: &'a str,
    account: &'a str,
}

pub struct LoginState {
    pub users: RwLock<Vec<LoginUser>>,
}

impl LoginState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            users: RwLock::new(vec![
                LoginUser::new(1, "test", "123456", "测试用户"),
                LoginUser::new(2, "admin", "admin123", "管理员"),
                LoginUser::new(3, "user1", "password", "用户1"),
            ]),
        })
    }
}

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("账号和密码不能为空")]
    MissingCredentials,

    #[error("所有字段都不能为空")]
    MissingFields,

    #[error("账号或密码错误")]
    InvalidCredentials,

    #[error("账号已存在")]
    AccountExists,

    #[error("用户不存在")]
    UserNotFound,

    #[error("接口不存在")]
    RouteNotFound,

    #[error("请求格式错误: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl LoginError {
    pub fn status(&self) -> StatusCode {
        match self {
            LoginError::MissingCredentials | LoginError::MissingFields | LoginError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::AccountExists => StatusCode::CONFLICT,
            LoginError::UserNotFound | LoginError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({ "success": false, "message": self.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: Arc<LoginState>) -> Router {
    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/register", post(register_handler))
        .route("/api/user/{id}", get(user_handler))
        .route("/api/health", get(health_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub account: Option<String>,
    pub password: Option<String>,
}

pub async fn login_handler(
    State(state): State<Arc<LoginState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, LoginError> {
    let Json(payload) = payload?;
    let (Some(account), Some(password)) = (present(payload.account), present(payload.password)) else {
        return Err(LoginError::MissingCredentials);
    };
    info!(%account, "Login request");

    let users = state.users.read().await;
    let user = users
        .iter()
        .find(|user| user.account == account && user.password == password)
        .ok_or_else(|| {
            info!(%account, "Login rejected");
            LoginError::InvalidCredentials
        })?;

    let token = format!("token_{}_{}", user.id, Utc::now().timestamp_millis());

    Ok(Json(json!({
        "success": true,
        "message": "登录成功",
        "token": token,
        "user": user.public(),
    }))
    .into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub account: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

pub async fn register_handler(
    State(state): State<Arc<LoginState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, LoginError> {
    let Json(payload) = payload?;
    let (Some(account), Some(password), Some(name)) = (
        present(payload.account),
        present(payload.password),
        present(payload.name),
    ) else {
        return Err(LoginError::MissingFields);
    };

    let mut users = state.users.write().await;
    if users.iter().any(|user| user.account == account) {
        return Err(LoginError::AccountExists);
    }

    let user = LoginUser::new(users.len() as u64 + 1, &account, &password, &name);
    info!(%account, id = user.id, "Registered");

    let response = Json(json!({
        "success": true,
        "message": "注册成功",
        "user": user.public(),
    }))
    .into_response();
    users.push(user);

    Ok(response)
}

pub async fn user_handler(
    State(state): State<Arc<LoginState>>,
    Path(id): Path<String>,
) -> Result<Response, LoginError> {
    let id: u64 = id.trim().parse().map_err(|_| LoginError::UserNotFound)?;

    let users = state.users.read().await;
    let user = users
        .iter()
        .find(|user| user.id == id)
        .ok_or(LoginError::UserNotFound)?;

    Ok(Json(json!({ "success": true, "user": user.public() })).into_response())
}

pub async fn health_handler() -> Response {
    Json(json!({
        "status": "ok",
        "message": "服务器运行正常",
        "timestamp": timestamp(),
    }))
    .into_response()
}

pub async fn not_found_handler() -> LoginError {
    LoginError::RouteNotFound
}
