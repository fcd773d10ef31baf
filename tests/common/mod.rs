#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use cashtrackr::config::Config;
use cashtrackr::mailer::LogMailer;
use cashtrackr::{rest, AppState};

const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

/// Builds the full router over a fresh in-memory database, with the
/// test-mode token side channel enabled.
pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        port: 0,
        frontend_url: "http://localhost:5173".to_string(),
        expose_tokens: true,
    };
    let mailer = Arc::new(LogMailer {
        frontend_url: config.frontend_url.clone(),
    });
    rest::router(AppState::new(pool, config, mailer))
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn post(app: &Router, uri: &str, session: Option<&str>, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, session, Some(body)).await
}

pub async fn get(app: &Router, uri: &str, session: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::GET, uri, session, None).await
}

/// Registers and confirms an account, returning a session token for it.
pub async fn signup(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = post(
        app,
        "/auth/create-account",
        None,
        json!({ "name": name, "email": email, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create-account: {body}");
    let code = body["token"].as_str().unwrap().to_string();

    let (status, body) = post(app, "/auth/confirm-account", None, json!({ "token": code })).await;
    assert_eq!(status, StatusCode::OK, "confirm-account: {body}");

    let (status, body) = post(
        app,
        "/auth/login",
        None,
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login: {body}");
    body["token"].as_str().unwrap().to_string()
}
