#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, auth};

pub const SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over a fresh in-memory database with admin `root` / `password123`.
pub async fn build_app() -> anyhow::Result<Router> {
    let db = models::db::connect_single("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret: SECRET.into(), token_ttl_hours: 1 },
    };
    state.auth_service().ensure_admin("root", "password123").await?;
    Ok(routes::build_router(state, cors()))
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<Reply> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    send_request(app, req).await
}

pub async fn send_request(app: &Router, req: Request<Body>) -> anyhow::Result<Reply> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok(Reply { status, set_cookie, headers, body })
}

pub async fn login(app: &Router) -> anyhow::Result<String> {
    let reply = send(
        app,
        Method::POST,
        "/login-admin",
        None,
        Some(json!({"username": "root", "password": "password123"})),
    )
    .await?;
    assert_eq!(reply.status, StatusCode::OK);
    let token = reply.body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());
    Ok(token)
}

pub fn problem_body(level: &str, problem_type: &str, topics: &[&str]) -> Value {
    json!({
        "level": level,
        "content": "2+2=?",
        "problem_type": problem_type,
        "answer": "4",
        "first_option": "4",
        "second_option": "5",
        "topics": topics,
        "explanation": "two plus two"
    })
}
