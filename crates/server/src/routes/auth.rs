use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use service::auth::{
    domain::LoginInput,
    repo::SeaOrmAdminRepository,
    service::{AuthService, AuthSettings},
};

use crate::errors::{ApiError, AppJson};

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for ServerAuthConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), token_ttl_hours: cfg.token_ttl_hours }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn auth_service(&self) -> AuthService<SeaOrmAdminRepository> {
        let repo = Arc::new(SeaOrmAdminRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthSettings { jwt_secret: self.auth.jwt_secret.clone(), token_ttl_hours: self.auth.token_ttl_hours },
        )
    }
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub message: &'static str,
    pub token: String,
    pub username: String,
    pub expires_at: i64,
}

#[utoipa::path(
    post, path = "/login-admin", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth_service().login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(LoginOutput {
            message: "login success",
            token: session.token,
            username: session.admin.username,
            expires_at: session.expires_at,
        }),
    ))
}

/// `GET /login-admin` never authenticates.
pub async fn login_rejected() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "status": "UNAUTHORIZED", "message": "invalid username or password" })),
    )
}

fn is_public(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS
        || path == "/health"
        || path == "/login-admin"
        || path == "/test/public"
        || path.starts_with("/api-docs")
}

/// Bearer header first, then the login cookie.
fn extract_token(req: &Request) -> Result<Option<String>, ApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(ApiError::Unauthorized("invalid Authorization header, expected Bearer token".into())),
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

/// Rejects non-public requests without a valid admin token and stores the
/// verified claims in request extensions.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    if is_public(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let token = match extract_token(&req)? {
        Some(t) => t,
        None => {
            warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(ApiError::Unauthorized("missing admin token".into()));
        }
    };
    let claims = state.auth_service().verify(&token).map_err(|_| {
        warn!(path = %path, "admin token rejected");
        ApiError::Unauthorized("invalid or expired admin token".into())
    })?;
    info!(path = %path, admin = %claims.sub, "admin request");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_bypass_guard() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::POST, "/login-admin"));
        assert!(is_public(&Method::GET, "/test/public"));
        assert!(is_public(&Method::GET, "/api-docs/openapi.json"));
        assert!(is_public(&Method::OPTIONS, "/problem"));
        assert!(!is_public(&Method::GET, "/problem"));
        assert!(!is_public(&Method::GET, "/test/1"));
    }

    #[test]
    fn non_bearer_header_is_rejected() {
        let req = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(extract_token(&req).is_err());
    }

    #[test]
    fn cookie_is_used_without_header() {
        let req = axum::http::Request::builder()
            .header(header::COOKIE, "theme=dark; auth_token=abc.def")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_token(&req).unwrap().as_deref(), Some("abc.def"));
    }
}
