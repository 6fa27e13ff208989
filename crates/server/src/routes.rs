use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, Method, Response, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, TraceLayer},
};
use tracing::{info, warn, Level, Span};
use utoipa::OpenApi;

use common::types::{Health, StatusOk};

use crate::openapi::ApiDoc;

pub mod auth;
pub mod collection;
pub mod packets;
pub mod problems;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Every `OPTIONS` request answers `{"status":"ok"}`. Sits outside the CORS
/// layer, which answers them as preflights with an empty body; its
/// `access-control-*` headers are kept.
async fn answer_options(req: Request, next: Next) -> axum::response::Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }
    let (mut parts, _) = next.run(req).await.into_parts();
    let (json_parts, body) = Json(StatusOk::default()).into_response().into_parts();
    parts.status = StatusCode::OK;
    parts.headers.remove(header::CONTENT_LENGTH);
    if let Some(ct) = json_parts.headers.get(header::CONTENT_TYPE) {
        parts.headers.insert(header::CONTENT_TYPE, ct.clone());
    }
    axum::response::Response::from_parts(parts, body)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// 200 responses log at INFO, everything else at WARN.
fn log_response<B>(res: &Response<B>, latency: Duration, _span: &Span) {
    let status = res.status();
    let latency_ms = latency.as_millis() as u64;
    if status == StatusCode::OK {
        info!(status = status.as_u16(), latency_ms, "request_log");
    } else {
        warn!(status = status.as_u16(), latency_ms, "request_log");
    }
}

/// Build the full application router: public endpoints, admin resources
/// behind the token guard, CORS and request tracing.
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    let problem_routes = Router::new()
        .route("/problem", get(problems::list).post(problems::create))
        .route("/problem/topics", get(problems::topics))
        .route(
            "/problem/:id",
            get(problems::get).put(problems::update).delete(problems::delete),
        )
        .route("/problem-collection", get(collection::browse));

    let packet_routes = Router::new()
        .route("/test", get(packets::list).post(packets::create))
        .route("/test/public", get(packets::list_public))
        .route(
            "/test/:id",
            get(packets::get).put(packets::update).delete(packets::delete),
        );

    let public = Router::new()
        .route("/health", get(health))
        .route(
            "/login-admin",
            get(auth::login_rejected).post(auth::login),
        )
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(problem_routes)
        .merge(packet_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_admin))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(answer_options))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(log_response),
        )
}
