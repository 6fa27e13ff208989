use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use service::{auth::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::{error, warn};

/// Every failure leaves the server as `{"message": ...}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            return ApiError::Validation(e.message());
        }
        match e {
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ApiError::Validation(m),
            AuthError::Unauthorized | AuthError::NotFound | AuthError::TokenError(_) => {
                ApiError::Unauthorized("invalid username or password".into())
            }
            AuthError::Conflict => ApiError::Validation("admin already exists".into()),
            other => {
                warn!(code = other.code(), "auth failure");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// A `Json<T>` wrapper whose rejections become `ApiError::Validation`, so a
/// malformed body still gets a `{"message"}` reply.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(AppJson(value))
    }
}

/// `Path<T>` with a `{"message"}` rejection, e.g. for `/problem/abc`.
pub struct AppPath<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(AppPath(value))
    }
}

/// `Query<T>` with a `{"message"}` rejection, e.g. for `?page=abc`.
pub struct AppQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let v: ApiError = ServiceError::Model(ModelError::Validation("answer is required".into())).into();
        assert_eq!(v.status(), StatusCode::BAD_REQUEST);
        assert_eq!(v.to_string(), "answer is required");

        let n: ApiError = ServiceError::not_found("problem").into();
        assert_eq!(n.status(), StatusCode::NOT_FOUND);

        let d: ApiError = ServiceError::Db("connection reset".into()).into();
        assert_eq!(d.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        let e: ApiError = AuthError::Unauthorized.into();
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
    }
}
