use axum::{
    extract::State,
    Json,
};
use service::{collection_service::{self, Collection}, problem_service::ProblemQuery};

use crate::errors::{ApiError, AppQuery};
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/problem-collection", tag = "collection",
    params(
        ("level" = Option<String>, Query, description = "Exact level, or `all`"),
        ("topic" = Option<String>, Query, description = "Exact topic name, or `all`"),
        ("page" = Option<i64>, Query, description = "1-based page of 15")
    ),
    responses(
        (status = 200, description = "Browse OK", body = crate::openapi::CollectionDoc),
        (status = 404, description = "Unknown topic or page")
    )
)]
pub async fn browse(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<ProblemQuery>,
) -> Result<Json<Collection>, ApiError> {
    Ok(Json(collection_service::browse(&state.db, &q).await?))
}
