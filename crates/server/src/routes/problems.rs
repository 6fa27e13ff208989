use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use tracing::info;

use service::{
    problem_service::{self, ProblemInput, ProblemQuery},
    topic_service,
    views::{ProblemView, TopicEntry},
};

use crate::errors::{ApiError, AppJson, AppPath, AppQuery};
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct ProblemEnvelope {
    pub message: &'static str,
    pub problem: ProblemView,
}

#[utoipa::path(
    get, path = "/problem", tag = "problem",
    params(
        ("level" = Option<String>, Query, description = "Exact level, or `all`"),
        ("topic" = Option<String>, Query, description = "Exact topic name, or `all`"),
        ("page" = Option<i64>, Query, description = "1-based page of 15")
    ),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ProblemDoc]),
        (status = 404, description = "Unknown topic or page")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<ProblemQuery>,
) -> Result<Json<Vec<ProblemView>>, ApiError> {
    let problems = problem_service::list(&state.db, &q).await?;
    Ok(Json(problems))
}

#[utoipa::path(
    post, path = "/problem", tag = "problem",
    request_body = crate::openapi::ProblemInputDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    AppJson(input): AppJson<ProblemInput>,
) -> Result<Json<ProblemEnvelope>, ApiError> {
    let problem = problem_service::create(&state.db, &input).await?;
    info!(id = problem.problem.id, "created problem");
    Ok(Json(ProblemEnvelope { message: "problem created", problem }))
}

#[utoipa::path(
    get, path = "/problem/topics", tag = "problem",
    responses((status = 200, description = "Active topics", body = [crate::openapi::TopicDoc]))
)]
pub async fn topics(State(state): State<ServerState>) -> Result<Json<Vec<TopicEntry>>, ApiError> {
    Ok(Json(topic_service::list_topics(&state.db).await?))
}

#[utoipa::path(
    get, path = "/problem/{id}", tag = "problem",
    params(("id" = i32, Path, description = "Problem id")),
    responses((status = 200, description = "Found", body = crate::openapi::ProblemDoc), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, AppPath(id): AppPath<i32>) -> Result<Json<ProblemView>, ApiError> {
    Ok(Json(problem_service::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/problem/{id}", tag = "problem",
    params(("id" = i32, Path, description = "Problem id")),
    request_body = crate::openapi::ProblemInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<ProblemInput>,
) -> Result<Json<ProblemEnvelope>, ApiError> {
    let problem = problem_service::update(&state.db, id, &input).await?;
    info!(id, "updated problem");
    Ok(Json(ProblemEnvelope { message: "problem updated", problem }))
}

#[utoipa::path(
    delete, path = "/problem/{id}", tag = "problem",
    params(("id" = i32, Path, description = "Problem id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Problem still used by a try out"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, AppPath(id): AppPath<i32>) -> Result<Json<ProblemEnvelope>, ApiError> {
    let problem = problem_service::delete(&state.db, id).await?;
    info!(id, "deleted problem");
    Ok(Json(ProblemEnvelope { message: "problem deleted", problem }))
}
