use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::try_out_packet;
use service::{
    packet_service::{self, PacketInput, PacketUpdate},
    views::PacketView,
};

use crate::errors::{ApiError, AppJson, AppPath, AppQuery};
use crate::routes::auth::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct PacketEnvelope {
    pub message: &'static str,
    pub try_out: PacketView,
}

#[utoipa::path(
    get, path = "/test", tag = "try_out",
    params(("name" = Option<String>, Query, description = "Name substring")),
    responses((status = 200, description = "List OK", body = [crate::openapi::PacketDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<NameQuery>,
) -> Result<Json<Vec<try_out_packet::Model>>, ApiError> {
    Ok(Json(packet_service::list(&state.db, q.name.as_deref()).await?))
}

#[utoipa::path(
    get, path = "/test/public", tag = "try_out",
    params(("name" = Option<String>, Query, description = "Name substring")),
    responses((status = 200, description = "Visible packets", body = [crate::openapi::PacketDoc]))
)]
pub async fn list_public(
    State(state): State<ServerState>,
    AppQuery(q): AppQuery<NameQuery>,
) -> Result<Json<Vec<try_out_packet::Model>>, ApiError> {
    Ok(Json(packet_service::list_visible(&state.db, q.name.as_deref()).await?))
}

#[utoipa::path(
    post, path = "/test", tag = "try_out",
    request_body = crate::openapi::PacketInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown problem")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    AppJson(input): AppJson<PacketInput>,
) -> Result<Json<PacketEnvelope>, ApiError> {
    let try_out = packet_service::create(&state.db, &input).await?;
    info!(id = try_out.packet.id, maximum_score = try_out.packet.maximum_score, "created try out");
    Ok(Json(PacketEnvelope { message: "try out created", try_out }))
}

#[utoipa::path(
    get, path = "/test/{id}", tag = "try_out",
    params(("id" = i32, Path, description = "Try out id")),
    responses((status = 200, description = "Found", body = crate::openapi::PacketDoc), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, AppPath(id): AppPath<i32>) -> Result<Json<PacketView>, ApiError> {
    Ok(Json(packet_service::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/test/{id}", tag = "try_out",
    params(("id" = i32, Path, description = "Try out id")),
    request_body = crate::openapi::PacketUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<PacketUpdate>,
) -> Result<Json<PacketEnvelope>, ApiError> {
    let try_out = packet_service::update(&state.db, id, &input).await?;
    info!(id, "updated try out");
    Ok(Json(PacketEnvelope { message: "try out updated", try_out }))
}

#[utoipa::path(
    delete, path = "/test/{id}", tag = "try_out",
    params(("id" = i32, Path, description = "Try out id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, AppPath(id): AppPath<i32>) -> Result<Json<PacketEnvelope>, ApiError> {
    let try_out = packet_service::delete(&state.db, id).await?;
    info!(id, "deleted try out");
    Ok(Json(PacketEnvelope { message: "try out deleted", try_out }))
}
