use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub metadata: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let storage_status = match state.storage.probe().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Storage probe failed: {:#}", e);
            "unavailable"
        }
    };

    let metadata_status = match state.file_service.metadata() {
        None => "disabled",
        Some(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!("Metadata store ping failed: {}", e);
                "disconnected"
            }
        },
    };

    let status = if storage_status == "ok" && metadata_status != "disconnected" {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage_status.to_string(),
        metadata: metadata_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
