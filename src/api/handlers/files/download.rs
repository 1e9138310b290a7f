use crate::api::error::AppError;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::Response,
};
use tokio_util::io::ReaderStream;

use super::extract::FolderBody;
use super::types::FolderQuery;

#[utoipa::path(
    get,
    path = "/file/{token}",
    params(
        ("token" = String, Path, description = "Storage token returned by /upload"),
        FolderQuery
    ),
    responses(
        (status = 200, description = "Raw file bytes"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
    Query(query): Query<FolderQuery>,
    body: FolderBody,
) -> Result<Response, AppError> {
    let file = state
        .file_service
        .retrieve(&token, query.pick(body).as_deref())
        .await?;

    tracing::debug!("📤 Serving {} ({} bytes)", file.file_name, file.size);

    let body = Body::from_stream(ReaderStream::new(file.reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::APPLICATION_OCTET_STREAM.as_ref())
        .header(header::CONTENT_LENGTH, file.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file.file_name),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
