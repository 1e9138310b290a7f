use crate::api::error::AppError;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
};

use super::extract::FolderBody;
use super::types::FolderQuery;

pub const DELETED_COUNT_HEADER: &str = "x-deleted-count";
pub const DELETE_FAILURES_HEADER: &str = "x-delete-failures";

#[utoipa::path(
    delete,
    path = "/delete/{token}",
    params(
        ("token" = String, Path, description = "Storage token of the file"),
        FolderQuery
    ),
    responses(
        (status = 200, description = "File deleted successfully"),
        (status = 500, description = "File could not be deleted")
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
    Query(query): Query<FolderQuery>,
    body: FolderBody,
) -> Result<&'static str, AppError> {
    state
        .file_service
        .delete(&token, query.pick(body).as_deref())
        .await?;

    Ok("File deleted successfully")
}

#[utoipa::path(
    delete,
    path = "/deleteall",
    params(FolderQuery),
    responses(
        (status = 200, description = "Every entry was attempted; counts are in the X-Deleted-Count and X-Delete-Failures headers"),
        (status = 500, description = "Folder could not be read")
    ),
    tag = "files"
)]
pub async fn delete_all(
    State(state): State<crate::AppState>,
    Query(query): Query<FolderQuery>,
    body: FolderBody,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .file_service
        .delete_all(query.pick(body).as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [
            (
                HeaderName::from_static(DELETED_COUNT_HEADER),
                report.deleted_count().to_string(),
            ),
            (
                HeaderName::from_static(DELETE_FAILURES_HEADER),
                report.failure_count().to_string(),
            ),
        ],
        "All files deleted successfully",
    ))
}
