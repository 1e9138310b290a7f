use crate::api::error::AppError;
use crate::config::StorageConfig;
use crate::utils::folder::FolderName;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::extract::FolderBody;
use super::types::*;

// RFC 3986 unreserved characters stay as they are.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `<scheme>://<host>` for externally addressable references.
pub fn public_base(config: &StorageConfig, headers: &HeaderMap) -> String {
    if let Some(base) = &config.public_base_url {
        return base.clone();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

/// Query suffix carrying a non-default folder.
fn folder_suffix(folder: &FolderName, is_default: bool) -> String {
    if is_default {
        String::new()
    } else {
        format!("?userFolder={}", utf8_percent_encode(folder.as_str(), COMPONENT))
    }
}

pub fn file_reference(base: &str, token: &str, folder: &FolderName, is_default: bool) -> String {
    format!(
        "{}/file/{}{}",
        base,
        utf8_percent_encode(token, COMPONENT),
        folder_suffix(folder, is_default)
    )
}

pub fn delete_link(token: &str, folder: &FolderName, is_default: bool) -> String {
    format!(
        "/delete/{}{}",
        utf8_percent_encode(token, COMPONENT),
        folder_suffix(folder, is_default)
    )
}

#[utoipa::path(
    get,
    path = "/list",
    params(FolderQuery),
    responses(
        (status = 200, description = "References to every file in the folder", body = FileListResponse),
        (status = 400, description = "Invalid folder"),
        (status = 500, description = "Folder could not be read")
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    Query(query): Query<FolderQuery>,
    body: FolderBody,
) -> Result<Json<FileListResponse>, AppError> {
    let listing = state.file_service.list(query.pick(body).as_deref()).await?;
    let base = public_base(&state.config, &headers);
    let is_default = state.file_service.is_default_folder(&listing.folder);

    let file_urls = listing
        .files
        .iter()
        .map(|f| file_reference(&base, &f.token, &listing.folder, is_default))
        .collect();

    Ok(Json(FileListResponse { file_urls }))
}

#[utoipa::path(
    get,
    path = "/deletelist",
    params(FolderQuery),
    responses(
        (status = 200, description = "Files with their delete links", body = DeleteListResponse),
        (status = 500, description = "Folder could not be read")
    ),
    tag = "files"
)]
pub async fn delete_list(
    State(state): State<crate::AppState>,
    Query(query): Query<FolderQuery>,
    body: FolderBody,
) -> Result<Json<DeleteListResponse>, AppError> {
    let listing = state.file_service.list(query.pick(body).as_deref()).await?;
    let is_default = state.file_service.is_default_folder(&listing.folder);

    let files = listing
        .files
        .into_iter()
        .map(|f| DeleteListEntry {
            link: delete_link(&f.token, &listing.folder, is_default),
            filename: f.file_name,
        })
        .collect();

    Ok(Json(DeleteListResponse { files }))
}
