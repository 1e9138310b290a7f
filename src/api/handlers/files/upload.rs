use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use super::types::*;

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Multipart form with a `file` field and an optional `userFolder` field"),
    responses(
        (status = 201, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file provided or invalid folder"),
        (status = 500, description = "Internal server error")
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut user_folder: Option<String> = None;
    let mut original_name = String::new();
    let mut staged: Option<crate::services::file_service::StagedFile> = None;

    let result: Result<(StatusCode, Json<UploadResponse>), AppError> = async {
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("length limit exceeded") {
                AppError::PayloadTooLarge(
                    "Request body exceeds the maximum allowed limit".to_string(),
                )
            } else {
                AppError::BadRequest(err_msg)
            }
        })? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                // A `file` part without a filename is a plain form value, not an upload.
                let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                original_name = file_name;

                let reader = StreamReader::new(field.map_err(std::io::Error::other));
                staged = Some(state.file_service.stage(reader).await?);
            } else if name == "userFolder" {
                let text = field.text().await.unwrap_or_default();
                user_folder = Some(text);
            }
        }

        let staged = staged.take().ok_or(AppError::MissingFile)?;

        let stored = state
            .file_service
            .upload_staged(staged, &original_name, user_folder.as_deref())
            .await?;

        let token = stored.token.to_string();
        Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "File uploaded successfully".to_string(),
                file_id: stored.record_id.unwrap_or_else(|| token.clone()),
                token,
            }),
        ))
    }
    .await;

    match result {
        Ok(res) => Ok(res),
        Err(e) => {
            // Drain the rest of the form so the client sees the error instead of a reset.
            tracing::warn!("Upload failed early: {}. Consuming remaining stream...", e);
            while let Ok(Some(mut field)) = multipart.next_field().await {
                while let Ok(Some(_)) = field.chunk().await {}
            }
            Err(e)
        }
    }
}
