use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::utils::folder::FolderError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please provide a file")]
    MissingFile,

    #[error("Invalid folder: {0}")]
    InvalidFolder(#[from] FolderError),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("List error: {0}")]
    List(String),

    #[error("Delete error: {0}")]
    Delete(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingFile => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Please provide a file" })),
                )
                    .into_response();
            }
            AppError::InvalidFolder(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                return (StatusCode::NOT_FOUND, "File not found").into_response();
            }
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::StorageWrite(msg) => {
                tracing::error!("Storage write error: {}", msg);
                internal()
            }
            AppError::Metadata(msg) => {
                tracing::error!("Metadata error: {}", msg);
                internal()
            }
            AppError::List(msg) => {
                tracing::error!("List error: {}", msg);
                internal()
            }
            AppError::Delete(msg) => {
                tracing::error!("Delete error: {}", msg);
                internal()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                internal()
            }
            AppError::Anyhow(e) => {
                tracing::error!("Anyhow error: {:?}", e);
                internal()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_missing_file_uses_message_key() {
        let response = AppError::MissingFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Please provide a file");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingFile.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidFolder(FolderError::Nul)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Delete("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Metadata("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
