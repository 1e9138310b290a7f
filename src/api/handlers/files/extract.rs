use crate::api::error::AppError;
use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};

use super::types::FolderQuery;

/// Optional JSON body carrying `userFolder`.
///
/// Requests without a JSON content type or with an empty body carry no
/// folder. A JSON body that does not parse into `FolderQuery` is rejected
/// with 400 instead of falling back to the default folder.
#[derive(Debug, Default)]
pub struct FolderBody(pub Option<FolderQuery>);

#[async_trait]
impl<S> FromRequest<S> for FolderBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let Json(body) = Json::<FolderQuery>::from_bytes(&bytes).map_err(|e| {
            tracing::warn!("Rejected folder body: {}", e.body_text());
            AppError::BadRequest(e.body_text())
        })?;

        Ok(Self(Some(body)))
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
    else {
        return false;
    };

    mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}
