use super::extract::FolderBody;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Metadata record id, or the token when no metadata store is configured
    pub file_id: String,
    /// Storage token used by `/file/{token}` and `/delete/{token}`
    pub token: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    pub file_urls: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteListEntry {
    pub filename: String,
    pub link: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteListResponse {
    pub files: Vec<DeleteListEntry>,
}

#[derive(Deserialize, Default, Debug, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FolderQuery {
    /// Folder under the storage root; the default folder when omitted
    pub user_folder: Option<String>,
}

impl FolderQuery {
    /// Query parameter first, then an optional JSON body field.
    pub fn pick(self, FolderBody(body): FolderBody) -> Option<String> {
        self.user_folder
            .filter(|f| !f.trim().is_empty())
            .or_else(|| body.and_then(|b| b.user_folder))
    }
}
