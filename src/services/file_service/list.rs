use crate::api::error::AppError;

use super::{FileService, FolderListing, ListedFile};

impl FileService {
    /// Point-in-time snapshot of the files in a folder, in directory order.
    pub async fn list(&self, folder: Option<&str>) -> Result<FolderListing, AppError> {
        let folder = self.folder(folder)?;
        let entries = self
            .storage
            .list_entries(&folder)
            .await
            .map_err(|e| AppError::List(format!("{:#}", e)))?;

        let files = entries
            .into_iter()
            .filter(|entry| entry.is_file())
            .map(|entry| ListedFile {
                token: entry.token().to_string(),
                file_name: entry.file_name,
            })
            .collect();

        Ok(FolderListing { folder, files })
    }
}
