use crate::api::error::AppError;
use crate::utils::token::FileToken;

use super::{FileService, RetrievedFile, is_not_found};

impl FileService {
    pub async fn retrieve(
        &self,
        token: &str,
        folder: Option<&str>,
    ) -> Result<RetrievedFile, AppError> {
        let folder = self.folder(folder)?;
        let token = FileToken::parse(token)
            .ok_or_else(|| AppError::NotFound(format!("'{}' is not a file token", token)))?;

        let entry = self
            .storage
            .locate(&folder, &token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} in '{}'", token, folder)))?;

        // The file may be deleted between lookup and open.
        let opened = self.storage.open(&entry).await.map_err(|e| {
            if is_not_found(&e) {
                AppError::NotFound(format!("{} in '{}'", token, folder))
            } else {
                AppError::Anyhow(e)
            }
        })?;

        Ok(RetrievedFile {
            file_name: entry.file_name,
            size: opened.size,
            reader: opened.reader,
        })
    }
}
