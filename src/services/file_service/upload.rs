use crate::api::error::AppError;
use crate::utils::filename::{extension_of, stored_file_name};
use crate::utils::token::FileToken;
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use super::{FileService, StagedFile, StoredUpload};

impl FileService {
    /// Buffers an incoming body to a temp file, enforcing the size limit.
    pub async fn stage<'a>(
        &self,
        mut reader: impl AsyncRead + Unpin + Send + 'a,
    ) -> Result<StagedFile, AppError> {
        let temp = NamedTempFile::new().map_err(|e| AppError::StorageWrite(e.to_string()))?;
        let mut file = tokio::fs::File::from_std(
            temp.reopen()
                .map_err(|e| AppError::StorageWrite(e.to_string()))?,
        );

        let mut buffer = vec![0u8; 64 * 1024];
        let mut total_size: u64 = 0;

        loop {
            let n = reader.read(&mut buffer).await.map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("length limit exceeded") {
                    AppError::PayloadTooLarge(
                        "Request body exceeds the maximum allowed limit".to_string(),
                    )
                } else {
                    AppError::BadRequest(format!("Failed to read upload: {}", err_msg))
                }
            })?;
            if n == 0 {
                break;
            }

            total_size += n as u64;
            if total_size > self.config.max_file_size as u64 {
                return Err(AppError::PayloadTooLarge(
                    "File size limits exceeded".to_string(),
                ));
            }

            file.write_all(&buffer[..n])
                .await
                .map_err(|e| AppError::StorageWrite(e.to_string()))?;
        }

        file.flush()
            .await
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;

        Ok(StagedFile {
            temp,
            size: total_size,
        })
    }

    /// Stores a staged body; the temp file is removed when `staged` drops.
    pub async fn upload_staged(
        &self,
        staged: StagedFile,
        original_name: &str,
        folder_override: Option<&str>,
    ) -> Result<StoredUpload, AppError> {
        let reader = tokio::fs::File::open(staged.temp.path())
            .await
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;

        self.upload(reader, original_name, folder_override).await
    }

    /// Writes one upload under a fresh token and records it in the metadata
    /// store when one is configured.
    ///
    /// A metadata failure is reported after the file is already durable; the
    /// file is not rolled back.
    pub async fn upload<'a>(
        &self,
        reader: impl AsyncRead + Unpin + Send + 'a,
        original_name: &str,
        folder_override: Option<&str>,
    ) -> Result<StoredUpload, AppError> {
        let folder = self.folder(folder_override)?;
        let token = FileToken::generate();
        let extension = extension_of(original_name);
        let file_name = stored_file_name(&token, &extension);

        self.storage
            .ensure_folder(&folder)
            .await
            .map_err(|e| AppError::StorageWrite(format!("{:#}", e)))?;

        let written = self
            .storage
            .write_stream(&folder, &file_name, Box::new(reader))
            .await
            .map_err(|e| AppError::StorageWrite(format!("{:#}", e)))?;

        tracing::info!(
            "📦 Stored '{}' as {} ({} bytes)",
            original_name,
            written.path.display(),
            written.size
        );

        let record_id = match &self.metadata {
            Some(store) => {
                let path = written.path.to_string_lossy();
                let record = store.record(&file_name, &path).await.map_err(|e| {
                    tracing::warn!(
                        "File {} is stored but its metadata record failed",
                        written.path.display()
                    );
                    AppError::Metadata(e.to_string())
                })?;
                Some(record.id)
            }
            None => None,
        };

        Ok(StoredUpload {
            token,
            folder,
            file_name,
            stored_path: written.path,
            size: written.size,
            record_id,
        })
    }
}
