use crate::api::error::AppError;
use crate::utils::token::FileToken;
use futures::{StreamExt, stream};

use super::{BulkDeleteReport, DeleteFailure, FileService};

/// Upper bound on `remove_file` calls in flight during a bulk delete.
pub const BULK_DELETE_CONCURRENCY: usize = 16;

impl FileService {
    /// Removes the file stored under `token`, whatever its extension.
    pub async fn delete(&self, token: &str, folder: Option<&str>) -> Result<String, AppError> {
        let folder = self.folder(folder)?;
        let token = FileToken::parse(token)
            .ok_or_else(|| AppError::Delete(format!("'{}' is not a file token", token)))?;

        let entry = self
            .storage
            .locate(&folder, &token)
            .await
            .map_err(|e| AppError::Delete(format!("{:#}", e)))?
            .ok_or_else(|| AppError::Delete(format!("no file for {} in '{}'", token, folder)))?;

        self.storage
            .delete_file(&entry)
            .await
            .map_err(|e| AppError::Delete(format!("{:#}", e)))?;

        tracing::info!("🗑️  Deleted {}/{}", folder, entry.file_name);
        Ok(entry.file_name)
    }

    /// Attempts to remove every entry of the folder independently.
    ///
    /// Only a failure to read the folder itself is an error; per-entry
    /// failures are collected in the report.
    pub async fn delete_all(&self, folder: Option<&str>) -> Result<BulkDeleteReport, AppError> {
        let folder = self.folder(folder)?;
        let entries = self
            .storage
            .list_entries(&folder)
            .await
            .map_err(|e| AppError::Delete(format!("{:#}", e)))?;

        let storage = &self.storage;
        let outcomes: Vec<_> = stream::iter(entries)
            .map(|entry| async move {
                let result = storage.delete_file(&entry).await;
                (entry, result)
            })
            .buffer_unordered(BULK_DELETE_CONCURRENCY)
            .collect()
            .await;

        let mut report = BulkDeleteReport {
            folder,
            deleted: Vec::new(),
            failures: Vec::new(),
        };

        for (entry, result) in outcomes {
            match result {
                Ok(()) => report.deleted.push(entry.file_name),
                Err(e) => {
                    tracing::error!("Error deleting file: {}/{}: {:#}", entry.folder, entry.file_name, e);
                    report.failures.push(DeleteFailure {
                        file_name: entry.file_name,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        tracing::info!(
            "🧹 Bulk delete in '{}': {} deleted, {} failed",
            report.folder,
            report.deleted_count(),
            report.failure_count()
        );

        Ok(report)
    }
}
