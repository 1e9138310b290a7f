use crate::utils::folder::FolderName;
use crate::utils::token::FileToken;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tokio::io::AsyncRead;

/// Upload body buffered to a temp file until the whole form has been read.
pub struct StagedFile {
    pub temp: NamedTempFile,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub token: FileToken,
    pub folder: FolderName,
    pub file_name: String,
    pub stored_path: PathBuf,
    pub size: u64,
    pub record_id: Option<String>,
}

pub struct RetrievedFile {
    pub file_name: String,
    pub size: u64,
    pub reader: Box<dyn AsyncRead + Unpin + Send>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub file_name: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct FolderListing {
    pub folder: FolderName,
    pub files: Vec<ListedFile>,
}

#[derive(Debug, Clone)]
pub struct DeleteFailure {
    pub file_name: String,
    pub error: String,
}

/// Per-entry outcome of a bulk delete.
#[derive(Debug, Clone)]
pub struct BulkDeleteReport {
    pub folder: FolderName,
    pub deleted: Vec<String>,
    pub failures: Vec<DeleteFailure>,
}

impl BulkDeleteReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
