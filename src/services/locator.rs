use std::io;
use std::path::{Path, PathBuf};

use crate::utils::filename::{stored_file_name, token_of};
use crate::utils::folder::{FolderError, FolderName};
use crate::utils::token::FileToken;

/// Maps folders and tokens to concrete paths under the storage root.
#[derive(Debug, Clone)]
pub struct StorageLocator {
    root: PathBuf,
    default_folder: String,
}

impl StorageLocator {
    pub fn new(root: impl Into<PathBuf>, default_folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_folder: default_folder.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    pub fn folder(&self, requested: Option<&str>) -> Result<FolderName, FolderError> {
        FolderName::resolve(requested, &self.default_folder)
    }

    pub fn folder_path(&self, folder: &FolderName) -> PathBuf {
        self.root.join(folder.as_path())
    }

    pub fn file_path(&self, folder: &FolderName, file_name: &str) -> PathBuf {
        self.folder_path(folder).join(file_name)
    }

    /// `<root>/<folder>/<token><extension>`
    pub fn resolve(&self, folder: &FolderName, token: &FileToken, extension: &str) -> PathBuf {
        self.file_path(folder, &stored_file_name(token, extension))
    }

    /// Creates the folder and any missing parents. Succeeds when it already exists.
    pub async fn ensure_folder(&self, folder: &FolderName) -> io::Result<PathBuf> {
        let path = self.folder_path(folder);
        tokio::fs::create_dir_all(&path).await?;
        Ok(path)
    }

    /// Finds the stored filename for `token`, whatever its extension.
    ///
    /// A folder that does not exist simply holds no files.
    pub async fn locate(&self, folder: &FolderName, token: &FileToken) -> io::Result<Option<String>> {
        let wanted = token.to_string();
        let mut entries = match tokio::fs::read_dir(self.folder_path(folder)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if token_of(&name) != wanted {
                continue;
            }
            if entry.file_type().await?.is_file() {
                return Ok(Some(name));
            }
        }

        Ok(None)
    }
}
