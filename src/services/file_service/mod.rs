use crate::api::error::AppError;
use crate::config::StorageConfig;
use crate::services::{metadata::MetadataStore, storage::StorageService};
use crate::utils::folder::FolderName;
use std::sync::Arc;

pub mod delete;
pub mod list;
pub mod retrieve;
pub mod types;
pub mod upload;

pub use types::*;

/// Storage-facing behaviour behind every endpoint.
///
/// Holds no per-request state: the filesystem decides which files exist.
pub struct FileService {
    storage: Arc<dyn StorageService>,
    metadata: Option<MetadataStore>,
    config: StorageConfig,
}

impl FileService {
    pub fn new(
        storage: Arc<dyn StorageService>,
        metadata: Option<MetadataStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            storage,
            metadata,
            config,
        }
    }

    pub fn default_folder(&self) -> &str {
        &self.config.default_folder
    }

    pub fn metadata(&self) -> Option<&MetadataStore> {
        self.metadata.as_ref()
    }

    pub(crate) fn folder(&self, requested: Option<&str>) -> Result<FolderName, AppError> {
        Ok(FolderName::resolve(requested, &self.config.default_folder)?)
    }

    pub fn is_default_folder(&self, folder: &FolderName) -> bool {
        FolderName::parse(&self.config.default_folder).is_ok_and(|default| &default == folder)
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}
