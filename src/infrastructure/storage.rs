use crate::config::StorageConfig;
use crate::services::locator::StorageLocator;
use crate::services::storage::LocalStorageService;
use crate::utils::folder::FolderName;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &StorageConfig) -> anyhow::Result<Arc<LocalStorageService>> {
    let locator = StorageLocator::new(&config.storage_root, &config.default_folder);

    let default_folder = FolderName::parse(&config.default_folder)
        .with_context(|| format!("invalid DEFAULT_FOLDER '{}'", config.default_folder))?;
    let path = locator
        .ensure_folder(&default_folder)
        .await
        .with_context(|| format!("failed to create default folder '{}'", default_folder))?;

    info!(
        "🗄️  Local Storage: {} (Default folder: {})",
        config.storage_root.display(),
        path.display()
    );

    Ok(Arc::new(LocalStorageService::new(locator)))
}
