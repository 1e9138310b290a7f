use std::env;
use std::path::PathBuf;

/// Storage configuration for the upload service
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base directory every folder is resolved against (default: ".")
    pub storage_root: PathBuf,

    /// Folder used when the caller does not supply one (default: "uploads")
    pub default_folder: String,

    /// Maximum upload size in bytes (default: 256 MB)
    pub max_file_size: usize,

    /// Metadata store connection string; records are skipped when unset
    pub database_url: Option<String>,

    /// Pool size for the metadata store (default: 10)
    pub db_max_connections: u32,

    /// Base used for listing URLs instead of the request Host header
    pub public_base_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("."),
            default_folder: "uploads".to_string(),
            max_file_size: 256 * 1024 * 1024, // 256 MB
            database_url: None,
            db_max_connections: 10,
            public_base_url: None,
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            storage_root: env::var("STORAGE_ROOT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.storage_root),

            default_folder: env::var("DEFAULT_FOLDER")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default.default_folder),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.db_max_connections),

            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// Config rooted at `root`, without a metadata store
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: root.into(),
            ..Self::default()
        }
    }

    /// Create config for development (in-memory metadata store, small limits)
    pub fn development() -> Self {
        Self {
            storage_root: PathBuf::from("."),
            default_folder: "uploads".to_string(),
            max_file_size: 16 * 1024 * 1024,
            database_url: Some("sqlite::memory:".to_string()),
            db_max_connections: 1,
            public_base_url: None,
        }
    }

    pub fn metadata_enabled(&self) -> bool {
        self.database_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.storage_root, PathBuf::from("."));
        assert_eq!(config.default_folder, "uploads");
        assert_eq!(config.max_file_size, 256 * 1024 * 1024);
        assert!(!config.metadata_enabled());
    }

    #[test]
    fn test_for_root_keeps_defaults() {
        let config = StorageConfig::for_root("/srv/files");
        assert_eq!(config.storage_root, PathBuf::from("/srv/files"));
        assert_eq!(config.default_folder, "uploads");
        assert!(config.public_base_url.is_none());
    }

    #[test]
    fn test_development_config() {
        let config = StorageConfig::development();
        assert!(config.metadata_enabled());
        assert_eq!(config.db_max_connections, 1);
    }
}
