use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::services::locator::StorageLocator;
use crate::utils::filename::token_of;
use crate::utils::folder::FolderName;
use crate::utils::token::FileToken;

/// Prefix of in-flight upload files. They never show up in listings.
pub const STAGING_PREFIX: &str = ".upload-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One directory entry inside a storage folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub folder: FolderName,
    pub file_name: String,
    pub kind: EntryKind,
}

impl StoredEntry {
    pub fn token(&self) -> &str {
        token_of(&self.file_name)
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

pub struct WriteResult {
    pub path: PathBuf,
    pub size: u64,
}

pub struct OpenedFile {
    pub reader: Box<dyn AsyncRead + Unpin + Send>,
    pub size: u64,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn ensure_folder(&self, folder: &FolderName) -> Result<PathBuf>;
    async fn write_stream<'a>(
        &self,
        folder: &FolderName,
        file_name: &str,
        reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    ) -> Result<WriteResult>;
    async fn locate(&self, folder: &FolderName, token: &FileToken) -> Result<Option<StoredEntry>>;
    async fn open(&self, entry: &StoredEntry) -> Result<OpenedFile>;
    async fn list_entries(&self, folder: &FolderName) -> Result<Vec<StoredEntry>>;
    async fn delete_file(&self, entry: &StoredEntry) -> Result<()>;
    async fn probe(&self) -> Result<()>;
}

/// Local filesystem storage. The directory tree is the only state.
pub struct LocalStorageService {
    locator: StorageLocator,
}

impl LocalStorageService {
    pub fn new(locator: StorageLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &StorageLocator {
        &self.locator
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn ensure_folder(&self, folder: &FolderName) -> Result<PathBuf> {
        self.locator
            .ensure_folder(folder)
            .await
            .with_context(|| format!("failed to create folder '{}'", folder))
    }

    async fn write_stream<'a>(
        &self,
        folder: &FolderName,
        file_name: &str,
        mut reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    ) -> Result<WriteResult> {
        let dir = self.ensure_folder(folder).await?;
        let target = dir.join(file_name);

        // Written under a hidden name in the same directory, then renamed into
        // place, so readers never observe a partially written file.
        let staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&dir)
            .with_context(|| format!("failed to create staging file in {}", dir.display()))?;

        let mut file = tokio::fs::File::from_std(staged.reopen()?);
        let size = tokio::io::copy(&mut reader, &mut file)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        let persist_target = target.clone();
        tokio::task::spawn_blocking(move || staged.persist_noclobber(&persist_target))
            .await?
            .with_context(|| format!("failed to persist {}", target.display()))?;

        tracing::debug!("💾 Wrote {} bytes to {}", size, target.display());

        Ok(WriteResult { path: target, size })
    }

    async fn locate(&self, folder: &FolderName, token: &FileToken) -> Result<Option<StoredEntry>> {
        let found = self
            .locator
            .locate(folder, token)
            .await
            .with_context(|| format!("failed to scan folder '{}'", folder))?;

        Ok(found.map(|file_name| StoredEntry {
            folder: folder.clone(),
            file_name,
            kind: EntryKind::File,
        }))
    }

    async fn open(&self, entry: &StoredEntry) -> Result<OpenedFile> {
        let path = self.locator.file_path(&entry.folder, &entry.file_name);
        let file = tokio::fs::File::open(&path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        let size = file.metadata().await?.len();

        Ok(OpenedFile {
            reader: Box::new(file),
            size,
        })
    }

    async fn list_entries(&self, folder: &FolderName) -> Result<Vec<StoredEntry>> {
        let path = self.locator.folder_path(folder);
        let mut dir = tokio::fs::read_dir(&path)
            .await
            .with_context(|| format!("failed to read folder {}", path.display()))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let file_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 entry {:?} in {}", raw, folder);
                    continue;
                }
            };
            if file_name.starts_with(STAGING_PREFIX) {
                continue;
            }

            let file_type = entry.file_type().await?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };

            entries.push(StoredEntry {
                folder: folder.clone(),
                file_name,
                kind,
            });
        }

        Ok(entries)
    }

    async fn delete_file(&self, entry: &StoredEntry) -> Result<()> {
        let path = self.locator.file_path(&entry.folder, &entry.file_name);
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("failed to delete {}", path.display()))?;
        Ok(())
    }

    async fn probe(&self) -> Result<()> {
        let root = self.locator.root();
        let meta = tokio::fs::metadata(root)
            .await
            .with_context(|| format!("storage root {} is not accessible", root.display()))?;
        if !meta.is_dir() {
            bail!("storage root {} is not a directory", root.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(root: &std::path::Path) -> LocalStorageService {
        LocalStorageService::new(StorageLocator::new(root, "uploads"))
    }

    #[tokio::test]
    async fn test_write_then_locate_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let folder = FolderName::parse("uploads").unwrap();
        let token = FileToken::generate();
        let name = format!("{}.txt", token);

        let written = storage
            .write_stream(&folder, &name, Box::new(&b"hello world"[..]))
            .await
            .unwrap();
        assert_eq!(written.size, 11);
        assert_eq!(written.path, dir.path().join("uploads").join(&name));

        let entry = storage.locate(&folder, &token).await.unwrap().unwrap();
        assert_eq!(entry.file_name, name);

        let mut opened = storage.open(&entry).await.unwrap();
        assert_eq!(opened.size, 11);
        let mut content = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut opened.reader, &mut content)
            .await
            .unwrap();
        assert_eq!(content, b"hello world");
    }

    #[tokio::test]
    async fn test_write_never_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let folder = FolderName::parse("uploads").unwrap();

        storage
            .write_stream(&folder, "same.txt", Box::new(&b"first"[..]))
            .await
            .unwrap();
        let second = storage
            .write_stream(&folder, "same.txt", Box::new(&b"second"[..]))
            .await;
        assert!(second.is_err());
        drop(second);

        let content = std::fs::read(dir.path().join("uploads/same.txt")).unwrap();
        assert_eq!(content, b"first");

        // the failed staging file is cleaned up
        let entries = storage.list_entries(&folder).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(std::fs::read_dir(dir.path().join("uploads")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_list_entries_reports_kinds_and_skips_staging() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let folder = FolderName::parse("uploads").unwrap();
        let root = dir.path().join("uploads");

        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::write(root.join("a.txt"), b"a").unwrap();
        std::fs::write(root.join(format!("{}abc", STAGING_PREFIX)), b"partial").unwrap();

        let mut entries = storage.list_entries(&folder).await.unwrap();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "a.txt");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].token(), "a");
        assert_eq!(entries[1].file_name, "nested");
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[tokio::test]
    async fn test_list_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let folder = FolderName::parse("missing").unwrap();

        assert!(storage.list_entries(&folder).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let entry = StoredEntry {
            folder: FolderName::parse("uploads").unwrap(),
            file_name: "gone.txt".to_string(),
            kind: EntryKind::File,
        };

        assert!(storage.delete_file(&entry).await.is_err());
        assert!(storage.probe().await.is_ok());
    }
}
