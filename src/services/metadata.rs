use crate::entities::{file_records, prelude::*};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

/// Best-effort store of (filename, path) records for uploaded files.
///
/// Constructed once at startup and handed to the file service; `close`
/// tears the pool down on shutdown.
#[derive(Clone)]
pub struct MetadataStore {
    db: DatabaseConnection,
}

impl MetadataStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn record(&self, filename: &str, path: &str) -> Result<file_records::Model, DbErr> {
        let record = file_records::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            filename: Set(filename.to_string()),
            path: Set(path.to_string()),
            created_at: Set(Utc::now()),
        };

        record.insert(&self.db).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<file_records::Model>, DbErr> {
        FileRecords::find_by_id(id.to_string()).one(&self.db).await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        FileRecords::find().count(&self.db).await
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.db.ping().await
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.db.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database;

    async fn store() -> MetadataStore {
        let db = database::connect("sqlite::memory:", 1).await.unwrap();
        database::run_migrations(&db).await.unwrap();
        MetadataStore::new(db)
    }

    #[tokio::test]
    async fn test_record_and_find() {
        let store = store().await;

        let record = store
            .record("0b7f.txt", "uploads/0b7f.txt")
            .await
            .unwrap();
        assert!(Uuid::parse_str(&record.id).is_ok());

        let found = store.find(&record.id).await.unwrap().unwrap();
        assert_eq!(found.filename, "0b7f.txt");
        assert_eq!(found.path, "uploads/0b7f.txt");
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ping_then_close() {
        let store = store().await;
        store.ping().await.unwrap();
        store.close().await.unwrap();
    }
}
