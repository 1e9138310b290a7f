use crate::config::StorageConfig;
use crate::entities::file_records;
use crate::services::metadata::MetadataStore;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;
use tracing::info;

pub async fn connect(db_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    // Every pooled connection to an in-memory SQLite database gets its own database.
    let max_connections = if db_url.contains(":memory:") {
        1
    } else {
        max_connections.max(1)
    };

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("🔄 Running SeaORM auto-migrations...");
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmt = schema
        .create_table_from_entity(file_records::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&stmt)).await?;

    Ok(())
}

/// Connects the metadata store when `DATABASE_URL` is configured.
pub async fn setup_metadata(config: &StorageConfig) -> anyhow::Result<Option<MetadataStore>> {
    let Some(db_url) = config.database_url.as_deref() else {
        info!("📂 Metadata store disabled (DATABASE_URL not set)");
        return Ok(None);
    };

    info!("📂 Metadata store: {}", db_url);
    let db = connect(db_url, config.db_max_connections).await?;
    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(Some(MetadataStore::new(db)))
}
