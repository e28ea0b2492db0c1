use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::config::StorageConfig;
use crate::entities::{collection_series, series, series_metadata};

/// Keeps the single in-memory connection from ever being recycled.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(u32::MAX as u64);

/// Local storage manager for series data
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open the database at `path`, or an in-memory one when `path` is `None`,
    /// and make sure the schema exists.
    pub async fn new(path: Option<&Path>) -> Result<Self> {
        let database_url = match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
                }
                format!("sqlite://{}?mode=rwc", path.display())
            }
            None => "sqlite::memory:".to_string(),
        };

        let mut options = ConnectOptions::new(database_url.clone());
        // A memory database only lives as long as its single connection.
        if path.is_none() {
            options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(MEMORY_CONNECTION_LIFETIME) // avoid idle reaping
                .max_lifetime(MEMORY_CONNECTION_LIFETIME); // avoid lifetime rotation
        }
        options.sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {}", database_url))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        info!("Opened database {}", database_url);

        Ok(storage)
    }

    /// Open the database described by the `[storage]` configuration section.
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        Self::new(config.database_path.as_deref()).await
    }

    /// Create tables from the entity definitions.
    ///
    /// `series` goes first since the other two reference it.
    async fn init_schema(&self) -> Result<()> {
        self.create_table(series::Entity).await?;
        self.create_table(series_metadata::Entity).await?;
        self.create_table(collection_series::Entity).await?;
        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();

        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", entity.table_name()))?;
        Ok(())
    }

    /// Check if the database has any series
    pub async fn has_data(&self) -> Result<bool> {
        Ok(crate::repositories::SeriesRepository::count(&self.conn).await? > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        collection_series::Entity::delete_many().exec(&self.conn).await?;
        series_metadata::Entity::delete_many().exec(&self.conn).await?;
        series::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
