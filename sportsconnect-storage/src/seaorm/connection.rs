use super::config::{DatabaseConfig, SqliteTarget};
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Pooled SeaORM connection plus the settings it was opened with
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
    config: DatabaseConfig,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration failed: {0}")]
    MigrationError(String),

    #[error("Invalid database setup: {0}")]
    ConfigError(String),
}

impl DatabaseConnection {
    pub async fn new(config: DatabaseConfig) -> Result<Self, DatabaseError> {
        let target = config
            .target()
            .ok_or_else(|| DatabaseError::ConfigError(format!("not a SQLite URL: {}", config.url)))?;

        let mut opts = ConnectOptions::new(config.connect_url());
        opts.connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        match &target {
            // Each pooled connection to :memory: would see its own empty database
            SqliteTarget::Memory => {
                info!("Opening in-memory SQLite database");
                opts.max_connections(1).min_connections(1);
            }
            SqliteTarget::File(path) => {
                info!("Opening SQLite database at {}", path.display());
                create_parent_dir(path)?;
                opts.max_connections(config.max_connections)
                    .min_connections(1)
                    .idle_timeout(Duration::from_secs(300))
                    .max_lifetime(Duration::from_secs(3600));
            }
        }

        let connection = Database::connect(opts).await?;
        debug!("Database pool ready (max {} connections)", config.max_connections);

        Ok(Self { connection, config })
    }

    /// Fresh in-memory database with every migration applied
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let db = Self::new(DatabaseConfig::in_memory()).await?;
        db.migrate().await?;
        Ok(db)
    }

    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    pub fn get_config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Apply pending migrations; already-applied ones are skipped
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");
        super::migrations::Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        info!("Database schema is up to date");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.connection.ping().await.map_err(|e| {
            debug!("Database ping failed: {}", e);
            DatabaseError::DbError(e)
        })
    }

    pub async fn close(self) -> Result<(), DatabaseError> {
        info!("Closing database pool");
        self.connection.close().await?;
        Ok(())
    }
}

fn create_parent_dir(path: &std::path::Path) -> Result<(), DatabaseError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            info!("Creating database directory {}", dir.display());
            std::fs::create_dir_all(dir)
                .map_err(|e| DatabaseError::ConfigError(format!("cannot create {}: {}", dir.display(), e)))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_migrates_and_pings() {
        let db = DatabaseConnection::in_memory().await.unwrap();
        assert!(db.ping().await.is_ok());
        assert!(db.migrate().await.is_ok());
    }

    #[tokio::test]
    async fn test_file_database_and_directory_are_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("sports.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
            connection_timeout: Duration::from_secs(5),
        };

        let db = DatabaseConnection::new(config).await.unwrap();
        db.migrate().await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_non_sqlite_url() {
        let config = DatabaseConfig {
            url: "postgres://localhost/sports".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            DatabaseConnection::new(config).await,
            Err(DatabaseError::ConfigError(_))
        ));
    }
}
