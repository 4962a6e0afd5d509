//! SeaORM implementation: entities, migrations, repositories and connection management

pub mod config;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;

pub use config::DatabaseConfig;
pub use connection::{DatabaseConnection, DatabaseError};
pub use entities::*;

// Re-export common SeaORM types for convenience
pub use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection as SeaOrmConnection, EntityTrait, QueryFilter, QueryOrder,
};
pub use sea_orm_migration::{MigratorTrait, SchemaManager};
