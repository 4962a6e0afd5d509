//! Storage layer for SportsConnect
//!
//! A SeaORM implementation of the repository traits from
//! `sportsconnect-interfaces`, with schema migrations and connection
//! management. SQLite is the supported backend.

pub mod seaorm;

pub use seaorm::{
    config::DatabaseConfig,
    connection::{DatabaseConnection, DatabaseError},
    migrations::Migrator,
    repositories::SeaOrmRepositoryFactory,
};
