//! SportsConnect server
//!
//! Wires configuration, storage, outbound providers and the REST router into a
//! running HTTP server.

pub mod services;
pub mod startup;

pub use services::{ServiceContainer, UnconfiguredGeocoder};
pub use startup::Server;
