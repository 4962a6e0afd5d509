//! Outbound HTTP integrations for SportsConnect
//!
//! Implementations of the `Geocoder`, `IdentityVerifier` and `Mailer`
//! interfaces on top of a shared `reqwest` client, plus a mailer that only
//! logs, for development setups without a mail provider.

pub mod client;
pub mod errors;
pub mod identity;
pub mod mail;
pub mod maps;

// Re-export main types for convenience
pub use client::{build_client, HttpClientConfig};
pub use errors::HttpError;
pub use identity::GoogleIdentityVerifier;
pub use mail::{mailer_from_config, LogMailer, SendGridMailer};
pub use maps::GoogleMapsClient;
