//! # SportsConnect Web Utilities
//!
//! Middleware and helpers shared by the REST handlers: JWT issuing and
//! verification, bearer-token authentication, CORS from configuration,
//! request ids, the not-found fallback and the error response format.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use sportsconnect_web::{auth_middleware, request_id_middleware, AuthContext, JwtConfig, JwtManager};
//!
//! async fn whoami(auth: AuthContext) -> String {
//!     auth.user_id.to_string()
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let jwt = Arc::new(JwtManager::new(JwtConfig::default()));
//! let app: Router = Router::new()
//!     .route("/me", get(whoami))
//!     .layer(middleware::from_fn_with_state(jwt, auth_middleware))
//!     .layer(middleware::from_fn(request_id_middleware));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod utils;

// Re-export commonly used types and functions
pub use errors::{WebError, WebResult};
pub use extractors::JsonBody;
pub use middleware::{
    auth_middleware, cors_layer, error_logging_middleware, handle_not_found, request_id_middleware, require_admin,
    require_coach, AuthContext, JwtClaims, JwtConfig, JwtManager, RequestId, REQUEST_ID_HEADER,
};
pub use utils::{created, MessageResponse};
