pub mod auth;
pub mod cors;
pub mod error_handler;
pub mod request_id;

// Re-export middleware functions and types
pub use auth::{
    auth_middleware, extract_bearer_token, require_admin, require_coach, AuthContext, JwtClaims, JwtConfig,
    JwtManager, NO_TOKEN_MESSAGE, TOKEN_FAILED_MESSAGE,
};
pub use cors::cors_layer;
pub use error_handler::{error_logging_middleware, handle_not_found};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
