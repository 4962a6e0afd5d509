pub mod coaches;
pub mod health;
pub mod maps;
pub mod players;
pub mod tournaments;
pub mod users;
pub mod venues;

// Re-export handler functions
pub use coaches::*;
pub use health::*;
pub use maps::*;
pub use players::*;
pub use tournaments::*;
pub use users::*;
pub use venues::*;

use sportsconnect_api_types::ApiId;
use sportsconnect_interfaces::DatabaseError;

use crate::errors::RestError;

/// Unique-constraint races surface as the same 400 the pre-check returns
pub(crate) fn duplicate_as(message: &'static str) -> impl Fn(DatabaseError) -> RestError {
    move |err| match err {
        DatabaseError::Constraint { .. } => RestError::bad_request(message),
        other => RestError::from(other),
    }
}

/// Path ids are opaque strings on the wire
pub(crate) fn path_id(raw: String) -> ApiId {
    ApiId::from_string(raw)
}
