//! SeaORM implementations of the repository interfaces

pub mod booking_repository;
pub mod chat_room_repository;
pub mod coach_repository;
pub mod invitation_repository;
pub mod repository_factory;
pub mod tournament_repository;
pub mod user_repository;
pub mod venue_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use chat_room_repository::SeaOrmChatRoomRepository;
pub use coach_repository::SeaOrmCoachRepository;
pub use invitation_repository::SeaOrmInvitationRepository;
pub use repository_factory::SeaOrmRepositoryFactory;
pub use tournament_repository::SeaOrmTournamentRepository;
pub use user_repository::SeaOrmUserRepository;
pub use venue_repository::SeaOrmVenueRepository;

use sea_orm::{DbErr, SqlErr};
use sportsconnect_api_types::ApiId;
use sportsconnect_interfaces::DatabaseError;

/// Map a SeaORM error, surfacing unique-key violations as constraint errors
pub(crate) fn map_db_err(context: &str, err: DbErr) -> DatabaseError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => DatabaseError::Constraint {
            message: format!("{}: {}", context, detail),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => DatabaseError::Constraint {
            message: format!("{}: {}", context, detail),
        },
        _ => DatabaseError::Internal {
            message: format!("{}: {}", context, err),
        },
    }
}

/// Parse an API id into a row id; ids that are not integers cannot match a row
pub(crate) fn row_id(id: &ApiId) -> Option<i32> {
    id.as_i32()
}

/// Like [`row_id`] but for operations that require the row to exist
pub(crate) fn require_row_id(entity: &str, id: &ApiId) -> Result<i32, DatabaseError> {
    row_id(id).ok_or_else(|| DatabaseError::not_found(entity, id))
}
