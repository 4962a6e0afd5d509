//! Database repository interfaces
//!
//! One trait per aggregate. Implementations live in `sportsconnect-storage`;
//! the REST layer only sees these contracts through [`RepositoryFactory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sportsconnect_api_types::{
    ApiId, Booking, BoundingBox, ChatRoom, Coach, CoachUpdate, GameInvitation, NewChatRoom, NewCoach,
    NewInvitation, NewTournament, NewUser, NewVenue, Tournament, TournamentUpdate, User, UserUpdate, Venue,
    VenueUpdate,
};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        DatabaseError::Internal {
            message: err.to_string(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

// =============================================================================
// Users
// =============================================================================

/// A user together with the secret material needed to authenticate them
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Repository {
    /// Insert a new user. Fails with `Constraint` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Look up a user and their password hash for login
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError>;

    /// Apply a partial profile update
    async fn update_profile(&self, id: &ApiId, update: UserUpdate) -> Result<User, DatabaseError>;

    async fn update_password(&self, id: &ApiId, password_hash: &str) -> Result<(), DatabaseError>;

    /// Store the hashed reset token and its expiry
    async fn set_reset_token(
        &self,
        id: &ApiId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError>;

    /// Find the user holding `token_hash` whose token expires after `now`
    async fn find_by_reset_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>, DatabaseError>;

    /// Replace the password and clear the reset token in one write
    async fn complete_password_reset(&self, id: &ApiId, password_hash: &str) -> Result<(), DatabaseError>;

    /// Users ordered by coins descending
    async fn leaderboard(&self, limit: u64) -> Result<Vec<User>, DatabaseError>;

    /// Users with stored coordinates inside `bbox`
    async fn find_within(&self, bbox: &BoundingBox) -> Result<Vec<User>, DatabaseError>;

    /// Users whose favorite games include `game` (case-insensitive)
    async fn find_by_game(&self, game: &str) -> Result<Vec<User>, DatabaseError>;
}

// =============================================================================
// Coaches
// =============================================================================

#[derive(Debug, Clone)]
pub struct CoachCredentials {
    pub coach: Coach,
    pub password_hash: String,
}

#[async_trait]
pub trait CoachRepository: Repository {
    async fn create_coach(&self, coach: NewCoach) -> Result<Coach, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Coach>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Coach>, DatabaseError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<CoachCredentials>, DatabaseError>;

    async fn update_profile(&self, id: &ApiId, update: CoachUpdate) -> Result<Coach, DatabaseError>;
}

// =============================================================================
// Tournaments
// =============================================================================

#[async_trait]
pub trait TournamentRepository: Repository {
    async fn create(&self, tournament: NewTournament) -> Result<Tournament, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Tournament>, DatabaseError>;

    /// All tournaments, soonest first
    async fn list(&self) -> Result<Vec<Tournament>, DatabaseError>;

    /// Tournaments hosted by one coach, soonest first
    async fn list_by_host(&self, host_id: &ApiId) -> Result<Vec<Tournament>, DatabaseError>;

    async fn update(&self, id: &ApiId, update: TournamentUpdate) -> Result<Tournament, DatabaseError>;

    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError>;
}

// =============================================================================
// Venues and bookings
// =============================================================================

#[async_trait]
pub trait VenueRepository: Repository {
    async fn create(&self, venue: NewVenue) -> Result<Venue, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Venue>, DatabaseError>;

    async fn list(&self) -> Result<Vec<Venue>, DatabaseError>;

    async fn update(&self, id: &ApiId, update: VenueUpdate) -> Result<Venue, DatabaseError>;

    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError>;

    /// Atomically remove `slot` from the venue's available slots.
    ///
    /// Returns `Ok(None)` when the slot is not (or no longer) available, so two
    /// concurrent callers cannot both claim it.
    async fn take_slot(&self, id: &ApiId, slot: &str) -> Result<Option<Venue>, DatabaseError>;
}

#[async_trait]
pub trait BookingRepository: Repository {
    async fn record(&self, venue_id: &ApiId, user_id: &ApiId, slot: &str) -> Result<Booking, DatabaseError>;

    async fn list_for_user(&self, user_id: &ApiId) -> Result<Vec<Booking>, DatabaseError>;
}

// =============================================================================
// Invitations and chat rooms
// =============================================================================

#[async_trait]
pub trait InvitationRepository: Repository {
    async fn create(&self, invitation: NewInvitation) -> Result<GameInvitation, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<GameInvitation>, DatabaseError>;

    /// Link `chat_room_id` unless a room is already linked.
    ///
    /// Returns the room that is linked afterwards, which is the earlier room
    /// when another acceptance got there first.
    async fn attach_chat_room(&self, id: &ApiId, chat_room_id: &ApiId) -> Result<ApiId, DatabaseError>;
}

#[async_trait]
pub trait ChatRoomRepository: Repository {
    async fn create(&self, room: NewChatRoom) -> Result<ChatRoom, DatabaseError>;

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<ChatRoom>, DatabaseError>;

    /// Remove a room and its memberships
    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError>;

    /// Add a participant; adding an existing participant is a no-op
    async fn add_participant(&self, id: &ApiId, user_id: &ApiId) -> Result<ChatRoom, DatabaseError>;

    /// Rooms the user participates in, newest first
    async fn list_for_user(&self, user_id: &ApiId) -> Result<Vec<ChatRoom>, DatabaseError>;
}

// =============================================================================
// Factory
// =============================================================================

/// Access to every repository through one handle
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn user_repository(&self) -> &dyn UserRepository;

    fn coach_repository(&self) -> &dyn CoachRepository;

    fn tournament_repository(&self) -> &dyn TournamentRepository;

    fn venue_repository(&self) -> &dyn VenueRepository;

    fn booking_repository(&self) -> &dyn BookingRepository;

    fn invitation_repository(&self) -> &dyn InvitationRepository;

    fn chat_room_repository(&self) -> &dyn ChatRoomRepository;

    /// Check health of all repositories
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
