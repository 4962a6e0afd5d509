//! # SportsConnect Interfaces
//!
//! Traits at the seams between the HTTP layer and the outside world:
//! the database, the email provider, the maps provider and the Google
//! identity service. Handlers depend only on these traits so that tests can
//! swap in in-memory or recording implementations.

pub mod database;
pub mod geo;
pub mod identity;
pub mod notification;

// Re-export commonly used types
pub use database::{
    BookingRepository, ChatRoomRepository, CoachCredentials, CoachRepository, DatabaseError, InvitationRepository,
    Repository, RepositoryFactory, TournamentRepository, UserCredentials, UserRepository, VenueRepository,
};
pub use geo::{Geocoder, GeocodingError, RouteEstimate, RouteMeasure};
pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use notification::{EmailMessage, Mailer, NotificationError};
