//! Domain types for the SportsConnect API
//!
//! These types are shared by the storage, web and REST crates so that every
//! layer speaks the same vocabulary for users, coaches, venues, tournaments
//! and the nearby-player invitation flow.

pub mod domain;
pub mod enums;
pub mod errors;
pub mod geo;
pub mod ids;

// Re-export main types for convenience
pub use domain::{
    Booking, ChatRoom, Coach, CoachUpdate, GameInvitation, NewChatRoom, NewCoach, NewInvitation, NewTournament,
    NewUser, NewVenue, PublicProfile, Tournament, TournamentUpdate, User, UserUpdate, Venue, VenueUpdate,
};
pub use enums::{AccountKind, UserRole};
pub use errors::ApiError;
pub use geo::{haversine_km, BoundingBox, GeoError, GeoPoint, EARTH_RADIUS_KM};
pub use ids::ApiId;
