use crate::{ApiId, GeoPoint, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Accounts
// =============================================================================

/// A player, coach-role user or administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
    pub role: UserRole,
    pub coins: i64,
    pub achievements: Vec<String>,
    pub favorite_games: Vec<String>,
    pub profile_image: Option<String>,
    /// Free-text address as entered by the user
    pub location: String,
    /// Last known coordinates, used by nearby-player matching
    pub coordinates: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Password hash and reset token never leave the storage layer
}

impl User {
    /// Whether `game` is one of this user's favorite games (case-insensitive)
    pub fn plays(&self, game: &str) -> bool {
        let game = game.trim();
        self.favorite_games.iter().any(|g| g.trim().eq_ignore_ascii_case(game))
    }

    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
            favorite_games: self.favorite_games.clone(),
            achievements: self.achievements.clone(),
            coins: self.coins,
            role: self.role,
            location: self.location.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Projection of a user returned by profile and leaderboard endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub favorite_games: Vec<String>,
    pub achievements: Vec<String>,
    pub coins: i64,
    pub role: UserRole,
    pub location: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
    pub role: UserRole,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub favorite_games: Option<Vec<String>>,
    pub location: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

/// A coach account, registered separately from users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCoach {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub specialization: String,
    pub experience: String,
}

#[derive(Debug, Clone, Default)]
pub struct CoachUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
}

// =============================================================================
// Tournaments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    /// Image URL or base64 payload
    pub banner: String,
    /// Coach that hosts the tournament
    pub hosted_by: ApiId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTournament {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub banner: String,
    pub hosted_by: ApiId,
}

#[derive(Debug, Clone, Default)]
pub struct TournamentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub banner: Option<String>,
}

// =============================================================================
// Venues and bookings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub image: String,
    pub location: String,
    pub price: String,
    pub facilities: Vec<String>,
    pub rating: f64,
    pub reviews: Vec<String>,
    pub available_slots: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewVenue {
    pub name: String,
    pub image: String,
    pub location: String,
    pub price: String,
    pub facilities: Vec<String>,
    pub rating: f64,
    pub reviews: Vec<String>,
    pub available_slots: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub facilities: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub reviews: Option<Vec<String>>,
    pub available_slots: Option<Vec<String>>,
}

/// A confirmed booking of one venue slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub venue_id: ApiId,
    pub user_id: ApiId,
    pub slot: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Nearby-player invitations and chat rooms
// =============================================================================

/// Record of one "find nearby players" fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInvitation {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub host_id: ApiId,
    pub game: String,
    pub time: String,
    pub address: String,
    pub location: GeoPoint,
    /// Radius that produced the match
    pub radius_km: f64,
    pub invitees: Vec<ApiId>,
    pub chat_room_id: Option<ApiId>,
    pub created_at: DateTime<Utc>,
}

impl GameInvitation {
    pub fn is_invited(&self, user_id: &ApiId) -> bool {
        self.invitees.contains(user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub host_id: ApiId,
    pub game: String,
    pub time: String,
    pub address: String,
    pub location: GeoPoint,
    pub radius_km: f64,
    pub invitees: Vec<ApiId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub participants: Vec<ApiId>,
    pub game: String,
    pub time: Option<String>,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatRoom {
    pub participants: Vec<ApiId>,
    pub game: String,
    pub time: Option<String>,
    pub location: GeoPoint,
}
