//! User accounts: players, coach-role users and administrators

use sea_orm::entity::prelude::*;
use sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,
    /// Password hash (bcrypt)
    pub password_hash: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
    pub role: UserRole,
    pub coins: i64,
    /// JSON array of strings
    pub achievements: Json,
    /// JSON array of strings
    pub favorite_games: Json,
    pub profile_image: Option<String>,
    /// Free-text address
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// sha256 of the emailed reset token
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::invitations::Entity")]
    Invitations,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::invitations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invitations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "player")]
    #[default]
    Player,
    #[sea_orm(string_value = "coach")]
    Coach,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<sportsconnect_api_types::UserRole> for UserRole {
    fn from(role: sportsconnect_api_types::UserRole) -> Self {
        match role {
            sportsconnect_api_types::UserRole::Player => UserRole::Player,
            sportsconnect_api_types::UserRole::Coach => UserRole::Coach,
            sportsconnect_api_types::UserRole::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for sportsconnect_api_types::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Player => sportsconnect_api_types::UserRole::Player,
            UserRole::Coach => sportsconnect_api_types::UserRole::Coach,
            UserRole::Admin => sportsconnect_api_types::UserRole::Admin,
        }
    }
}
