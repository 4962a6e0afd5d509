//! User repository implementation using SeaORM

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::debug;

use sportsconnect_api_types::{ApiId, BoundingBox, GeoPoint, NewUser, User, UserUpdate};
use sportsconnect_interfaces::{DatabaseError, Repository, UserCredentials, UserRepository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{json_to_strings, strings_to_json, users, Users},
};

/// SeaORM implementation of the UserRepository
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Convert SeaORM user model to the domain type
    pub(crate) fn to_domain(model: users::Model) -> User {
        let coordinates = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        };

        User {
            id: ApiId::from_i32(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            specialization: model.specialization,
            experience: model.experience,
            role: model.role.into(),
            coins: model.coins,
            achievements: json_to_strings(&model.achievements),
            favorite_games: json_to_strings(&model.favorite_games),
            profile_image: model.profile_image,
            location: model.location,
            coordinates,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    async fn find_model(&self, id: &ApiId) -> Result<users::Model, DatabaseError> {
        let row = require_row_id("User", id)?;
        Users::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find user", e))?
            .ok_or_else(|| DatabaseError::not_found("User", id))
    }

    /// Users with stored coordinates
    fn located() -> sea_orm::Select<users::Entity> {
        Users::find()
            .filter(users::Column::Latitude.is_not_null())
            .filter(users::Column::Longitude.is_not_null())
    }
}

#[async_trait]
impl Repository for SeaOrmUserRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let active_model = users::ActiveModel {
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            phone: Set(user.phone),
            specialization: Set(user.specialization),
            experience: Set(user.experience),
            role: Set(user.role.into()),
            coins: Set(0),
            achievements: Set(strings_to_json(&[])),
            favorite_games: Set(strings_to_json(&[])),
            profile_image: Set(None),
            location: Set(String::new()),
            latitude: Set(None),
            longitude: Set(None),
            reset_token: Set(None),
            reset_token_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to create user", e))?;

        debug!("Created user {}", model.id);
        Ok(Self::to_domain(model))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<User>, DatabaseError> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };

        let user = Users::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find user by id", e))?;

        Ok(user.map(Self::to_domain))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find user by email", e))?;

        Ok(user.map(Self::to_domain))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find user credentials", e))?;

        Ok(user.map(|model| {
            let password_hash = model.password_hash.clone();
            UserCredentials {
                user: Self::to_domain(model),
                password_hash,
            }
        }))
    }

    async fn update_profile(&self, id: &ApiId, update: UserUpdate) -> Result<User, DatabaseError> {
        let mut active = self.find_model(id).await?.into_active_model();

        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(profile_image) = update.profile_image {
            active.profile_image = Set(Some(profile_image));
        }
        if let Some(games) = update.favorite_games {
            active.favorite_games = Set(strings_to_json(&games));
        }
        if let Some(location) = update.location {
            active.location = Set(location);
        }
        if let Some(point) = update.coordinates {
            active.latitude = Set(Some(point.latitude));
            active.longitude = Set(Some(point.longitude));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to update user", e))?;

        Ok(Self::to_domain(model))
    }

    async fn update_password(&self, id: &ApiId, password_hash: &str) -> Result<(), DatabaseError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(Utc::now());

        active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to update password", e))?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: &ApiId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.reset_token = Set(Some(token_hash.to_string()));
        active.reset_token_expires = Set(Some(expires_at));

        active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to store reset token", e))?;
        Ok(())
    }

    async fn find_by_reset_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>, DatabaseError> {
        let user = Users::find()
            .filter(users::Column::ResetToken.eq(token_hash))
            .filter(users::Column::ResetTokenExpires.gt(now))
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find user by reset token", e))?;

        Ok(user.map(Self::to_domain))
    }

    async fn complete_password_reset(&self, id: &ApiId, password_hash: &str) -> Result<(), DatabaseError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.password_hash = Set(password_hash.to_string());
        active.reset_token = Set(None);
        active.reset_token_expires = Set(None);
        active.updated_at = Set(Utc::now());

        active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to reset password", e))?;
        Ok(())
    }

    async fn leaderboard(&self, limit: u64) -> Result<Vec<User>, DatabaseError> {
        let users = Users::find()
            .order_by_desc(users::Column::Coins)
            .order_by_asc(users::Column::Id)
            .limit(limit)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to load leaderboard", e))?;

        Ok(users.into_iter().map(Self::to_domain).collect())
    }

    async fn find_within(&self, bbox: &BoundingBox) -> Result<Vec<User>, DatabaseError> {
        let mut query = Self::located().filter(users::Column::Latitude.between(bbox.min_latitude, bbox.max_latitude));

        if let Some((min_lon, max_lon)) = bbox.longitude_range {
            query = query.filter(users::Column::Longitude.between(min_lon, max_lon));
        }

        let users = query
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to query users by area", e))?;

        debug!("Bounding box matched {} users", users.len());
        Ok(users.into_iter().map(Self::to_domain).collect())
    }

    async fn find_by_game(&self, game: &str) -> Result<Vec<User>, DatabaseError> {
        let game = game.trim();
        if game.is_empty() {
            return Ok(Vec::new());
        }

        // LIKE is a case-insensitive prefilter over the JSON text; `plays` is the exact test
        let users = Users::find()
            .filter(users::Column::FavoriteGames.contains(game))
            .order_by_asc(users::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to query users by game", e))?;

        Ok(users
            .into_iter()
            .map(Self::to_domain)
            .filter(|user| user.plays(game))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sportsconnect_api_types::UserRole;

    async fn repo() -> SeaOrmUserRepository {
        SeaOrmUserRepository::new(DatabaseConnection::in_memory().await.unwrap())
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            ..NewUser::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = repo().await;
        let user = repo.create_user(new_user("Asha", "asha@example.com")).await.unwrap();

        assert_eq!(user.role, UserRole::Player);
        assert_eq!(user.coins, 0);
        assert!(user.favorite_games.is_empty());

        let found = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "asha@example.com");

        let creds = repo.find_credentials("asha@example.com").await.unwrap().unwrap();
        assert_eq!(creds.password_hash, "hash");
        assert!(repo.find_by_id(&ApiId::from("not-a-number")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_error() {
        let repo = repo().await;
        repo.create_user(new_user("A", "dup@example.com")).await.unwrap();
        let err = repo.create_user(new_user("B", "dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint { .. }));
    }

    #[tokio::test]
    async fn test_partial_profile_update() {
        let repo = repo().await;
        let user = repo.create_user(new_user("Asha", "asha@example.com")).await.unwrap();

        let updated = repo
            .update_profile(
                &user.id,
                UserUpdate {
                    favorite_games: Some(vec!["Football".to_string()]),
                    coordinates: Some(GeoPoint::new(18.52, 73.85).unwrap()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Asha");
        assert_eq!(updated.favorite_games, vec!["Football".to_string()]);
        assert_eq!(updated.coordinates.unwrap().latitude, 18.52);

        let missing = repo.update_profile(&ApiId::from(999), UserUpdate::default()).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reset_token_lifecycle() {
        let repo = repo().await;
        let user = repo.create_user(new_user("Asha", "asha@example.com")).await.unwrap();
        let now = Utc::now();

        repo.set_reset_token(&user.id, "tokenhash", now + Duration::hours(1)).await.unwrap();
        assert!(repo.find_by_reset_token("tokenhash", now).await.unwrap().is_some());
        assert!(repo
            .find_by_reset_token("tokenhash", now + Duration::hours(2))
            .await
            .unwrap()
            .is_none());

        repo.complete_password_reset(&user.id, "newhash").await.unwrap();
        assert!(repo.find_by_reset_token("tokenhash", now).await.unwrap().is_none());
        let creds = repo.find_credentials("asha@example.com").await.unwrap().unwrap();
        assert_eq!(creds.password_hash, "newhash");
    }

    #[tokio::test]
    async fn test_find_within_uses_bounding_box() {
        let repo = repo().await;
        let center = GeoPoint::new(18.5204, 73.8567).unwrap();

        let near = repo.create_user(new_user("Near", "near@example.com")).await.unwrap();
        repo.update_profile(
            &near.id,
            UserUpdate {
                coordinates: Some(GeoPoint::new(18.53, 73.86).unwrap()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();

        let far = repo.create_user(new_user("Far", "far@example.com")).await.unwrap();
        repo.update_profile(
            &far.id,
            UserUpdate {
                coordinates: Some(GeoPoint::new(19.07, 72.87).unwrap()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();

        // No coordinates at all
        repo.create_user(new_user("Nowhere", "nowhere@example.com")).await.unwrap();

        let found = repo.find_within(&BoundingBox::around(&center, 7.0)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, near.id);
    }

    #[tokio::test]
    async fn test_find_by_game_is_exact_and_case_insensitive() {
        let repo = repo().await;

        for (email, games) in [
            ("a@example.com", vec!["Football", "Chess"]),
            ("b@example.com", vec!["Table Football"]),
            ("c@example.com", vec!["football"]),
        ] {
            let user = repo.create_user(new_user(email, email)).await.unwrap();
            repo.update_profile(
                &user.id,
                UserUpdate {
                    favorite_games: Some(games.into_iter().map(str::to_string).collect()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();
        }

        let players = repo.find_by_game("FOOTBALL").await.unwrap();
        let emails: Vec<_> = players.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a@example.com", "c@example.com"]);
        assert!(repo.find_by_game(" ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leaderboard_orders_by_coins() {
        let repo = repo().await;
        let db = repo.db.get_connection();

        for (i, coins) in [5_i64, 50, 20].iter().enumerate() {
            let user = repo
                .create_user(new_user(&format!("P{}", i), &format!("p{}@example.com", i)))
                .await
                .unwrap();
            let mut active = Users::find_by_id(user.id.as_i32().unwrap())
                .one(db)
                .await
                .unwrap()
                .unwrap()
                .into_active_model();
            active.coins = Set(*coins);
            active.update(db).await.unwrap();
        }

        let board = repo.leaderboard(2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].coins, 50);
        assert_eq!(board[1].coins, 20);
    }
}
