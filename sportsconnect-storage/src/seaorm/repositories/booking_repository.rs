use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use sportsconnect_api_types::{ApiId, Booking};
use sportsconnect_interfaces::{BookingRepository, DatabaseError, Repository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{bookings, Bookings},
};

/// SeaORM implementation of the BookingRepository
#[derive(Clone)]
pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: bookings::Model) -> Booking {
        Booking {
            id: ApiId::from_i32(model.id),
            venue_id: ApiId::from_i32(model.venue_id),
            user_id: ApiId::from_i32(model.user_id),
            slot: model.slot,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl Repository for SeaOrmBookingRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn record(&self, venue_id: &ApiId, user_id: &ApiId, slot: &str) -> Result<Booking, DatabaseError> {
        let active_model = bookings::ActiveModel {
            venue_id: Set(require_row_id("Venue", venue_id)?),
            user_id: Set(require_row_id("User", user_id)?),
            slot: Set(slot.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to record booking", e))?;

        Ok(Self::to_domain(model))
    }

    async fn list_for_user(&self, user_id: &ApiId) -> Result<Vec<Booking>, DatabaseError> {
        let Some(user) = row_id(user_id) else {
            return Ok(Vec::new());
        };

        let bookings = Bookings::find()
            .filter(bookings::Column::UserId.eq(user))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to list bookings", e))?;

        Ok(bookings.into_iter().map(Self::to_domain).collect())
    }
}
