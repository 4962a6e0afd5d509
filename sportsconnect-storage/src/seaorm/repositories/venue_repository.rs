use async_trait::async_trait;
use sea_orm::{sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set};
use tracing::{debug, warn};

use sportsconnect_api_types::{ApiId, NewVenue, Venue, VenueUpdate};
use sportsconnect_interfaces::{DatabaseError, Repository, VenueRepository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{json_to_strings, strings_to_json, venues, Venues},
};

/// Attempts before giving up on a slot that keeps changing underneath us
const TAKE_SLOT_ATTEMPTS: usize = 3;

/// SeaORM implementation of the VenueRepository
#[derive(Clone)]
pub struct SeaOrmVenueRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: venues::Model) -> Venue {
        Venue {
            id: ApiId::from_i32(model.id),
            name: model.name,
            image: model.image,
            location: model.location,
            price: model.price,
            facilities: json_to_strings(&model.facilities),
            rating: model.rating,
            reviews: json_to_strings(&model.reviews),
            available_slots: json_to_strings(&model.available_slots),
        }
    }

    async fn find_model(&self, row: i32) -> Result<Option<venues::Model>, DatabaseError> {
        Venues::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find venue", e))
    }
}

#[async_trait]
impl Repository for SeaOrmVenueRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl VenueRepository for SeaOrmVenueRepository {
    async fn create(&self, venue: NewVenue) -> Result<Venue, DatabaseError> {
        let active_model = venues::ActiveModel {
            name: Set(venue.name),
            image: Set(venue.image),
            location: Set(venue.location),
            price: Set(venue.price),
            facilities: Set(strings_to_json(&venue.facilities)),
            rating: Set(venue.rating),
            reviews: Set(strings_to_json(&venue.reviews)),
            available_slots: Set(strings_to_json(&venue.available_slots)),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to create venue", e))?;

        Ok(Self::to_domain(model))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Venue>, DatabaseError> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };
        Ok(self.find_model(row).await?.map(Self::to_domain))
    }

    async fn list(&self) -> Result<Vec<Venue>, DatabaseError> {
        let venues = Venues::find()
            .order_by_asc(venues::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to list venues", e))?;

        Ok(venues.into_iter().map(Self::to_domain).collect())
    }

    async fn update(&self, id: &ApiId, update: VenueUpdate) -> Result<Venue, DatabaseError> {
        let row = require_row_id("Venue", id)?;
        let mut active = self
            .find_model(row)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Venue", id))?
            .into_active_model();

        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(image) = update.image {
            active.image = Set(image);
        }
        if let Some(location) = update.location {
            active.location = Set(location);
        }
        if let Some(price) = update.price {
            active.price = Set(price);
        }
        if let Some(facilities) = update.facilities {
            active.facilities = Set(strings_to_json(&facilities));
        }
        if let Some(rating) = update.rating {
            active.rating = Set(rating);
        }
        if let Some(reviews) = update.reviews {
            active.reviews = Set(strings_to_json(&reviews));
        }
        if let Some(slots) = update.available_slots {
            active.available_slots = Set(strings_to_json(&slots));
        }

        let model = active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to update venue", e))?;

        Ok(Self::to_domain(model))
    }

    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError> {
        let row = require_row_id("Venue", id)?;
        let result = Venues::delete_by_id(row)
            .exec(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to delete venue", e))?;

        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("Venue", id));
        }
        Ok(())
    }

    async fn take_slot(&self, id: &ApiId, slot: &str) -> Result<Option<Venue>, DatabaseError> {
        let row = require_row_id("Venue", id)?;

        for attempt in 1..=TAKE_SLOT_ATTEMPTS {
            let model = self
                .find_model(row)
                .await?
                .ok_or_else(|| DatabaseError::not_found("Venue", id))?;

            let mut slots = json_to_strings(&model.available_slots);
            let Some(position) = slots.iter().position(|s| s == slot) else {
                return Ok(None);
            };
            slots.remove(position);
            let remaining = strings_to_json(&slots);

            // Compare-and-swap on the slot list so two bookings cannot both win
            let result = Venues::update_many()
                .col_expr(venues::Column::AvailableSlots, Expr::value(remaining))
                .filter(venues::Column::Id.eq(row))
                .filter(venues::Column::AvailableSlots.eq(model.available_slots.clone()))
                .exec(self.db.get_connection())
                .await
                .map_err(|e| map_db_err("Failed to take venue slot", e))?;

            if result.rows_affected == 1 {
                debug!("Venue {} slot '{}' taken", row, slot);
                let mut venue = Self::to_domain(model);
                venue.available_slots = slots;
                return Ok(Some(venue));
            }

            warn!(
                "Venue {} changed while taking slot '{}' (attempt {}/{})",
                row, slot, attempt, TAKE_SLOT_ATTEMPTS
            );
        }

        Err(DatabaseError::Internal {
            message: format!("Venue {} kept changing while taking slot '{}'", row, slot),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turf() -> NewVenue {
        NewVenue {
            name: "City Turf".to_string(),
            image: "turf.png".to_string(),
            location: "Baner, Pune".to_string(),
            price: "800/hr".to_string(),
            facilities: vec!["Parking".to_string()],
            rating: 4.5,
            reviews: vec![],
            available_slots: vec!["6-7 AM".to_string(), "7-8 AM".to_string()],
        }
    }

    #[tokio::test]
    async fn test_take_slot_removes_it_once() {
        let repo = SeaOrmVenueRepository::new(DatabaseConnection::in_memory().await.unwrap());
        let venue = repo.create(turf()).await.unwrap();

        let booked = repo.take_slot(&venue.id, "6-7 AM").await.unwrap().unwrap();
        assert_eq!(booked.available_slots, vec!["7-8 AM".to_string()]);

        assert!(repo.take_slot(&venue.id, "6-7 AM").await.unwrap().is_none());
        assert!(repo.take_slot(&venue.id, "9-10 PM").await.unwrap().is_none());

        let stored = repo.find_by_id(&venue.id).await.unwrap().unwrap();
        assert_eq!(stored.available_slots, vec!["7-8 AM".to_string()]);
    }

    #[tokio::test]
    async fn test_take_slot_on_missing_venue() {
        let repo = SeaOrmVenueRepository::new(DatabaseConnection::in_memory().await.unwrap());
        let result = repo.take_slot(&ApiId::from(7), "6-7 AM").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_list_delete() {
        let repo = SeaOrmVenueRepository::new(DatabaseConnection::in_memory().await.unwrap());
        let venue = repo.create(turf()).await.unwrap();
        repo.create(NewVenue {
            name: "Arena".to_string(),
            ..turf()
        })
        .await
        .unwrap();

        let updated = repo
            .update(
                &venue.id,
                VenueUpdate {
                    rating: Some(4.8),
                    ..VenueUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rating, 4.8);
        assert_eq!(updated.facilities, vec!["Parking".to_string()]);
        assert_eq!(repo.list().await.unwrap().len(), 2);

        repo.delete(&venue.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(matches!(repo.delete(&venue.id).await, Err(DatabaseError::NotFound { .. })));
    }
}
