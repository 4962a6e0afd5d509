use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

use sportsconnect_api_types::{ApiId, Coach, CoachUpdate, NewCoach};
use sportsconnect_interfaces::{CoachCredentials, CoachRepository, DatabaseError, Repository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{coaches, Coaches},
};

/// SeaORM implementation of the CoachRepository
#[derive(Clone)]
pub struct SeaOrmCoachRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCoachRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: coaches::Model) -> Coach {
        Coach {
            id: ApiId::from_i32(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            specialization: model.specialization,
            experience: model.experience,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    async fn find_by_email_model(&self, email: &str) -> Result<Option<coaches::Model>, DatabaseError> {
        Coaches::find()
            .filter(coaches::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find coach by email", e))
    }
}

#[async_trait]
impl Repository for SeaOrmCoachRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CoachRepository for SeaOrmCoachRepository {
    async fn create_coach(&self, coach: NewCoach) -> Result<Coach, DatabaseError> {
        let now = Utc::now();
        let active_model = coaches::ActiveModel {
            name: Set(coach.name),
            email: Set(coach.email),
            password_hash: Set(coach.password_hash),
            phone: Set(coach.phone),
            specialization: Set(coach.specialization),
            experience: Set(coach.experience),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to create coach", e))?;

        Ok(Self::to_domain(model))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Coach>, DatabaseError> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };

        let coach = Coaches::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find coach by id", e))?;

        Ok(coach.map(Self::to_domain))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Coach>, DatabaseError> {
        Ok(self.find_by_email_model(email).await?.map(Self::to_domain))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<CoachCredentials>, DatabaseError> {
        Ok(self.find_by_email_model(email).await?.map(|model| {
            let password_hash = model.password_hash.clone();
            CoachCredentials {
                coach: Self::to_domain(model),
                password_hash,
            }
        }))
    }

    async fn update_profile(&self, id: &ApiId, update: CoachUpdate) -> Result<Coach, DatabaseError> {
        let row = require_row_id("Coach", id)?;
        let model = Coaches::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find coach", e))?
            .ok_or_else(|| DatabaseError::not_found("Coach", id))?;

        let mut active = model.into_active_model();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(phone);
        }
        if let Some(specialization) = update.specialization {
            active.specialization = Set(specialization);
        }
        if let Some(experience) = update.experience {
            active.experience = Set(experience);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to update coach", e))?;

        Ok(Self::to_domain(model))
    }
}
