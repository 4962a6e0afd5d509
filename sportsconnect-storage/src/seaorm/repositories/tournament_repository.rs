use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set};

use sportsconnect_api_types::{ApiId, NewTournament, Tournament, TournamentUpdate};
use sportsconnect_interfaces::{DatabaseError, Repository, TournamentRepository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{tournaments, Tournaments},
};

/// SeaORM implementation of the TournamentRepository
#[derive(Clone)]
pub struct SeaOrmTournamentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTournamentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: tournaments::Model) -> Tournament {
        Tournament {
            id: ApiId::from_i32(model.id),
            title: model.title,
            description: model.description,
            location: model.location,
            date: model.date,
            banner: model.banner,
            hosted_by: ApiId::from_i32(model.hosted_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    async fn find_model(&self, id: &ApiId) -> Result<tournaments::Model, DatabaseError> {
        let row = require_row_id("Tournament", id)?;
        Tournaments::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find tournament", e))?
            .ok_or_else(|| DatabaseError::not_found("Tournament", id))
    }
}

#[async_trait]
impl Repository for SeaOrmTournamentRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TournamentRepository for SeaOrmTournamentRepository {
    async fn create(&self, tournament: NewTournament) -> Result<Tournament, DatabaseError> {
        let host = require_row_id("Coach", &tournament.hosted_by)?;
        let now = Utc::now();
        let active_model = tournaments::ActiveModel {
            title: Set(tournament.title),
            description: Set(tournament.description),
            location: Set(tournament.location),
            date: Set(tournament.date),
            banner: Set(tournament.banner),
            hosted_by: Set(host),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to create tournament", e))?;

        Ok(Self::to_domain(model))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<Tournament>, DatabaseError> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };

        let tournament = Tournaments::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find tournament by id", e))?;

        Ok(tournament.map(Self::to_domain))
    }

    async fn list(&self) -> Result<Vec<Tournament>, DatabaseError> {
        let tournaments = Tournaments::find()
            .order_by_asc(tournaments::Column::Date)
            .order_by_asc(tournaments::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to list tournaments", e))?;

        Ok(tournaments.into_iter().map(Self::to_domain).collect())
    }

    async fn list_by_host(&self, host_id: &ApiId) -> Result<Vec<Tournament>, DatabaseError> {
        let Some(host) = row_id(host_id) else {
            return Ok(Vec::new());
        };

        let tournaments = Tournaments::find()
            .filter(tournaments::Column::HostedBy.eq(host))
            .order_by_asc(tournaments::Column::Date)
            .order_by_asc(tournaments::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to list hosted tournaments", e))?;

        Ok(tournaments.into_iter().map(Self::to_domain).collect())
    }

    async fn update(&self, id: &ApiId, update: TournamentUpdate) -> Result<Tournament, DatabaseError> {
        let mut active = self.find_model(id).await?.into_active_model();

        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(location) = update.location {
            active.location = Set(location);
        }
        if let Some(date) = update.date {
            active.date = Set(date);
        }
        if let Some(banner) = update.banner {
            active.banner = Set(banner);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to update tournament", e))?;

        Ok(Self::to_domain(model))
    }

    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError> {
        let row = require_row_id("Tournament", id)?;
        let result = Tournaments::delete_by_id(row)
            .exec(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to delete tournament", e))?;

        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("Tournament", id));
        }
        Ok(())
    }
}
