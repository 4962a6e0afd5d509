use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

use sportsconnect_api_types::{ApiId, GameInvitation, GeoPoint, NewInvitation};
use sportsconnect_interfaces::{DatabaseError, InvitationRepository, Repository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{ids_to_json, invitations, json_to_ids, Invitations},
};

/// SeaORM implementation of the InvitationRepository
#[derive(Clone)]
pub struct SeaOrmInvitationRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInvitationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: invitations::Model) -> GameInvitation {
        GameInvitation {
            id: ApiId::from_i32(model.id),
            host_id: ApiId::from_i32(model.host_id),
            game: model.game,
            time: model.time,
            address: model.address,
            location: GeoPoint {
                latitude: model.latitude,
                longitude: model.longitude,
            },
            radius_km: model.radius_km,
            invitees: json_to_ids(&model.invitees).into_iter().map(ApiId::from_i32).collect(),
            chat_room_id: model.chat_room_id.map(ApiId::from_i32),
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl Repository for SeaOrmInvitationRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl InvitationRepository for SeaOrmInvitationRepository {
    async fn create(&self, invitation: NewInvitation) -> Result<GameInvitation, DatabaseError> {
        let invitees: Vec<i32> = invitation.invitees.iter().filter_map(row_id).collect();

        let active_model = invitations::ActiveModel {
            host_id: Set(require_row_id("User", &invitation.host_id)?),
            game: Set(invitation.game),
            time: Set(invitation.time),
            address: Set(invitation.address),
            latitude: Set(invitation.location.latitude),
            longitude: Set(invitation.location.longitude),
            radius_km: Set(invitation.radius_km),
            invitees: Set(ids_to_json(&invitees)),
            chat_room_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to create invitation", e))?;

        Ok(Self::to_domain(model))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<GameInvitation>, DatabaseError> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };

        let invitation = Invitations::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find invitation", e))?;

        Ok(invitation.map(Self::to_domain))
    }

    async fn attach_chat_room(&self, id: &ApiId, chat_room_id: &ApiId) -> Result<ApiId, DatabaseError> {
        let row = require_row_id("Invitation", id)?;
        let room = require_row_id("ChatRoom", chat_room_id)?;

        // Only the first acceptance may link a room
        let result = Invitations::update_many()
            .col_expr(invitations::Column::ChatRoomId, Expr::value(room))
            .filter(invitations::Column::Id.eq(row))
            .filter(invitations::Column::ChatRoomId.is_null())
            .exec(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to attach chat room", e))?;

        if result.rows_affected == 1 {
            return Ok(chat_room_id.clone());
        }

        let linked = Invitations::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find invitation", e))?
            .ok_or_else(|| DatabaseError::not_found("Invitation", id))?
            .chat_room_id
            .ok_or_else(|| DatabaseError::Internal {
                message: format!("Invitation {} has no chat room after a lost attach", row),
            })?;

        debug!("Invitation {} already linked to chat room {}", row, linked);
        Ok(ApiId::from_i32(linked))
    }
}
