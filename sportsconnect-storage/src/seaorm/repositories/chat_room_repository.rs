//! Chat rooms and their participant lists

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use sportsconnect_api_types::{ApiId, ChatRoom, GeoPoint, NewChatRoom};
use sportsconnect_interfaces::{ChatRoomRepository, DatabaseError, Repository};

use super::{map_db_err, require_row_id, row_id};
use crate::seaorm::{
    connection::DatabaseConnection,
    entities::{chat_room_participants, chat_rooms, ChatRoomParticipants, ChatRooms},
};

/// SeaORM implementation of the ChatRoomRepository
#[derive(Clone)]
pub struct SeaOrmChatRoomRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmChatRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(model: chat_rooms::Model, participants: Vec<ApiId>) -> ChatRoom {
        ChatRoom {
            id: ApiId::from_i32(model.id),
            participants,
            game: model.game,
            time: model.time,
            location: GeoPoint {
                latitude: model.latitude,
                longitude: model.longitude,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    /// Participant ids of the given rooms in join order
    async fn participants_of(&self, room_ids: Vec<i32>) -> Result<HashMap<i32, Vec<ApiId>>, DatabaseError> {
        let rows = ChatRoomParticipants::find()
            .filter(chat_room_participants::Column::ChatRoomId.is_in(room_ids))
            .order_by_asc(chat_room_participants::Column::JoinedAt)
            .order_by_asc(chat_room_participants::Column::UserId)
            .all(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to load chat room participants", e))?;

        let mut grouped: HashMap<i32, Vec<ApiId>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.chat_room_id)
                .or_default()
                .push(ApiId::from_i32(row.user_id));
        }
        Ok(grouped)
    }

    async fn load(&self, row: i32) -> Result<Option<ChatRoom>, DatabaseError> {
        let Some(model) = ChatRooms::find_by_id(row)
            .one(self.db.get_connection())
            .await
            .map_err(|e| map_db_err("Failed to find chat room", e))?
        else {
            return Ok(None);
        };

        let mut participants = self.participants_of(vec![row]).await?;
        let members = participants.remove(&row).unwrap_or_default();
        Ok(Some(Self::to_domain(model, members)))
    }
}

#[async_trait]
impl Repository for SeaOrmChatRoomRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ChatRoomRepository for SeaOrmChatRoomRepository {
    async fn create(&self, room: NewChatRoom) -> Result<ChatRoom, DatabaseError> {
        let mut members: Vec<i32> = Vec::with_capacity(room.participants.len());
        for participant in &room.participants {
            let id = require_row_id("User", participant)?;
            if !members.contains(&id) {
                members.push(id);
            }
        }

        let now = Utc::now();
        let txn = self
            .db
            .get_connection()
            .begin()
            .await
            .map_err(|e| map_db_err("Failed to begin transaction", e))?;

        let model = chat_rooms::ActiveModel {
            game: Set(room.game),
            time: Set(room.time),
            latitude: Set(room.location.latitude),
            longitude: Set(room.location.longitude),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_db_err("Failed to create chat room", e))?;

        for user_id in &members {
            chat_room_participants::ActiveModel {
                chat_room_id: Set(model.id),
                user_id: Set(*user_id),
                joined_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("Failed to add chat room participant", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err("Failed to commit chat room", e))?;

        debug!("Created chat room {} with {} participants", model.id, members.len());
        Ok(Self::to_domain(model, members.into_iter().map(ApiId::from_i32).collect()))
    }

    async fn find_by_id(&self, id: &ApiId) -> Result<Option<ChatRoom>, DatabaseError> {
        match row_id(id) {
            Some(row) => self.load(row).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ApiId) -> Result<(), DatabaseError> {
        let row = require_row_id("ChatRoom", id)?;
        let txn = self
            .db
            .get_connection()
            .begin()
            .await
            .map_err(|e| map_db_err("Failed to begin transaction", e))?;

        ChatRoomParticipants::delete_many()
            .filter(chat_room_participants::Column::ChatRoomId.eq(row))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("Failed to remove chat room participants", e))?;

        let result = ChatRooms::delete_by_id(row)
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("Failed to delete chat room", e))?;
        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("ChatRoom", id));
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err("Failed to commit chat room removal", e))?;
        debug!("Deleted chat room {}", row);
        Ok(())
    }

    async fn add_participant(&self, id: &ApiId, user_id: &ApiId) -> Result<ChatRoom, DatabaseError> {
        let row = require_row_id("ChatRoom", id)?;
        let user = require_row_id("User", user_id)?;
        let db = self.db.get_connection();

        let room = ChatRooms::find_by_id(row)
            .one(db)
            .await
            .map_err(|e| map_db_err("Failed to find chat room", e))?
            .ok_or_else(|| DatabaseError::not_found("ChatRoom", id))?;

        // A concurrent join of the same user lands on the primary key and is skipped
        let now = Utc::now();
        let inserted = ChatRoomParticipants::insert(chat_room_participants::ActiveModel {
            chat_room_id: Set(row),
            user_id: Set(user),
            joined_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                chat_room_participants::Column::ChatRoomId,
                chat_room_participants::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| map_db_err("Failed to add chat room participant", e))?;

        if inserted > 0 {
            let mut active = room.into_active_model();
            active.updated_at = Set(now);
            active
                .update(db)
                .await
                .map_err(|e| map_db_err("Failed to touch chat room", e))?;
        }

        self.load(row)
            .await?
            .ok_or_else(|| DatabaseError::not_found("ChatRoom", id))
    }

    async fn list_for_user(&self, user_id: &ApiId) -> Result<Vec<ChatRoom>, DatabaseError> {
        let Some(user) = row_id(user_id) else {
            return Ok(Vec::new());
        };
        let db = self.db.get_connection();

        let room_ids: Vec<i32> = ChatRoomParticipants::find()
            .filter(chat_room_participants::Column::UserId.eq(user))
            .all(db)
            .await
            .map_err(|e| map_db_err("Failed to list chat room memberships", e))?
            .into_iter()
            .map(|row| row.chat_room_id)
            .collect();

        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rooms = ChatRooms::find()
            .filter(chat_rooms::Column::Id.is_in(room_ids.clone()))
            .order_by_desc(chat_rooms::Column::CreatedAt)
            .order_by_desc(chat_rooms::Column::Id)
            .all(db)
            .await
            .map_err(|e| map_db_err("Failed to list chat rooms", e))?;

        let mut participants = self.participants_of(room_ids).await?;
        Ok(rooms
            .into_iter()
            .map(|room| {
                let members = participants.remove(&room.id).unwrap_or_default();
                Self::to_domain(room, members)
            })
            .collect())
    }
}
