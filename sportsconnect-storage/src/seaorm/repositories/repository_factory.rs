use async_trait::async_trait;

use sportsconnect_interfaces::{
    BookingRepository, ChatRoomRepository, CoachRepository, DatabaseError, InvitationRepository, RepositoryFactory,
    TournamentRepository, UserRepository, VenueRepository,
};

use super::{
    SeaOrmBookingRepository, SeaOrmChatRoomRepository, SeaOrmCoachRepository, SeaOrmInvitationRepository,
    SeaOrmTournamentRepository, SeaOrmUserRepository, SeaOrmVenueRepository,
};
use crate::seaorm::connection::DatabaseConnection;

/// Repository factory backed by one SeaORM connection pool
#[derive(Clone)]
pub struct SeaOrmRepositoryFactory {
    db: DatabaseConnection,
    user_repository: SeaOrmUserRepository,
    coach_repository: SeaOrmCoachRepository,
    tournament_repository: SeaOrmTournamentRepository,
    venue_repository: SeaOrmVenueRepository,
    booking_repository: SeaOrmBookingRepository,
    invitation_repository: SeaOrmInvitationRepository,
    chat_room_repository: SeaOrmChatRoomRepository,
}

impl SeaOrmRepositoryFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repository: SeaOrmUserRepository::new(db.clone()),
            coach_repository: SeaOrmCoachRepository::new(db.clone()),
            tournament_repository: SeaOrmTournamentRepository::new(db.clone()),
            venue_repository: SeaOrmVenueRepository::new(db.clone()),
            booking_repository: SeaOrmBookingRepository::new(db.clone()),
            invitation_repository: SeaOrmInvitationRepository::new(db.clone()),
            chat_room_repository: SeaOrmChatRoomRepository::new(db.clone()),
            db,
        }
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RepositoryFactory for SeaOrmRepositoryFactory {
    fn user_repository(&self) -> &dyn UserRepository {
        &self.user_repository
    }

    fn coach_repository(&self) -> &dyn CoachRepository {
        &self.coach_repository
    }

    fn tournament_repository(&self) -> &dyn TournamentRepository {
        &self.tournament_repository
    }

    fn venue_repository(&self) -> &dyn VenueRepository {
        &self.venue_repository
    }

    fn booking_repository(&self) -> &dyn BookingRepository {
        &self.booking_repository
    }

    fn invitation_repository(&self) -> &dyn InvitationRepository {
        &self.invitation_repository
    }

    fn chat_room_repository(&self) -> &dyn ChatRoomRepository {
        &self.chat_room_repository
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}
