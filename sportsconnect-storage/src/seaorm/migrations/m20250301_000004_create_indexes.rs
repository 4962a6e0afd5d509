use super::m20250301_000001_create_accounts::Users;
use super::m20250301_000002_create_listings::{Bookings, Tournaments};
use super::m20250301_000003_create_matchmaking::{ChatRoomParticipants, Invitations};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Leaderboard ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_coins")
                    .table(Users::Table)
                    .col(Users::Coins)
                    .to_owned(),
            )
            .await?;

        // Bounding-box prefilter for nearby players
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_lat_lon")
                    .table(Users::Table)
                    .col(Users::Latitude)
                    .col(Users::Longitude)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_reset_token")
                    .table(Users::Table)
                    .col(Users::ResetToken)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tournaments_hosted_by_date")
                    .table(Tournaments::Table)
                    .col(Tournaments::HostedBy)
                    .col(Tournaments::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tournaments_date")
                    .table(Tournaments::Table)
                    .col(Tournaments::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookings_user_id")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_chat_room_participants_user_id")
                    .table(ChatRoomParticipants::Table)
                    .col(ChatRoomParticipants::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invitations_host_id")
                    .table(Invitations::Table)
                    .col(Invitations::HostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_invitations_host_id",
            "idx_chat_room_participants_user_id",
            "idx_bookings_user_id",
            "idx_tournaments_date",
            "idx_tournaments_hosted_by_date",
            "idx_users_reset_token",
            "idx_users_lat_lon",
            "idx_users_coins",
        ] {
            manager.drop_index(Index::drop().name(name).to_owned()).await?;
        }
        Ok(())
    }
}
