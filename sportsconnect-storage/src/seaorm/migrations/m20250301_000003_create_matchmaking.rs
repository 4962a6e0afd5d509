//! Chat rooms, their participants and nearby-player invitations

use super::m20250301_000001_create_accounts::Users;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatRooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChatRooms::Game).string().not_null())
                    .col(ColumnDef::new(ChatRooms::Time).string())
                    .col(ColumnDef::new(ChatRooms::Latitude).double().not_null().default(0.0))
                    .col(ColumnDef::new(ChatRooms::Longitude).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(ChatRooms::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(ChatRooms::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChatRoomParticipants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatRoomParticipants::ChatRoomId).integer().not_null())
                    .col(ColumnDef::new(ChatRoomParticipants::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(ChatRoomParticipants::JoinedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChatRoomParticipants::ChatRoomId)
                            .col(ChatRoomParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_participants_room")
                            .from(ChatRoomParticipants::Table, ChatRoomParticipants::ChatRoomId)
                            .to(ChatRooms::Table, ChatRooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_participants_user")
                            .from(ChatRoomParticipants::Table, ChatRoomParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invitations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invitations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invitations::HostId).integer().not_null())
                    .col(ColumnDef::new(Invitations::Game).string().not_null())
                    .col(ColumnDef::new(Invitations::Time).string().not_null())
                    .col(ColumnDef::new(Invitations::Address).string().not_null())
                    .col(ColumnDef::new(Invitations::Latitude).double().not_null())
                    .col(ColumnDef::new(Invitations::Longitude).double().not_null())
                    .col(ColumnDef::new(Invitations::RadiusKm).double().not_null())
                    .col(ColumnDef::new(Invitations::Invitees).json().not_null())
                    .col(ColumnDef::new(Invitations::ChatRoomId).integer())
                    .col(
                        ColumnDef::new(Invitations::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_host_id")
                            .from(Invitations::Table, Invitations::HostId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_chat_room_id")
                            .from(Invitations::Table, Invitations::ChatRoomId)
                            .to(ChatRooms::Table, ChatRooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChatRoomParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChatRooms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum ChatRooms {
    Table,
    Id,
    Game,
    Time,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum ChatRoomParticipants {
    Table,
    ChatRoomId,
    UserId,
    JoinedAt,
}

#[derive(DeriveIden)]
pub(super) enum Invitations {
    Table,
    Id,
    HostId,
    Game,
    Time,
    Address,
    Latitude,
    Longitude,
    RadiusKm,
    Invitees,
    ChatRoomId,
    CreatedAt,
}
