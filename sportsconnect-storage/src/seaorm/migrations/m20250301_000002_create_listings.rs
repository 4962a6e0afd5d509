//! Tournaments, venues and venue bookings

use super::m20250301_000001_create_accounts::{Coaches, Users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournaments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournaments::Title).string().not_null())
                    .col(ColumnDef::new(Tournaments::Description).text().not_null())
                    .col(ColumnDef::new(Tournaments::Location).string().not_null())
                    .col(ColumnDef::new(Tournaments::Date).timestamp().not_null())
                    .col(ColumnDef::new(Tournaments::Banner).text().not_null())
                    .col(ColumnDef::new(Tournaments::HostedBy).integer().not_null())
                    .col(
                        ColumnDef::new(Tournaments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Tournaments::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournaments_hosted_by")
                            .from(Tournaments::Table, Tournaments::HostedBy)
                            .to(Coaches::Table, Coaches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venues::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venues::Name).string().not_null())
                    .col(ColumnDef::new(Venues::Image).text().not_null())
                    .col(ColumnDef::new(Venues::Location).string().not_null())
                    .col(ColumnDef::new(Venues::Price).string().not_null())
                    .col(ColumnDef::new(Venues::Facilities).json().not_null())
                    .col(ColumnDef::new(Venues::Rating).double().not_null().default(0.0))
                    .col(ColumnDef::new(Venues::Reviews).json().not_null())
                    .col(ColumnDef::new(Venues::AvailableSlots).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::VenueId).integer().not_null())
                    .col(ColumnDef::new(Bookings::UserId).integer().not_null())
                    .col(ColumnDef::new(Bookings::Slot).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_venue_id")
                            .from(Bookings::Table, Bookings::VenueId)
                            .to(Venues::Table, Venues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user_id")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tournaments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Tournaments {
    Table,
    Id,
    Title,
    Description,
    Location,
    Date,
    Banner,
    HostedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Venues {
    Table,
    Id,
    Name,
    Image,
    Location,
    Price,
    Facilities,
    Rating,
    Reviews,
    AvailableSlots,
}

#[derive(DeriveIden)]
pub(super) enum Bookings {
    Table,
    Id,
    VenueId,
    UserId,
    Slot,
    CreatedAt,
}
