//! Users and coaches

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(ColumnDef::new(Users::Specialization).string())
                    .col(ColumnDef::new(Users::Experience).string())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(20)
                            .not_null()
                            .default("player"),
                    )
                    .col(ColumnDef::new(Users::Coins).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Achievements).json().not_null())
                    .col(ColumnDef::new(Users::FavoriteGames).json().not_null())
                    .col(ColumnDef::new(Users::ProfileImage).text())
                    .col(ColumnDef::new(Users::Location).string().not_null().default(""))
                    .col(ColumnDef::new(Users::Latitude).double())
                    .col(ColumnDef::new(Users::Longitude).double())
                    .col(ColumnDef::new(Users::ResetToken).string())
                    .col(ColumnDef::new(Users::ResetTokenExpires).timestamp())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
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
                    .table(Coaches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coaches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Coaches::Name).string().not_null())
                    .col(ColumnDef::new(Coaches::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Coaches::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Coaches::Phone).string().not_null())
                    .col(ColumnDef::new(Coaches::Specialization).string().not_null())
                    .col(ColumnDef::new(Coaches::Experience).string().not_null())
                    .col(
                        ColumnDef::new(Coaches::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Coaches::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coaches::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Specialization,
    Experience,
    Role,
    Coins,
    Achievements,
    FavoriteGames,
    ProfileImage,
    Location,
    Latitude,
    Longitude,
    ResetToken,
    ResetTokenExpires,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Coaches {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Specialization,
    Experience,
    CreatedAt,
    UpdatedAt,
}
