//! Create music table
//!
//! No foreign keys: deleting a category or user leaves its tracks in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Music::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Music::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Music::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Music::Artist).string_len(255).not_null())
                    .col(ColumnDef::new(Music::CategoryId).string().not_null())
                    .col(ColumnDef::new(Music::CategoryTypeId).string().not_null())
                    .col(ColumnDef::new(Music::FileUrl).string().not_null())
                    .col(ColumnDef::new(Music::ThumbnailUrl).string().null())
                    .col(ColumnDef::new(Music::Duration).double().not_null())
                    .col(
                        ColumnDef::new(Music::ReleaseDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Music::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Music::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Music::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_music_category_id")
                    .table(Music::Table)
                    .col(Music::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Music::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Music {
    Table,
    Id,
    Title,
    Artist,
    CategoryId,
    CategoryTypeId,
    FileUrl,
    ThumbnailUrl,
    Duration,
    ReleaseDate,
    UserId,
    CreatedAt,
    UpdatedAt,
}
