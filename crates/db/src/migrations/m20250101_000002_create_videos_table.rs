//! Create videos table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Videos::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Videos::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Videos::Description).text())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).string_len(1024).not_null())
                    .col(ColumnDef::new(Videos::ChannelName).string_len(256).not_null())
                    .col(ColumnDef::new(Videos::ChannelAvatarUrl).string_len(1024))
                    .col(ColumnDef::new(Videos::Views).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Videos::Duration).string_len(16).not_null())
                    .col(ColumnDef::new(Videos::VideoUrl).string_len(1024).not_null())
                    .col(
                        ColumnDef::new(Videos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Videos::Views).gte(0))
                    .to_owned(),
            )
            .await?;

        // Index: created_at (listing order)
        manager
            .create_index(
                Index::create()
                    .name("idx_videos_created_at")
                    .table(Videos::Table)
                    .col(Videos::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Videos {
    Table,
    Id,
    Title,
    Description,
    ThumbnailUrl,
    ChannelName,
    ChannelAvatarUrl,
    Views,
    Duration,
    VideoUrl,
    CreatedAt,
}
