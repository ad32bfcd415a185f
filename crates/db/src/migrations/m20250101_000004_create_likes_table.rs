//! Create likes table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Likes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Likes::VideoId).string_len(32).not_null())
                    .col(ColumnDef::new(Likes::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Likes::Type).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Likes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // One reaction per (video, user); the upsert conflicts on this key
                    .primary_key(Index::create().col(Likes::VideoId).col(Likes::UserId))
                    .check(Expr::col(Likes::Type).is_in(["like", "dislike"]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_likes_video_id")
                            .from(Likes::Table, Likes::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_likes_user_id")
                            .from(Likes::Table, Likes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Likes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Likes {
    Table,
    VideoId,
    UserId,
    Type,
    CreatedAt,
}

#[derive(Iden)]
enum Videos {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
