//! Create comments table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Comments::VideoId).string_len(32).not_null())
                    .col(ColumnDef::new(Comments::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(
                        ColumnDef::new(Comments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_video_id")
                            .from(Comments::Table, Comments::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user_id")
                            .from(Comments::Table, Comments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (video_id, created_at) for the per-video comment list
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_video_id_created_at")
                    .table(Comments::Table)
                    .col(Comments::VideoId)
                    .col(Comments::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    VideoId,
    UserId,
    Content,
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
