//! Create favorite table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Favorite::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Favorite::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Favorite::BiodataId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Favorite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // A user can favorite a biodata at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_biodata")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .col(Favorite::BiodataId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_biodata_id")
                    .table(Favorite::Table)
                    .col(Favorite::BiodataId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Favorite {
    Table,
    Id,
    UserId,
    BiodataId,
    CreatedAt,
}
