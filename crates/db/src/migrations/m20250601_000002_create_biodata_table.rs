//! Create biodata table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Biodata::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Biodata::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Biodata::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Biodata::Kind).string_len(8).not_null())
                    .col(ColumnDef::new(Biodata::FullName).string_len(256).not_null())
                    .col(ColumnDef::new(Biodata::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Biodata::MaritalStatus).string_len(32).not_null())
                    .col(ColumnDef::new(Biodata::Location).string_len(256))
                    .col(ColumnDef::new(Biodata::Education).text())
                    .col(ColumnDef::new(Biodata::Occupation).string_len(256))
                    .col(ColumnDef::new(Biodata::ExpectedPartner).text())
                    .col(ColumnDef::new(Biodata::About).text())
                    .col(ColumnDef::new(Biodata::ContactEmail).string_len(256))
                    .col(ColumnDef::new(Biodata::ContactPhone).string_len(32))
                    .col(
                        ColumnDef::new(Biodata::CompletedSections)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Biodata::ApprovalStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Biodata::VisibilityStatus)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Biodata::ReviewedBy).string_len(32))
                    .col(ColumnDef::new(Biodata::ReviewNote).text())
                    .col(ColumnDef::new(Biodata::ReviewedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Biodata::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Biodata::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One biodata per user
        manager
            .create_index(
                Index::create()
                    .name("idx_biodata_user_id")
                    .table(Biodata::Table)
                    .col(Biodata::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Browse/search filters on discoverable records
        manager
            .create_index(
                Index::create()
                    .name("idx_biodata_approval_visibility")
                    .table(Biodata::Table)
                    .col(Biodata::ApprovalStatus)
                    .col(Biodata::VisibilityStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_biodata_kind")
                    .table(Biodata::Table)
                    .col(Biodata::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_biodata_created_at")
                    .table(Biodata::Table)
                    .col(Biodata::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Biodata::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Biodata {
    Table,
    Id,
    UserId,
    Kind,
    FullName,
    DateOfBirth,
    MaritalStatus,
    Location,
    Education,
    Occupation,
    ExpectedPartner,
    About,
    ContactEmail,
    ContactPhone,
    CompletedSections,
    ApprovalStatus,
    VisibilityStatus,
    ReviewedBy,
    ReviewNote,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
}
