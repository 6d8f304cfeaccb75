//! Create inquiry_responses table
//!
//! One row per (inquiry, recipient); each recipient answers independently.

use sea_orm_migration::prelude::*;

use super::m20250101_000007_create_inquiries::Inquiries;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InquiryResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InquiryResponses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InquiryResponses::InquiryId).string().not_null())
                    .col(ColumnDef::new(InquiryResponses::RecipientId).string().not_null())
                    .col(
                        ColumnDef::new(InquiryResponses::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(InquiryResponses::Message).text())
                    .col(ColumnDef::new(InquiryResponses::RespondedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(InquiryResponses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiry_responses_inquiry")
                            .from(InquiryResponses::Table, InquiryResponses::InquiryId)
                            .to(Inquiries::Table, Inquiries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiry_responses_recipient")
                    .table(InquiryResponses::Table)
                    .col(InquiryResponses::InquiryId)
                    .col(InquiryResponses::RecipientId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiry_responses_status")
                    .table(InquiryResponses::Table)
                    .col(InquiryResponses::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InquiryResponses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum InquiryResponses {
    Table,
    Id,
    InquiryId,
    RecipientId,
    Status,
    Message,
    RespondedAt,
    CreatedAt,
}
