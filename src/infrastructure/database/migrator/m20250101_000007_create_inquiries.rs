//! Create inquiries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inquiries::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Inquiries::UserId).string().not_null())
                    .col(ColumnDef::new(Inquiries::TargetType).string().not_null())
                    .col(ColumnDef::new(Inquiries::TargetIds).text().not_null())
                    .col(ColumnDef::new(Inquiries::Subject).string().not_null())
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(ColumnDef::new(Inquiries::RequestedDate).date())
                    .col(ColumnDef::new(Inquiries::Guests).integer())
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_user")
                    .table(Inquiries::Table)
                    .col(Inquiries::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Inquiries {
    Table,
    Id,
    UserId,
    TargetType,
    TargetIds,
    Subject,
    Message,
    RequestedDate,
    Guests,
    CreatedAt,
}
