//! Create bookings table
//!
//! `(entity_type, entity_id)` is a polymorphic reference, so there is no
//! foreign key to the catalog tables. Snapshot columns keep a booking
//! readable after its entity is deleted.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Bookings::ReferenceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).string().not_null())
                    .col(ColumnDef::new(Bookings::EntityType).string().not_null())
                    .col(ColumnDef::new(Bookings::EntityId).string().not_null())
                    .col(ColumnDef::new(Bookings::ProviderUserId).string())
                    .col(ColumnDef::new(Bookings::InquiryId).string())
                    .col(ColumnDef::new(Bookings::EntityName).string().not_null())
                    .col(ColumnDef::new(Bookings::EntityImage).string())
                    .col(ColumnDef::new(Bookings::ProviderName).string())
                    .col(ColumnDef::new(Bookings::Date).date())
                    .col(
                        ColumnDef::new(Bookings::Guests)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Bookings::Currency)
                            .string_len(3)
                            .not_null()
                            .default("GEL"),
                    )
                    .col(ColumnDef::new(Bookings::Notes).text())
                    .col(ColumnDef::new(Bookings::ContactPhone).string())
                    .col(ColumnDef::new(Bookings::ProviderNotes).text())
                    .col(ColumnDef::new(Bookings::DeclinedReason).text())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::CancelledAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_provider")
                    .table(Bookings::Table)
                    .col(Bookings::ProviderUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_entity_date")
                    .table(Bookings::Table)
                    .col(Bookings::EntityType)
                    .col(Bookings::EntityId)
                    .col(Bookings::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    ReferenceNumber,
    UserId,
    EntityType,
    EntityId,
    ProviderUserId,
    InquiryId,
    EntityName,
    EntityImage,
    ProviderName,
    Date,
    Guests,
    TotalPrice,
    Currency,
    Notes,
    ContactPhone,
    ProviderNotes,
    DeclinedReason,
    Status,
    CreatedAt,
    UpdatedAt,
    CancelledAt,
}
