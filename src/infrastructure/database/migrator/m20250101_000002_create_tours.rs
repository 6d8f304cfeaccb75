//! Create tours table
//!
//! Catalog rows are owned by the listing service; the booking core only
//! reads ownership, price, availability rules and capacity.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tours::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tours::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Tours::OwnerId).string().not_null())
                    .col(ColumnDef::new(Tours::Title).string().not_null())
                    .col(ColumnDef::new(Tours::Image).string())
                    .col(
                        ColumnDef::new(Tours::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Tours::Price)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tours::Currency)
                            .string_len(3)
                            .not_null()
                            .default("GEL"),
                    )
                    .col(
                        ColumnDef::new(Tours::AvailabilityType)
                            .string()
                            .not_null()
                            .default("DAILY"),
                    )
                    .col(ColumnDef::new(Tours::AvailableDates).text())
                    .col(ColumnDef::new(Tours::MaxPeople).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tours_owner")
                    .table(Tours::Table)
                    .col(Tours::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tours::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tours {
    Table,
    Id,
    OwnerId,
    Title,
    Image,
    IsActive,
    Price,
    Currency,
    AvailabilityType,
    AvailableDates,
    MaxPeople,
}
