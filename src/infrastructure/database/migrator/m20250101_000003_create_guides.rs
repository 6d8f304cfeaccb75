//! Create guides table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guides::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guides::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Guides::UserId).string().not_null())
                    .col(ColumnDef::new(Guides::Photo).string())
                    .col(
                        ColumnDef::new(Guides::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Guides::PricePerDay).big_integer())
                    .col(
                        ColumnDef::new(Guides::Currency)
                            .string_len(3)
                            .not_null()
                            .default("GEL"),
                    )
                    .col(ColumnDef::new(Guides::AvgResponseTimeMinutes).integer())
                    .col(
                        ColumnDef::new(Guides::ResponseCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guides_user")
                            .from(Guides::Table, Guides::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guides_user")
                    .table(Guides::Table)
                    .col(Guides::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Guides {
    Table,
    Id,
    UserId,
    Photo,
    IsAvailable,
    PricePerDay,
    Currency,
    AvgResponseTimeMinutes,
    ResponseCount,
}
