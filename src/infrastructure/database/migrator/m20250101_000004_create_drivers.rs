//! Create drivers table

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
                    .table(Drivers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Drivers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Drivers::UserId).string().not_null())
                    .col(ColumnDef::new(Drivers::Photo).string())
                    .col(
                        ColumnDef::new(Drivers::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Drivers::AvgResponseTimeMinutes).integer())
                    .col(
                        ColumnDef::new(Drivers::ResponseCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drivers_user")
                            .from(Drivers::Table, Drivers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drivers_user")
                    .table(Drivers::Table)
                    .col(Drivers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drivers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Drivers {
    Table,
    Id,
    UserId,
    Photo,
    IsAvailable,
    AvgResponseTimeMinutes,
    ResponseCount,
}
