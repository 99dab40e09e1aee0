//! Migration to create the batteries table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batteries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batteries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batteries::Vendor).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Batteries::CapacityKwh)
                            .double()
                            .not_null()
                            .check(Expr::col(Batteries::CapacityKwh).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Batteries::MaxPowerKw)
                            .double()
                            .not_null()
                            .check(Expr::col(Batteries::MaxPowerKw).gte(0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batteries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Batteries {
    Table,
    Id,
    Vendor,
    CapacityKwh,
    MaxPowerKw,
}
