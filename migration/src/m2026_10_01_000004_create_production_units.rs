//! Migration to create the production_units table.
//!
//! Production units are owned by exactly one configuration. The CHECK on
//! `units` mirrors the request validation so rows written outside the API
//! still cannot carry a negative count.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductionUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductionUnits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductionUnits::ConfigurationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionUnits::UnitType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionUnits::Units)
                            .integer()
                            .not_null()
                            .check(Expr::col(ProductionUnits::Units).gte(0)),
                    )
                    .col(ColumnDef::new(ProductionUnits::Kwp).double().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_units_configuration_id")
                            .from(ProductionUnits::Table, ProductionUnits::ConfigurationId)
                            .to(Configurations::Table, Configurations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_production_units_configuration_id")
                    .table(ProductionUnits::Table)
                    .col(ProductionUnits::ConfigurationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_production_units_configuration_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ProductionUnits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductionUnits {
    Table,
    Id,
    ConfigurationId,
    UnitType,
    Units,
    Kwp,
}

#[derive(DeriveIden)]
enum Configurations {
    Table,
    Id,
}
