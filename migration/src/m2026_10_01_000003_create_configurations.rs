//! Migration to create the configurations table.
//!
//! A configuration always belongs to a site and may reference a battery.
//! Batteries can be shared between configurations, so removing one only
//! clears the reference.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Configurations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configurations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Configurations::SiteId).integer().not_null())
                    .col(ColumnDef::new(Configurations::BatteryId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_configurations_site_id")
                            .from(Configurations::Table, Configurations::SiteId)
                            .to(Sites::Table, Sites::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_configurations_battery_id")
                            .from(Configurations::Table, Configurations::BatteryId)
                            .to(Batteries::Table, Batteries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configurations_site_id")
                    .table(Configurations::Table)
                    .col(Configurations::SiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_configurations_site_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Configurations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Configurations {
    Table,
    Id,
    SiteId,
    BatteryId,
}

#[derive(DeriveIden)]
enum Sites {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Batteries {
    Table,
    Id,
}
