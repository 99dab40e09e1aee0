//! Migration to create the live_data table.
//!
//! Stores one row per telemetry sample posted by a site. Samples are
//! append-only; the index on `site_id` serves the per-site listing.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LiveData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LiveData::SiteId).integer().not_null())
                    .col(ColumnDef::new(LiveData::DtStamp).string_len(100).not_null())
                    .col(
                        ColumnDef::new(LiveData::Soc)
                            .double()
                            .not_null()
                            .check(
                                Expr::col(LiveData::Soc)
                                    .gte(0)
                                    .and(Expr::col(LiveData::Soc).lte(100)),
                            ),
                    )
                    .col(
                        ColumnDef::new(LiveData::LoadKwh)
                            .double()
                            .not_null()
                            .check(Expr::col(LiveData::LoadKwh).gte(0)),
                    )
                    .col(
                        ColumnDef::new(LiveData::NetLoadKwh)
                            .double()
                            .not_null()
                            .check(Expr::col(LiveData::NetLoadKwh).gte(0)),
                    )
                    .col(ColumnDef::new(LiveData::PvNotification).boolean().not_null())
                    .col(ColumnDef::new(LiveData::BioNotification).boolean().not_null())
                    .col(ColumnDef::new(LiveData::CroNotification).boolean().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_data_site_id")
                            .from(LiveData::Table, LiveData::SiteId)
                            .to(Sites::Table, Sites::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_live_data_site_id")
                    .table(LiveData::Table)
                    .col(LiveData::SiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_live_data_site_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LiveData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LiveData {
    Table,
    Id,
    SiteId,
    DtStamp,
    Soc,
    LoadKwh,
    NetLoadKwh,
    PvNotification,
    BioNotification,
    CroNotification,
}

#[derive(DeriveIden)]
enum Sites {
    Table,
    Id,
}
