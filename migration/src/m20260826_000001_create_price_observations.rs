use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceObservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceObservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::ItemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::MinBuyout)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::Quantity)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::MarketValue)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::Historical)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::NumAuctions)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PriceObservations::Timestamp)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the latest-two-per-item history scan
        manager
            .create_index(
                Index::create()
                    .name("idx_price_observations_item_ts")
                    .table(PriceObservations::Table)
                    .col(PriceObservations::ItemId)
                    .col(PriceObservations::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceObservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PriceObservations {
    Table,
    Id,
    ItemId,
    MinBuyout,
    Quantity,
    MarketValue,
    Historical,
    NumAuctions,
    Timestamp,
}
