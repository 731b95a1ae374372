use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Order, QueryOrder, QuerySelect, Set};

use crate::entities::{prelude::*, price_observations};
use crate::error::AppError;
use crate::models::record::Record;

/// Latest and immediately preceding observation for one item. `previous`
/// is absent when the item has been seen only once.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemHistory {
    pub item_id: i64,
    pub latest: price_observations::Model,
    pub previous: Option<price_observations::Model>,
}

/// Append-only store of price observations backed by the
/// `price_observations` table.
pub struct HistoryStore {
    db: DatabaseConnection,
}

impl HistoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Probe the observations table so a wrong table shape is reported
    /// apart from "can't connect".
    pub async fn verify_schema(&self) -> Result<(), AppError> {
        PriceObservations::find()
            .limit(1)
            .all(&self.db)
            .await
            .map(|_| ())
            .map_err(|e| AppError::SchemaMismatch(e.to_string()))
    }

    /// Append a fetched batch under one shared timestamp. A single INSERT
    /// statement carries the whole batch, so it lands fully or not at all.
    pub async fn append(&self, records: &[Record]) -> Result<u64, AppError> {
        if records.is_empty() {
            tracing::debug!("Empty batch, nothing to append");
            return Ok(0);
        }

        let stamped_at = Utc::now();

        let rows = records
            .iter()
            .map(|record| price_observations::ActiveModel {
                item_id: Set(record.item_id),
                min_buyout: Set(record.min_buyout),
                quantity: Set(record.quantity),
                market_value: Set(record.market_value),
                historical: Set(record.historical),
                num_auctions: Set(record.num_auctions),
                timestamp: Set(stamped_at),
                ..Default::default()
            });

        PriceObservations::insert_many(rows).exec(&self.db).await?;

        tracing::info!(
            "Appended {} observations stamped {}",
            records.len(),
            stamped_at
        );

        Ok(records.len() as u64)
    }

    /// Two most recent observations per item, newest first. Duplicate
    /// timestamps for one item fall back to the row id, keeping the scan
    /// deterministic.
    pub async fn latest_two_per_item(&self) -> Result<Vec<ItemHistory>, AppError> {
        let rows = PriceObservations::find()
            .order_by(price_observations::Column::ItemId, Order::Asc)
            .order_by(price_observations::Column::Timestamp, Order::Desc)
            .order_by(price_observations::Column::Id, Order::Desc)
            .all(&self.db)
            .await?;

        Ok(group_latest_two(rows))
    }
}

/// Collapse an `(item_id asc, timestamp desc, id desc)` ordered scan into
/// the first two rows of each item group.
fn group_latest_two(rows: Vec<price_observations::Model>) -> Vec<ItemHistory> {
    let mut histories: Vec<ItemHistory> = Vec::new();

    for row in rows {
        match histories.last_mut() {
            Some(history) if history.item_id == row.item_id => {
                if history.previous.is_none() {
                    history.previous = Some(row);
                }
                // Older rows beyond the second are irrelevant here
            }
            _ => histories.push(ItemHistory {
                item_id: row.item_id,
                latest: row,
                previous: None,
            }),
        }
    }

    histories
}
