use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::AppError;
use crate::models::record::Record;

/// Bounded wait for the snapshot request; the run fails rather than hangs.
const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw feed entry. Some feed variants carry extra identifiers
/// (`auctionHouseId`, `petSpeciesId`); anything not listed here is ignored
/// during deserialization and never reaches the store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPricingEntry {
    item_id: i64,
    min_buyout: Option<i64>,
    quantity: Option<i64>,
    market_value: Option<i64>,
    historical: Option<i64>,
    num_auctions: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PricingSnapshot {
    pricing_data: Vec<RawPricingEntry>,
}

impl From<RawPricingEntry> for Record {
    fn from(raw: RawPricingEntry) -> Self {
        Record {
            item_id: raw.item_id,
            min_buyout: raw.min_buyout,
            quantity: raw.quantity,
            market_value: raw.market_value,
            historical: raw.historical,
            num_auctions: raw.num_auctions,
        }
    }
}

/// Ingestion driver: fetches one pricing snapshot and normalizes it into
/// canonical Records. Absent fields stay absent, never zero.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    feed_url: String,
}

impl FeedClient {
    pub fn new(feed_url: String) -> Self {
        Self {
            client: Client::new(),
            feed_url,
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub async fn fetch_batch(&self) -> Result<Vec<Record>, AppError> {
        tracing::info!("Fetching pricing snapshot from {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .header("accept", "application/json")
            .timeout(FEED_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("Feed error {}: {}", status, body)));
        }

        let snapshot: PricingSnapshot = response.json().await?;

        tracing::debug!("Feed returned {} entries", snapshot.pricing_data.len());

        Ok(snapshot.pricing_data.into_iter().map(Record::from).collect())
    }
}
