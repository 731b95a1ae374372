use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One priced-item observation as delivered by the feed, before the store
/// assigns a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub item_id: i64,
    pub min_buyout: Option<i64>,
    pub quantity: Option<i64>,
    pub market_value: Option<i64>,
    pub historical: Option<i64>,
    pub num_auctions: Option<i64>,
}

/// Signed price change between an item's two most recent observations.
///
/// `delta` is `None` when either side has no buyout price; a missing price
/// is a valid market state, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDelta {
    pub item_id: i64,
    pub current_price: Option<i64>,
    pub previous_price: Option<i64>,
    pub current_timestamp: DateTime<Utc>,
    pub previous_timestamp: DateTime<Utc>,
    pub delta: Option<i64>,
}
