//! SeaORM Entity for auction-house price observation history

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_observations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item the observation belongs to
    pub item_id: i64,
    /// Buy-now floor price, absent when no buyout was listed
    pub min_buyout: Option<i64>,
    pub quantity: Option<i64>,
    pub market_value: Option<i64>,
    /// Smoothed historical price supplied by the feed
    pub historical: Option<i64>,
    pub num_auctions: Option<i64>,
    /// Assigned at append time, shared by the whole fetched batch
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
