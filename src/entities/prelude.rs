pub use super::price_observations::Entity as PriceObservations;
