// src/lib.rs

pub mod entities {
    pub mod prelude;
    pub mod price_observations;
}

pub mod services {
    pub mod delta;
    pub mod feed;
    pub mod history;
}

pub mod config;
pub mod error;
pub mod models;
