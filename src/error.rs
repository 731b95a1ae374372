use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy for a run. `Connection` and `SchemaMismatch` are kept
/// apart so an operator can tell "can't reach the store" from "connected
/// but the table has the wrong shape".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to connect to the database: {0}")]
    Connection(#[source] DbErr),

    #[error("Store schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Feed fetch failed: {0}")]
    Fetch(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Fetch(format!("Unparseable feed payload: {}", err))
    }
}
