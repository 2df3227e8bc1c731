use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to reach the market data source: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unknown ticker '{0}': {1}")]
    UnknownTicker(String, String),

    #[error("The market data source returned an error: {0}")]
    SourceError(String),

    #[error("Failed to deserialize the market data response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from market data source: {0}")]
    InvalidData(String),

    #[error("Timed out after {0:?} waiting for the market data source")]
    Timeout(Duration),
}
