use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("Invalid date for '{0}': {1}")]
    InvalidDate(String, String),

    #[error("Failed to write the raw data archive: {0}")]
    Archive(#[from] std::io::Error),

    #[error("Failed to serialize an archive record: {0}")]
    Serialization(#[from] serde_json::Error),
}
