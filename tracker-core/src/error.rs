use std::path::PathBuf;

use crate::location::LocationId;

/// Failures from the remote geocoding and forecast lookups.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Invalid request URL: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned error code: {0}")]
    BadStatus(u16),
    #[error("Unexpected response format: {0}")]
    DecodeFailure(#[from] serde_json::Error),
    #[error("No results found")]
    NoResults,
}

/// Failures from the bounded location collection and its backing store.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Location limit reached: at most {max} locations can be tracked")]
    Full { max: usize },
    #[error("No tracked location with id {0}")]
    NotFound(LocationId),
    #[error("Failed to access location store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Location store {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
