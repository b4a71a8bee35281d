//! Error types for the Top-N query pipeline
//!
//! Validation errors are fatal and raised before any network call.
//! Fetch errors are per (season, distance) cell and get folded into the
//! query summary instead of aborting the query.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all Top-N query operations
///
/// Implements Display for human-readable messages and Serialize
/// so UI callers can forward errors as plain strings.
#[derive(Error, Debug)]
pub enum TopnError {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },

    /// Response body was not well-formed XML
    #[error("Failed to parse XML: {0}")]
    XmlError(String),

    /// A single (season, distance) request exhausted its retries
    #[error("API request failed after {attempts} attempt(s) (season={season}, distance={distance}): {url}: {source}")]
    FetchFailed {
        season: i32,
        distance: u32,
        url: String,
        attempts: u32,
        #[source]
        source: Box<TopnError>,
    },

    /// Age class is not `<gender letter><age token>`, e.g. "FA2"
    #[error("Invalid age class: {0}")]
    InvalidAgeClass(String),

    /// No distances were requested
    #[error("At least one distance is required")]
    NoDistances,

    /// Distance outside the allowed set
    #[error("Distance not allowed: {0}")]
    DisallowedDistance(u32),

    /// CSV serialization failed
    #[error("CSV export failed: {0}")]
    CsvError(#[from] csv::Error),
}

impl TopnError {
    /// True for errors raised by input validation, before any I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TopnError::InvalidAgeClass(_) | TopnError::NoDistances | TopnError::DisallowedDistance(_)
        )
    }
}

impl Serialize for TopnError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Top-N operations
pub type Result<T> = std::result::Result<T, TopnError>;
