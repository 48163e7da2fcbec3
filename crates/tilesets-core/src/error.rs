// crates/tilesets-core/src/error.rs

use std::fmt;
use thiserror::Error;

/// What went wrong with a single linear ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingFault {
    /// Fewer than 4 positions.
    TooFewPositions,
    /// First and last positions differ.
    NotClosed,
}

impl fmt::Display for RingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingFault::TooFewPositions => {
                f.write_str("Each linear ring must contain at least 4 positions")
            }
            RingFault::NotClosed => f.write_str("Each linear ring must end where it started"),
        }
    }
}

/// A feature rejected by the validator.
///
/// Every variant carries the 0-based position of the offending feature in
/// the input stream so callers can point the user at it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Minimal GeoJSON shape violated (missing/invalid `type`, `geometry`,
    /// `properties`, malformed coordinates).
    #[error("Error in feature number {index}: {message}")]
    Schema { index: usize, message: String },

    /// A Polygon/MultiPolygon ring failed the length or closure check.
    #[error("Error in feature number {index}: {fault}")]
    Ring { index: usize, fault: RingFault },

    /// A changeset deletion record is malformed.
    #[error("Error in feature number {index}: {message}")]
    Changeset { index: usize, message: String },
}

impl ValidationError {
    pub fn index(&self) -> usize {
        match self {
            ValidationError::Schema { index, .. }
            | ValidationError::Ring { index, .. }
            | ValidationError::Changeset { index, .. } => *index,
        }
    }
}

#[derive(Debug, Error)]
pub enum TilesetsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid precision '{0}': expected one of 10m, 1m, 30cm, 1cm")]
    PrecisionRange(String),

    #[error("Error parsing feature number {index}: {message}")]
    FeatureParse { index: usize, message: String },

    #[error("Invalid tileset id '{0}': format must match username.tileset")]
    InvalidTilesetId(String),

    #[error("Tileset Source ID is invalid. Must be no more than 32 characters and only include \"-\", \"_\", and alphanumeric characters.")]
    InvalidSourceId(String),

    #[error("No access token provided. Please set the MAPBOX_ACCESS_TOKEN environment variable or use the --token flag.")]
    MissingToken,

    #[error("{0}")]
    Token(String),

    /// Non-success HTTP status; `body` is the raw response text.
    #[error("{body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    Usage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "api")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TilesetsError>;
