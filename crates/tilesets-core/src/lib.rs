// crates/tilesets-core/src/lib.rs

//! # tilesets-core
//!
//! Building blocks for the `tilesets` command-line client:
//!
//! - [`validate`]: streaming GeoJSON feature validation (schema + ring closure)
//! - [`estimate`]: precision → zoom → burned tiles → spherical area in km²
//! - [`burn`] / [`tile`]: rasterization onto the slippy-map grid and tile math
//! - [`api`]: blocking client for the Tilesets REST API (feature `api`)
//!
//! ```
//! use serde_json::json;
//! use tilesets_core::{estimate_area, validate_stream, Precision, TilesetsError};
//!
//! let features = vec![json!({
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [125.6, 10.1]},
//!     "properties": {"name": "Dinagat Islands"}
//! })];
//! let validated = validate_stream(features.into_iter().map(Ok::<_, TilesetsError>));
//! let km2 = estimate_area(validated, Precision::TenMeters).unwrap();
//! assert!(km2 > 0.0);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api; // Feature-gated inside (`api`)
pub mod burn;
pub mod config;
pub mod error;
pub mod estimate;
pub mod feature;
pub mod precision;
pub mod tile;
pub mod validate;

// Re-exports
pub use crate::burn::{Rasterizer, TileBurner};
pub use crate::config::ApiConfig;
pub use crate::error::{RingFault, Result, TilesetsError, ValidationError};
pub use crate::estimate::{estimate_area, estimate_area_with, AreaEstimate};
pub use crate::feature::{Geometry, Position};
pub use crate::precision::Precision;
pub use crate::tile::Tile;
pub use crate::validate::{
    validate_changeset_feature, validate_feature, validate_stream, validate_stream_with,
    ValidationMode,
};
#[cfg(feature = "api")]
pub use crate::api::ApiClient;
