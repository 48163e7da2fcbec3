// crates/tilesets-core/src/estimate.rs

//! # Area Estimation
//!
//! Precision level -> zoom -> burned tile set -> summed spherical tile area.

use crate::burn::{Rasterizer, TileBurner};
use crate::error::{Result, TilesetsError};
use crate::feature::Geometry;
use crate::precision::Precision;
use crate::tile::total_area_km2;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

pub const PRICING_DOCS: &str =
    "For more information, visit https://www.mapbox.com/pricing/#tilesets";

/// Report printed by `tilesets estimate-area`.
///
/// `km2` is the area rounded to the nearest square kilometer, as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaEstimate {
    pub km2: String,
    pub precision: Precision,
    pub pricing_docs: String,
}

impl AreaEstimate {
    pub fn new(area_km2: f64, precision: Precision) -> Self {
        Self {
            km2: (area_km2.round() as u64).to_string(),
            precision,
            pricing_docs: PRICING_DOCS.to_string(),
        }
    }
}

/// Estimates the tiled area of `features` in km² using the default [`Rasterizer`].
///
/// The stream is usually the output of
/// [`validate_stream`](crate::validate::validate_stream); upstream errors
/// abort the estimate unchanged.
pub fn estimate_area<I, E>(features: I, precision: Precision) -> Result<f64>
where
    I: IntoIterator<Item = std::result::Result<Value, E>>,
    TilesetsError: From<E>,
{
    estimate_area_with(&Rasterizer, features, precision)
}

pub fn estimate_area_with<B, I, E>(burner: &B, features: I, precision: Precision) -> Result<f64>
where
    B: TileBurner + ?Sized,
    I: IntoIterator<Item = std::result::Result<Value, E>>,
    TilesetsError: From<E>,
{
    let zoom = precision.zoom();

    // The burner needs every geometry at once, so the stream is drained here.
    let geometries = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| Geometry::from_feature(index, &feature?))
        .collect::<Result<Vec<_>>>()?;
    debug!(features = geometries.len(), zoom, "burning features");

    let tiles = burner.burn(&geometries, zoom)?;
    let area = total_area_km2(&tiles);
    info!(%precision, tiles = tiles.len(), area_km2 = area, "estimated area");
    Ok(area)
}
