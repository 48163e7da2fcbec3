// crates/tilesets-core/src/feature.rs

//! Typed view of GeoJSON geometries.
//!
//! Features travel through the crate as raw [`serde_json::Value`]s (they are
//! uploaded unmodified); the burner only needs their geometry, which is
//! decoded on demand into [`Geometry`].

use crate::error::{Result, TilesetsError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A `[lng, lat]` pair. Extra ordinates (altitude, measure) are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

impl Position {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(v: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match v.as_slice() {
            [lng, lat, ..] => Ok(Position::new(*lng, *lat)),
            _ => Err(format!("position needs at least 2 ordinates, got {}", v.len())),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.lng, p.lat]
    }
}

pub type Ring = Vec<Position>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Decodes the `geometry` member of the feature at `index`.
    pub fn from_feature(index: usize, feature: &Value) -> Result<Self> {
        let geometry = feature.get("geometry").ok_or_else(|| TilesetsError::FeatureParse {
            index,
            message: "feature has no geometry".into(),
        })?;
        Geometry::deserialize(geometry).map_err(|e| TilesetsError::FeatureParse {
            index,
            message: e.to_string(),
        })
    }
}

/// Builds a Point feature with empty properties.
pub fn point_feature(lng: f64, lat: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lng, lat]},
        "properties": {}
    })
}
