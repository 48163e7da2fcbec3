// crates/tilesets-core/src/validate.rs

//! # Feature Validation
//!
//! Checks line-delimited GeoJSON features before they are uploaded or
//! estimated. Validation works one feature at a time so arbitrarily large
//! inputs can be streamed: [`validate_stream`] wraps any iterator and checks
//! each element as it is pulled.
//!
//! Ring winding order is not checked; clockwise and
//! counter-clockwise rings are both accepted.

use crate::error::{RingFault, TilesetsError, ValidationError};
use regex::Regex;
use serde_json::{Map, Value};
use std::iter::Enumerate;
use std::sync::LazyLock;

/// Which rule set to apply to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Plain GeoJSON features (sources, area estimation).
    #[default]
    Feature,
    /// Changeset records: features, or `{"id": .., "delete": true}`.
    Changeset,
}

// -----------------------------------------------------------------------------
// SINGLE FEATURE
// -----------------------------------------------------------------------------

/// Validates one feature. `index` is its 0-based position in the input and is
/// attached to any error.
pub fn validate_feature(index: usize, feature: &Value) -> Result<(), ValidationError> {
    let schema = |message: String| ValidationError::Schema { index, message };

    let obj = as_object(feature).map_err(schema)?;
    for key in ["type", "geometry", "properties"] {
        if !obj.contains_key(key) {
            return Err(schema(format!("'{key}' is a required property")));
        }
    }
    if !obj["type"].is_string() {
        return Err(schema(format!("{} is not of type 'string'", obj["type"])));
    }
    if !obj["properties"].is_object() {
        return Err(schema(format!(
            "{} is not of type 'object'",
            obj["properties"]
        )));
    }

    let geometry = as_object(&obj["geometry"]).map_err(schema)?;
    for key in ["type", "coordinates"] {
        if !geometry.contains_key(key) {
            return Err(schema(format!("'{key}' is a required property")));
        }
    }
    let Some(geometry_type) = geometry["type"].as_str() else {
        return Err(schema(format!(
            "{} is not of type 'string'",
            geometry["type"]
        )));
    };
    let coordinates = &geometry["coordinates"];
    if !coordinates.is_array() {
        return Err(schema(format!("{coordinates} is not of type 'array'")));
    }

    match geometry_type {
        "Polygon" => check_polygon(index, coordinates),
        "MultiPolygon" => {
            for polygon in array_items(index, coordinates, "MultiPolygon")? {
                check_polygon(index, polygon)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Validates a changeset record.
///
/// Records with a `delete` key are deletion markers and must be exactly
/// `{"id": <id>, "delete": true}`; everything else is a regular feature.
pub fn validate_changeset_feature(index: usize, record: &Value) -> Result<(), ValidationError> {
    let Some(obj) = record.as_object() else {
        return validate_feature(index, record);
    };
    let Some(delete) = obj.get("delete") else {
        return validate_feature(index, record);
    };

    let changeset = |message: &str| ValidationError::Changeset {
        index,
        message: message.to_string(),
    };
    if delete != &Value::Bool(true) {
        return Err(changeset("'delete' must be true"));
    }
    if !obj.contains_key("id") {
        return Err(changeset("'id' is a required property"));
    }
    if obj.len() != 2 {
        return Err(changeset(
            "Deletion records may only contain 'id' and 'delete'",
        ));
    }
    Ok(())
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| format!("{value} is not of type 'object'"))
}

fn array_items<'a>(
    index: usize,
    value: &'a Value,
    what: &str,
) -> Result<&'a [Value], ValidationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::Schema {
            index,
            message: format!("{what} coordinates must be an array, got {value}"),
        })
}

fn check_polygon(index: usize, polygon: &Value) -> Result<(), ValidationError> {
    for ring in array_items(index, polygon, "Polygon")? {
        let positions = array_items(index, ring, "Linear ring")?;
        check_ring(index, positions)?;
    }
    Ok(())
}

fn check_ring(index: usize, ring: &[Value]) -> Result<(), ValidationError> {
    if ring.len() < 4 {
        return Err(ValidationError::Ring {
            index,
            fault: RingFault::TooFewPositions,
        });
    }
    let first = position(index, &ring[0])?;
    let last = position(index, &ring[ring.len() - 1])?;
    if first != last {
        return Err(ValidationError::Ring {
            index,
            fault: RingFault::NotClosed,
        });
    }
    Ok(())
}

/// Numeric ordinates of a position. Compared as `f64` so `1` and `1.0` match.
fn position(index: usize, value: &Value) -> Result<Vec<f64>, ValidationError> {
    let invalid = || ValidationError::Schema {
        index,
        message: format!("{value} is not a valid position"),
    };
    let items = value.as_array().ok_or_else(invalid)?;
    if items.len() < 2 {
        return Err(invalid());
    }
    items
        .iter()
        .map(|v| v.as_f64().ok_or_else(invalid))
        .collect()
}

// -----------------------------------------------------------------------------
// STREAMING
// -----------------------------------------------------------------------------

/// Lazy validate-then-yield adapter. See [`validate_stream`].
#[derive(Debug)]
pub struct Validated<I> {
    inner: Enumerate<I>,
    mode: ValidationMode,
}

/// Wraps a feature stream so that each feature is validated as it is pulled.
///
/// Upstream errors are forwarded untouched (they still consume an index). The
/// first invalid feature is yielded as an error; callers using `collect` or
/// `?` stop there.
///
/// ```
/// use serde_json::json;
/// use tilesets_core::validate::validate_stream;
/// use tilesets_core::ValidationError;
///
/// let features = vec![
///     json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {}}),
///     json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [3, 4]}}),
/// ];
/// let mut stream = validate_stream(features.into_iter().map(Ok::<_, ValidationError>));
/// assert!(stream.next().unwrap().is_ok());
/// assert_eq!(stream.next().unwrap().unwrap_err().index(), 1);
/// ```
pub fn validate_stream<I, E>(features: I) -> Validated<I::IntoIter>
where
    I: IntoIterator<Item = Result<Value, E>>,
    E: From<ValidationError>,
{
    validate_stream_with(features, ValidationMode::Feature)
}

pub fn validate_stream_with<I, E>(features: I, mode: ValidationMode) -> Validated<I::IntoIter>
where
    I: IntoIterator<Item = Result<Value, E>>,
    E: From<ValidationError>,
{
    Validated {
        inner: features.into_iter().enumerate(),
        mode,
    }
}

impl<I, E> Iterator for Validated<I>
where
    I: Iterator<Item = Result<Value, E>>,
    E: From<ValidationError>,
{
    type Item = Result<Value, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, item) = self.inner.next()?;
        let mode = self.mode;
        Some(item.and_then(|feature| {
            match mode {
                ValidationMode::Feature => validate_feature(index, &feature)?,
                ValidationMode::Changeset => validate_changeset_feature(index, &feature)?,
            }
            Ok(feature)
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// -----------------------------------------------------------------------------
// IDENTIFIERS
// -----------------------------------------------------------------------------

static TILESET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_-]{1,32}\.[a-z0-9_-]{1,32}$").expect("tileset id pattern")
});
static SOURCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9_-]{1,32}$").expect("source id pattern"));

/// `username.handle`, each part 1–32 characters of `[a-zA-Z0-9-_]`.
pub fn is_valid_tileset_id(tileset_id: &str) -> bool {
    TILESET_ID.is_match(tileset_id)
}

pub fn validate_tileset_id(tileset_id: &str) -> Result<(), TilesetsError> {
    if is_valid_tileset_id(tileset_id) {
        Ok(())
    } else {
        Err(TilesetsError::InvalidTilesetId(tileset_id.to_string()))
    }
}

pub fn validate_source_id(source_id: &str) -> Result<(), TilesetsError> {
    if SOURCE_ID.is_match(source_id) {
        Ok(())
    } else {
        Err(TilesetsError::InvalidSourceId(source_id.to_string()))
    }
}
