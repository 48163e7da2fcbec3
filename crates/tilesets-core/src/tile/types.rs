//! Tile types and constants

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Northern edge of the Web Mercator square, in degrees.
pub const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Southern edge of the Web Mercator square, in degrees.
pub const MIN_LAT: f64 = -MAX_LAT;

/// Deepest zoom a tile index can address with `u32` coordinates.
pub const MAX_ZOOM: u8 = 31;

/// Slippy-map tile address.
///
/// The derived ordering compares `x`, then `y`, then `z`; a `BTreeSet<Tile>`
/// therefore iterates in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl Tile {
    pub const fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }
}

/// Geographic extent of a tile, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}
