//! Tile math
//!
//! Conversions between geographic coordinates and slippy-map (Web Mercator)
//! tile space, plus the spherical surface area of a tile.

mod types;

pub use types::{Tile, TileBounds, EARTH_RADIUS_KM, MAX_LAT, MAX_ZOOM, MIN_LAT};

use std::f64::consts::PI;

/// Number of tiles along one axis at `zoom`.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> f64 {
    2.0_f64.powi(zoom as i32)
}

/// Longitude of the western edge of column `x`.
#[inline]
pub fn tile_lon(x: u32, zoom: u8) -> f64 {
    x as f64 / tiles_per_axis(zoom) * 360.0 - 180.0
}

/// Latitude of the northern edge of row `y`.
#[inline]
pub fn tile_lat(y: u32, zoom: u8) -> f64 {
    let n = tiles_per_axis(zoom);
    (PI - 2.0 * PI * y as f64 / n).sinh().atan().to_degrees()
}

/// Projects a longitude/latitude into fractional tile space at `zoom`.
///
/// Coordinates outside the Mercator square are clamped to its edge rather
/// than wrapped, so every result lies in `[0, 2^zoom]` on both axes.
#[inline]
pub fn to_tile_space(lng: f64, lat: f64, zoom: u8) -> (f64, f64) {
    let n = tiles_per_axis(zoom);
    let lat_rad = lat.clamp(MIN_LAT, MAX_LAT).to_radians();

    let x = ((lng + 180.0) / 360.0 * n).clamp(0.0, n);
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n;
    (x, y)
}

impl Tile {
    pub fn bounds(&self) -> TileBounds {
        TileBounds {
            west: tile_lon(self.x, self.z),
            south: tile_lat(self.y + 1, self.z),
            east: tile_lon(self.x + 1, self.z),
            north: tile_lat(self.y, self.z),
        }
    }

    /// Surface area of the tile on a sphere of radius [`EARTH_RADIUS_KM`], in km².
    ///
    /// Exact for a latitude/longitude quadrangle:
    /// `R² · |sin φ_top − sin φ_bottom| · |λ_left − λ_right|`.
    pub fn area_km2(&self) -> f64 {
        let b = self.bounds();
        let band = (b.north.to_radians().sin() - b.south.to_radians().sin()).abs();
        let width = (b.west.to_radians() - b.east.to_radians()).abs();
        EARTH_RADIUS_KM * EARTH_RADIUS_KM * band * width
    }
}

/// Sum of [`Tile::area_km2`] over `tiles`.
pub fn total_area_km2<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> f64 {
    tiles.into_iter().fold(0.0, |total, tile| total + tile.area_km2())
}
