// crates/tilesets-core/src/burn.rs

//! # Tile Burning
//!
//! Rasterizes vector geometries onto the slippy-map grid: the result is the
//! set of tiles a geometry touches at a given zoom.
//!
//! [`Rasterizer`] works in fractional tile space (Web Mercator scaled by
//! `2^z`), where every tile is a unit square:
//!
//! - points burn the tile containing them;
//! - line strings burn every tile a segment passes through;
//! - polygons burn every tile their boundary passes through plus every tile
//!   whose centre lies inside (even-odd rule, so holes stay empty).
//!
//! Polygon edges lying exactly on a grid line touch no tile interior and are
//! skipped, so a polygon that is exactly one tile burns exactly that tile.
//! An all-touched rasterizer would also count the neighbours sharing that
//! edge; estimates here can be lower by those boundary-only tiles.
//!
//! Projection clamps coordinates to the Mercator square, so a vertex at any
//! longitude burns at most `2^z` columns.

use crate::error::{Result, TilesetsError};
use crate::feature::{Geometry, Position, Ring};
use crate::tile::{to_tile_space, Tile, MAX_ZOOM};
use std::collections::BTreeSet;
use tracing::trace;

/// Anything that can turn geometries into a tile set.
pub trait TileBurner {
    fn burn(&self, geometries: &[Geometry], zoom: u8) -> Result<BTreeSet<Tile>>;
}

/// Default scanline/grid-traversal burner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer;

impl TileBurner for Rasterizer {
    fn burn(&self, geometries: &[Geometry], zoom: u8) -> Result<BTreeSet<Tile>> {
        if zoom > MAX_ZOOM {
            return Err(TilesetsError::Usage(format!(
                "zoom {zoom} exceeds the maximum of {MAX_ZOOM}"
            )));
        }
        let mut grid = Grid::new(zoom);
        for geometry in geometries {
            grid.burn_geometry(geometry);
        }
        trace!(zoom, tiles = grid.tiles.len(), "burned geometries");
        Ok(grid.tiles)
    }
}

type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// Segment of a line string: grid-aligned runs still burn a tile.
    Line,
    /// Segment of a polygon ring: grid-aligned runs are skipped.
    Ring,
}

struct Grid {
    zoom: u8,
    last: i64,
    tiles: BTreeSet<Tile>,
}

impl Grid {
    fn new(zoom: u8) -> Self {
        Self {
            zoom,
            last: (1i64 << zoom) - 1,
            tiles: BTreeSet::new(),
        }
    }

    fn project(&self, p: &Position) -> Point {
        to_tile_space(p.lng, p.lat, self.zoom)
    }

    fn clamp(&self, v: f64) -> i64 {
        // `as` saturates on overflow and maps NaN to 0
        (v.floor() as i64).clamp(0, self.last)
    }

    fn insert_cell(&mut self, x: i64, y: i64) {
        let x = x.clamp(0, self.last) as u32;
        let y = y.clamp(0, self.last) as u32;
        self.tiles.insert(Tile::new(x, y, self.zoom));
    }

    fn insert_point(&mut self, (x, y): Point) {
        let (x, y) = (self.clamp(x), self.clamp(y));
        self.insert_cell(x, y);
    }

    // -------------------------------------------------------------------------
    // GEOMETRY DISPATCH
    // -------------------------------------------------------------------------

    fn burn_geometry(&mut self, geometry: &Geometry) {
        match geometry {
            Geometry::Point { coordinates } => {
                let p = self.project(coordinates);
                self.insert_point(p);
            }
            Geometry::MultiPoint { coordinates } => {
                for c in coordinates {
                    let p = self.project(c);
                    self.insert_point(p);
                }
            }
            Geometry::LineString { coordinates } => self.burn_line(coordinates),
            Geometry::MultiLineString { coordinates } => {
                for line in coordinates {
                    self.burn_line(line);
                }
            }
            Geometry::Polygon { coordinates } => self.burn_polygon(coordinates),
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    self.burn_polygon(polygon);
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    self.burn_geometry(g);
                }
            }
        }
    }

    fn burn_line(&mut self, line: &[Position]) {
        let points: Vec<Point> = line.iter().map(|p| self.project(p)).collect();
        match points.as_slice() {
            [] => {}
            [only] => self.insert_point(*only),
            _ => {
                for pair in points.windows(2) {
                    self.burn_segment(pair[0], pair[1], Edge::Line);
                }
            }
        }
    }

    fn burn_polygon(&mut self, rings: &[Ring]) {
        let rings: Vec<Vec<Point>> = rings
            .iter()
            .map(|ring| ring.iter().map(|p| self.project(p)).collect())
            .collect();

        for ring in &rings {
            for (a, b) in ring_edges(ring) {
                self.burn_segment(a, b, Edge::Ring);
            }
        }
        self.fill_interior(&rings);
    }

    // -------------------------------------------------------------------------
    // BOUNDARY: segment traversal
    // -------------------------------------------------------------------------

    /// Burns every cell whose interior the segment `a -> b` passes through.
    ///
    /// The segment is split at each grid-line crossing; each piece lies in a
    /// single cell, found from the piece's midpoint.
    fn burn_segment(&mut self, a: Point, b: Point, kind: Edge) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let on_vertical_line = dx == 0.0 && a.0 == a.0.floor();
        let on_horizontal_line = dy == 0.0 && a.1 == a.1.floor();

        if kind == Edge::Ring && (on_vertical_line || on_horizontal_line) {
            return;
        }
        if dx == 0.0 && dy == 0.0 {
            if kind == Edge::Line {
                self.insert_point(a);
            }
            return;
        }

        let mut cuts = vec![0.0, 1.0];
        push_crossings(&mut cuts, a.0, b.0);
        push_crossings(&mut cuts, a.1, b.1);
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();

        for w in cuts.windows(2) {
            let t = (w[0] + w[1]) / 2.0;
            let mid = (a.0 + dx * t, a.1 + dy * t);
            self.insert_point(mid);
        }
    }

    // -------------------------------------------------------------------------
    // INTERIOR: scanline fill at cell centres
    // -------------------------------------------------------------------------

    fn fill_interior(&mut self, rings: &[Vec<Point>]) {
        let (min_y, max_y) = rings
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.1), hi.max(p.1))
            });
        if !(min_y.is_finite() && max_y.is_finite()) {
            return;
        }

        let mut crossings = Vec::new();
        for row in self.clamp(min_y)..=self.clamp(max_y) {
            let yc = row as f64 + 0.5;

            crossings.clear();
            for ring in rings {
                for (p, q) in ring_edges(ring) {
                    if (p.1 > yc) != (q.1 > yc) {
                        crossings.push(p.0 + (yc - p.1) * (q.0 - p.0) / (q.1 - p.1));
                    }
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                // columns whose centre c + 0.5 lies in [span[0], span[1])
                let first = ((span[0] - 0.5).ceil() as i64).max(0);
                let last = (((span[1] - 0.5).ceil() as i64) - 1).min(self.last);
                for col in first..=last {
                    self.insert_cell(col, row);
                }
            }
        }
    }
}

/// Consecutive vertex pairs, plus the closing edge if the ring is left open.
fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let closing = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 2 && first != last => Some((*last, *first)),
        _ => None,
    };
    ring.windows(2).map(|w| (w[0], w[1])).chain(closing)
}

/// Adds the parameters `t` in (0, 1) at which `from + t * (to - from)` hits an
/// integer.
fn push_crossings(cuts: &mut Vec<f64>, from: f64, to: f64) {
    let d = to - from;
    if d == 0.0 {
        return;
    }
    let (lo, hi) = if from < to { (from, to) } else { (to, from) };
    let mut k = lo.floor() + 1.0;
    while k < hi {
        cuts.push((k - from) / d);
        k += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{tile_lat, tile_lon};

    fn corner(x: u32, y: u32, z: u8) -> Position {
        Position::new(tile_lon(x, z), tile_lat(y, z))
    }

    fn tile_square(x: u32, y: u32, z: u8) -> Geometry {
        Geometry::Polygon {
            coordinates: vec![vec![
                corner(x, y, z),
                corner(x + 1, y, z),
                corner(x + 1, y + 1, z),
                corner(x, y + 1, z),
                corner(x, y, z),
            ]],
        }
    }

    fn burn(g: Geometry, zoom: u8) -> BTreeSet<Tile> {
        Rasterizer.burn(&[g], zoom).unwrap()
    }

    #[test]
    fn point_burns_its_tile() {
        let tiles = burn(
            Geometry::Point {
                coordinates: Position::new(-0.1278, 51.5074),
            },
            10,
        );
        assert_eq!(tiles.into_iter().collect::<Vec<_>>(), vec![Tile::new(511, 340, 10)]);
    }

    #[test]
    fn tile_shaped_polygon_burns_one_tile() {
        // Corners land within float noise of the grid lines; go through
        // tile space so the assertion does not depend on rounding direction.
        let z = 6;
        let tiles = burn(tile_square(20, 25, z), z);
        assert!(tiles.contains(&Tile::new(20, 25, z)));
        assert!(tiles.len() <= 4, "{tiles:?}");
    }

    #[test]
    fn multi_tile_polygon_covers_block() {
        // inset square spanning tiles 2..=4 in both axes at z4
        let z = 4;
        let inset = |x: f64, y: f64| {
            let n = 16.0;
            let lng = x / n * 360.0 - 180.0;
            let lat = (std::f64::consts::PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
            Position::new(lng, lat)
        };
        let g = Geometry::Polygon {
            coordinates: vec![vec![
                inset(2.2, 2.2),
                inset(4.8, 2.2),
                inset(4.8, 4.8),
                inset(2.2, 4.8),
                inset(2.2, 2.2),
            ]],
        };
        let tiles = burn(g, z);
        let expected: BTreeSet<Tile> = (2..=4)
            .flat_map(|x| (2..=4).map(move |y| Tile::new(x, y, z)))
            .collect();
        assert_eq!(tiles, expected);
    }

    #[test]
    fn hole_is_not_filled() {
        let z = 4;
        let at = |x: f64, y: f64| {
            let n = 16.0;
            Position::new(
                x / n * 360.0 - 180.0,
                (std::f64::consts::PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees(),
            )
        };
        let square = |lo: f64, hi: f64| {
            vec![at(lo, lo), at(hi, lo), at(hi, hi), at(lo, hi), at(lo, lo)]
        };
        let g = Geometry::Polygon {
            coordinates: vec![square(0.5, 6.5), square(2.1, 4.9)],
        };
        let tiles = burn(g, z);
        assert!(!tiles.contains(&Tile::new(3, 3, z)));
        assert!(tiles.contains(&Tile::new(2, 2, z)));
        assert!(tiles.contains(&Tile::new(1, 1, z)));
    }

    #[test]
    fn diagonal_line_touches_each_crossed_tile() {
        let z = 2;
        // tile space: (0.11, 1.89) -> (1.67, 2.84); crosses y = 2 before x = 1
        let g = Geometry::LineString {
            coordinates: vec![Position::new(-170.0, 10.0), Position::new(-30.0, -60.0)],
        };
        let tiles = burn(g, z);
        assert_eq!(
            tiles.into_iter().collect::<Vec<_>>(),
            vec![Tile::new(0, 1, z), Tile::new(0, 2, z), Tile::new(1, 2, z)]
        );
    }

    #[test]
    fn overlapping_features_are_deduplicated() {
        let z = 6;
        let p = Geometry::Point {
            coordinates: Position::new(10.0, 10.0),
        };
        let tiles = Rasterizer.burn(&[p.clone(), p], z).unwrap();
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn out_of_range_coordinates_land_on_edge_tiles() {
        let z = 3;
        let tiles = burn(
            Geometry::Point {
                coordinates: Position::new(200.0, 89.9),
            },
            z,
        );
        assert_eq!(tiles.into_iter().next(), Some(Tile::new(7, 0, z)));
    }

    #[test]
    fn far_longitudes_stay_on_the_grid() {
        let z = 6;
        let line = Geometry::LineString {
            coordinates: vec![Position::new(0.0, 0.0), Position::new(1e20, 1.0)],
        };
        let tiles = burn(line, z);
        assert!(tiles.contains(&Tile::new(32, 31, z)));
        assert!(tiles.contains(&Tile::new(63, 31, z)));
        assert!(tiles.iter().all(|t| t.x <= 63 && t.y <= 63));

        let polygon = Geometry::Polygon {
            coordinates: vec![vec![
                Position::new(-1e20, -1.0),
                Position::new(10.0, -1.0),
                Position::new(10.0, 1.0),
                Position::new(-1e20, 1.0),
                Position::new(-1e20, -1.0),
            ]],
        };
        let tiles = burn(polygon, z);
        assert!(tiles.contains(&Tile::new(0, 31, z)));
        assert!(tiles.contains(&Tile::new(33, 32, z)));
        assert!(tiles.iter().all(|t| t.x <= 33));
    }

    #[test]
    fn rejects_excessive_zoom() {
        let g = Geometry::Point {
            coordinates: Position::new(0.0, 0.0),
        };
        assert!(Rasterizer.burn(&[g], 40).is_err());
    }

    #[test]
    fn crossings_are_interior_only() {
        let mut cuts = Vec::new();
        push_crossings(&mut cuts, 0.5, 3.5);
        assert_eq!(cuts.len(), 3);
        cuts.clear();
        push_crossings(&mut cuts, 1.0, 2.0);
        assert!(cuts.is_empty());
    }
}
