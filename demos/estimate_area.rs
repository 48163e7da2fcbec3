//! Area estimation example for tilesets-rs
//!
//! Estimates the tiled area of a few features at every precision level and
//! prints the same report `tilesets estimate-area` would.

use serde_json::json;
use tilesets_rs::{estimate_area, validate_stream, AreaEstimate, Precision, Result, TilesetsError};

fn main() -> Result<()> {
    println!("=== tilesets-rs Area Estimation Example ===\n");

    let features = vec![
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-122.52, 37.70], [-122.35, 37.70], [-122.35, 37.83], [-122.52, 37.83], [-122.52, 37.70]]]
            },
            "properties": {"name": "San Francisco"}
        }),
        json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[-122.27, 37.80], [-121.89, 37.34]]},
            "properties": {"name": "Oakland to San Jose"}
        }),
        json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [125.6, 10.1]},
            "properties": {"name": "Dinagat Islands"}
        }),
    ];

    for precision in Precision::ALL {
        let stream = validate_stream(features.iter().cloned().map(Ok::<_, TilesetsError>));
        let area = estimate_area(stream, precision)?;
        let report = AreaEstimate::new(area, precision);
        println!(
            "{:>5} (zoom {:>2}): {}",
            precision.label(),
            precision.zoom(),
            serde_json::to_string(&report)?
        );
    }

    Ok(())
}
