//! Validation example for tilesets-rs
//!
//! Runs a mixed batch of features through the lazy validator and shows where
//! the stream stops.

use serde_json::json;
use tilesets_rs::{validate_feature, validate_stream, TilesetsError};

fn main() {
    println!("=== tilesets-rs Validation Example ===\n");

    let candidates = [
        ("closed ring", json!([[1, 2], [3, 4], [5, 6], [1, 2]])),
        ("three positions", json!([[1, 2], [3, 4], [5, 6]])),
        ("not closed", json!([[1, 2], [3, 4], [5, 6], [7, 8]])),
    ];

    println!("--- Single features ---");
    let features: Vec<_> = candidates
        .iter()
        .map(|(_, ring)| {
            json!({
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [ring]},
                "properties": {}
            })
        })
        .collect();
    for (index, ((label, _), feature)) in candidates.iter().zip(&features).enumerate() {
        match validate_feature(index, feature) {
            Ok(()) => println!("✓ {label}"),
            Err(e) => println!("✗ {label}: {e}"),
        }
    }

    println!("\n--- Streaming ---");
    let stream = validate_stream(features.into_iter().map(Ok::<_, TilesetsError>));
    for item in stream {
        match item {
            Ok(feature) => println!("passed: {}", feature["geometry"]["type"]),
            Err(e) => {
                println!("stopped: {e}");
                break;
            }
        }
    }
}
