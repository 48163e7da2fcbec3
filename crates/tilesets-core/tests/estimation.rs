use serde_json::{json, Value};
use tilesets_core::{
    estimate_area, estimate_area_with, validate_stream, AreaEstimate, Geometry, Precision,
    Rasterizer, Result, Tile, TileBurner, TilesetsError,
};

fn feature(geometry: Value) -> Value {
    json!({"type": "Feature", "geometry": geometry, "properties": {}})
}

fn one_degree_box() -> Value {
    feature(json!({
        "type": "Polygon",
        "coordinates": [[[10.0, 45.0], [11.0, 45.0], [11.0, 46.0], [10.0, 46.0], [10.0, 45.0]]]
    }))
}

fn estimate(features: &[Value], precision: Precision) -> f64 {
    let stream = validate_stream(features.iter().cloned().map(Ok::<_, TilesetsError>));
    estimate_area(stream, precision).unwrap()
}

#[test]
fn empty_input_has_zero_area() {
    for precision in Precision::ALL {
        assert_eq!(estimate(&[], precision), 0.0);
    }
}

#[test]
fn single_point_covers_its_tile() {
    let point = feature(json!({"type": "Point", "coordinates": [125.6, 10.1]}));
    let area = estimate(&[point], Precision::TenMeters);
    assert_eq!(area, Tile::new(54, 30, 6).area_km2());
    assert_eq!(AreaEstimate::new(area, Precision::TenMeters).km2, "382565");
}

#[test]
fn far_longitudes_are_estimated_on_edge_tiles() {
    let line = feature(json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1e20, 1.0]]}));
    let polygon = feature(json!({
        "type": "Polygon",
        "coordinates": [[[-1e20, -1.0], [10.0, -1.0], [10.0, 1.0], [-1e20, 1.0], [-1e20, -1.0]]]
    }));
    let area = estimate(&[line, polygon], Precision::TenMeters);
    assert!(area.is_finite() && area > 0.0);
    assert!(area <= Tile::new(0, 0, 0).area_km2());
}

#[test]
fn estimates_are_deterministic() {
    let features = vec![
        one_degree_box(),
        feature(json!({"type": "LineString", "coordinates": [[-73.9, 40.7], [-71.1, 42.4]]})),
    ];
    let first = estimate(&features, Precision::ThirtyCentimeters);
    let second = estimate(&features, Precision::ThirtyCentimeters);
    assert_eq!(first, second);
}

#[test]
fn coarser_precision_never_shrinks_the_estimate() {
    let features = [one_degree_box()];
    let areas: Vec<f64> = [
        Precision::TenMeters,
        Precision::OneMeter,
        Precision::ThirtyCentimeters,
    ]
    .into_iter()
    .map(|p| estimate(&features, p))
    .collect();
    assert!(areas[0] >= areas[1]);
    assert!(areas[1] >= areas[2]);
}

#[test]
fn fine_precision_approaches_true_area() {
    // 1° x 1° cell between 45°N and 46°N.
    let r = tilesets_core::tile::EARTH_RADIUS_KM;
    let exact = r * r * (46f64.to_radians().sin() - 45f64.to_radians().sin()) * 1f64.to_radians();

    let area = estimate(&[one_degree_box()], Precision::ThirtyCentimeters);
    assert!(area >= exact * 0.999, "{area} < {exact}");
    assert!(area <= exact * 1.10, "{area} too far above {exact}");
}

#[test]
fn duplicate_features_count_once() {
    let single = estimate(&[one_degree_box()], Precision::OneMeter);
    let doubled = estimate(&[one_degree_box(), one_degree_box()], Precision::OneMeter);
    assert_eq!(single, doubled);
}

#[test]
fn validation_failure_aborts_the_estimate() {
    let features: Vec<std::result::Result<Value, TilesetsError>> = vec![
        Ok(one_degree_box()),
        Ok(feature(json!({"type": "Polygon", "coordinates": [[[1, 2], [3, 4], [5, 6]]]}))),
    ];
    let err = estimate_area(validate_stream(features), Precision::TenMeters).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in feature number 1: Each linear ring must contain at least 4 positions"
    );
}

#[test]
fn unparseable_geometry_is_reported_by_index() {
    let features = vec![
        Ok::<_, TilesetsError>(one_degree_box()),
        Ok(feature(json!({"type": "Circle", "coordinates": [0, 0]}))),
    ];
    let err = estimate_area(features, Precision::TenMeters).unwrap_err();
    assert!(matches!(err, TilesetsError::FeatureParse { index: 1, .. }));
}

struct CountingBurner;

impl TileBurner for CountingBurner {
    fn burn(
        &self,
        geometries: &[Geometry],
        zoom: u8,
    ) -> Result<std::collections::BTreeSet<Tile>> {
        assert_eq!(zoom, 17);
        Rasterizer.burn(geometries, zoom)
    }
}

#[test]
fn custom_burner_receives_precision_zoom() {
    let point = feature(json!({"type": "Point", "coordinates": [0.5, 0.5]}));
    let area = estimate_area_with(
        &CountingBurner,
        vec![Ok::<_, TilesetsError>(point)],
        Precision::OneCentimeter,
    )
    .unwrap();
    assert!(area > 0.0 && area < 0.1);
}

#[test]
fn report_shape() {
    let report = AreaEstimate::new(1_485_127.6, Precision::TenMeters);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "km2": "1485128",
            "precision": "10m",
            "pricing_docs": "For more information, visit https://www.mapbox.com/pricing/#tilesets"
        })
    );
}
