use serde_json::{json, Value};
use std::cell::Cell;
use tilesets_core::{
    validate_feature, validate_stream, validate_stream_with, RingFault, TilesetsError,
    ValidationError, ValidationMode,
};

fn feature(geometry: Value) -> Value {
    json!({"type": "Feature", "geometry": geometry, "properties": {"name": "test"}})
}

fn polygon(ring: Value) -> Value {
    feature(json!({"type": "Polygon", "coordinates": [ring]}))
}

#[test]
fn reference_rings() {
    assert_eq!(
        validate_feature(0, &polygon(json!([[1, 2], [3, 4], [5, 6]]))),
        Err(ValidationError::Ring {
            index: 0,
            fault: RingFault::TooFewPositions
        })
    );
    assert_eq!(
        validate_feature(0, &polygon(json!([[1, 2], [3, 4], [5, 6], [7, 8]]))),
        Err(ValidationError::Ring {
            index: 0,
            fault: RingFault::NotClosed
        })
    );
    assert_eq!(
        validate_feature(0, &polygon(json!([[1, 2], [3, 4], [5, 6], [1, 2]]))),
        Ok(())
    );
}

#[test]
fn winding_order_is_not_enforced() {
    let ccw = json!([[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]);
    let cw = json!([[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]);
    assert!(validate_feature(0, &polygon(ccw)).is_ok());
    assert!(validate_feature(0, &polygon(cw)).is_ok());
}

#[test]
fn multipolygon_checks_every_ring() {
    let good = json!([[[0, 0], [1, 0], [1, 1], [0, 0]]]);
    let bad = json!([[[5, 5], [6, 5], [6, 6], [5, 6]]]);
    let f = feature(json!({"type": "MultiPolygon", "coordinates": [good, bad]}));
    assert!(matches!(
        validate_feature(4, &f),
        Err(ValidationError::Ring {
            index: 4,
            fault: RingFault::NotClosed
        })
    ));
}

#[test]
fn non_polygon_geometries_skip_ring_rules() {
    let line = feature(json!({"type": "LineString", "coordinates": [[1, 2], [3, 4]]}));
    let point = feature(json!({"type": "Point", "coordinates": [125.6, 10.1]}));
    assert!(validate_feature(0, &line).is_ok());
    assert!(validate_feature(0, &point).is_ok());
}

#[test]
fn schema_errors() {
    let cases = [
        (json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {}}), "'type' is a required property"),
        (json!({"type": "Feature", "properties": {}}), "'geometry' is a required property"),
        (json!({"type": "Feature", "geometry": {"coordinates": [0, 0]}, "properties": {}}), "'type' is a required property"),
        (json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": null}), "null is not of type 'object'"),
        (json!("not a feature"), "\"not a feature\" is not of type 'object'"),
    ];
    for (value, message) in cases {
        match validate_feature(1, &value) {
            Err(ValidationError::Schema { index: 1, message: m }) => assert_eq!(m, message),
            other => panic!("{value}: unexpected {other:?}"),
        }
    }
}

#[test]
fn stream_is_lazy_and_reports_the_failing_index() {
    let pulled = Cell::new(0);
    let source = (0..).map(|i| {
        pulled.set(pulled.get() + 1);
        if i == 1 {
            Ok::<_, TilesetsError>(json!({"type": "Feature"}))
        } else {
            Ok(feature(json!({"type": "Point", "coordinates": [i, i]})))
        }
    });

    let mut stream = validate_stream(source);
    assert!(stream.next().unwrap().is_ok());
    assert_eq!(pulled.get(), 1);

    let err = stream.next().unwrap().unwrap_err();
    assert_eq!(pulled.get(), 2);
    assert_eq!(
        err.to_string(),
        "Error in feature number 1: 'geometry' is a required property"
    );
}

#[test]
fn stream_passes_features_through_unchanged() {
    let input = vec![
        feature(json!({"type": "Point", "coordinates": [1, 2]})),
        polygon(json!([[0, 0], [1, 0], [1, 1], [0, 0]])),
    ];
    let out: Result<Vec<Value>, ValidationError> =
        validate_stream(input.clone().into_iter().map(Ok)).collect();
    assert_eq!(out.unwrap(), input);
}

#[test]
fn upstream_errors_pass_through() {
    let items: Vec<Result<Value, TilesetsError>> = vec![
        Err(TilesetsError::Usage("unreadable".into())),
        Ok(feature(json!({"type": "Point", "coordinates": [1, 2]}))),
    ];
    let mut stream = validate_stream(items);
    assert!(matches!(stream.next(), Some(Err(TilesetsError::Usage(_)))));
    assert!(matches!(stream.next(), Some(Ok(_))));
    assert!(stream.next().is_none());
}

#[test]
fn changeset_mode_accepts_deletions() {
    let items = vec![
        feature(json!({"type": "Point", "coordinates": [125.6, 10.1]})),
        json!({"id": 3, "delete": true}),
    ];
    let plain: Vec<_> = validate_stream(items.clone().into_iter().map(Ok::<_, ValidationError>)).collect();
    assert!(plain[1].is_err());

    let changeset: Result<Vec<_>, ValidationError> =
        validate_stream_with(items.into_iter().map(Ok), ValidationMode::Changeset).collect();
    assert!(changeset.is_ok());
}
