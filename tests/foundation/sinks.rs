//! Integration tests for structured sinks
//!
//! Tests event nesting, JSON streaming, and in-memory value building.

use turnreport_foundation::{JsonSink, ReportSink, Scalar, ValueSink, emit};

fn write_sample(sink: &mut dyn ReportSink) {
    sink.begin_object().unwrap();
    sink.field("name", Scalar::Str("Semigallians \"18\"")).unwrap();
    sink.optional_field("missing", None).unwrap();
    sink.property("regions").unwrap();
    sink.begin_array().unwrap();
    sink.scalar(Scalar::from(1u32)).unwrap();
    sink.scalar(Scalar::Float(15.2)).unwrap();
    sink.scalar(Scalar::Null).unwrap();
    sink.end_array().unwrap();
    sink.end_object().unwrap();
}

// =============================================================================
// JSON Sink
// =============================================================================

#[test]
fn json_sink_streams_valid_json() {
    let mut sink = JsonSink::new(Vec::new());
    write_sample(&mut sink);
    assert!(sink.is_complete());
    let bytes = sink.into_inner().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["name"], "Semigallians \"18\"");
    assert_eq!(value["regions"][1], 15.2);
    assert!(value.get("missing").is_none());
}

#[test]
fn json_and_value_sinks_agree() {
    let mut json = JsonSink::pretty(Vec::new());
    write_sample(&mut json);
    let from_json: serde_json::Value =
        serde_json::from_slice(&json.into_inner().unwrap()).unwrap();

    let mut value = ValueSink::new();
    write_sample(&mut value);
    assert_eq!(value.into_value().unwrap(), from_json);
}

#[test]
fn misnested_events_are_sink_errors() {
    let mut sink = JsonSink::new(Vec::new());
    sink.begin_object().unwrap();
    assert!(sink.scalar(Scalar::Bool(true)).is_err());

    let mut sink = ValueSink::new();
    assert!(sink.end_array().is_err());

    let mut sink = ValueSink::new();
    sink.begin_array().unwrap();
    assert!(sink.into_value().is_err());
}

#[test]
fn second_top_level_value_is_rejected() {
    let mut sink = ValueSink::new();
    sink.scalar(Scalar::Int(1)).unwrap();
    assert!(sink.scalar(Scalar::Int(2)).is_err());
}

// =============================================================================
// Value Sink
// =============================================================================

#[test]
fn repeated_array_properties_concatenate() {
    let mut sink = ValueSink::new();
    sink.begin_object().unwrap();
    for batch in [[1, 2], [3, 4]] {
        sink.property("events").unwrap();
        emit(&mut sink, &batch).unwrap();
    }
    sink.end_object().unwrap();
    let value = sink.into_value().unwrap();
    assert_eq!(value["events"], serde_json::json!([1, 2, 3, 4]));
}
