//! Integration tests for snapshots
//!
//! Stores a merged report and reads it back.

use turnreport_debug::Tracer;
use turnreport_merge::merge_all;
use turnreport_parser::ReportParser;
use turnreport_runtime::serialize::{from_bytes, to_bytes};
use turnreport_runtime::{load_snapshot, save_snapshot};

#[test]
fn merged_report_survives_a_snapshot() {
    let parser = ReportParser::new();
    let primary = parser
        .parse_report(include_str!("../fixtures/semigallians.rep"))
        .unwrap();
    let secondary = parser
        .parse_report(include_str!("../fixtures/mystic_masons.rep"))
        .unwrap();
    let (report, _) = merge_all(primary, [&secondary], &mut Tracer::disabled()).unwrap();

    let path = std::env::temp_dir().join("turnreport_merged_snapshot.msgpack");
    save_snapshot(&report, &path).unwrap();
    let restored = load_snapshot(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(restored, report);
}

#[test]
fn snapshot_bytes_are_smaller_than_json() {
    let report = ReportParser::new()
        .parse_report(include_str!("../fixtures/semigallians.rep"))
        .unwrap();
    let bytes = to_bytes(&report).unwrap();
    let json = serde_json::to_vec(&report).unwrap();
    assert!(bytes.len() < json.len());
    assert_eq!(from_bytes(&bytes).unwrap(), report);
}
