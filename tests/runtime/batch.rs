//! Integration tests for batch parsing and merging
//!
//! Runs the fixture reports through the parallel batch runner.

use turnreport_debug::{Tracer, TracerConfig};
use turnreport_foundation::{Coords, ErrorKind};
use turnreport_runtime::{AdvisorConfig, ReportInput, merge_batch, parse_batch, read_inputs};

use crate::fixture;

fn config() -> AdvisorConfig {
    AdvisorConfig::new().with_parallelism(2)
}

#[tokio::test]
async fn reads_and_parses_fixture_files() {
    let inputs = read_inputs(&[fixture("semigallians.rep"), fixture("mystic_masons.rep")])
        .await
        .unwrap();
    assert!(inputs[0].source.ends_with("semigallians.rep"));

    let parsed = parse_batch(inputs, &config(), &mut Tracer::disabled()).await.unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].report.faction_number(), Some(18));
    assert_eq!(parsed[1].report.faction_number(), Some(15876));
}

#[tokio::test]
async fn merges_fixture_files() {
    let inputs = read_inputs(&[fixture("semigallians.rep"), fixture("mystic_masons.rep")])
        .await
        .unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    let (report, summary) = merge_batch(inputs, &config(), &mut tracer).await.unwrap();
    assert_eq!(report.faction_number(), Some(18));
    assert_eq!(report.regions.len(), 3);
    assert!(report.region(&Coords::new(50, 18)).is_some());
    assert_eq!(summary.regions_added, 1);
    assert_eq!(tracer.buffer().by_event_type("batch-report-done").len(), 2);
}

#[tokio::test]
async fn single_worker_gives_the_same_result() {
    let text = [
        include_str!("../fixtures/semigallians.rep"),
        include_str!("../fixtures/mystic_masons.rep"),
    ];
    let inputs = || {
        vec![
            ReportInput::new("a", text[0]),
            ReportInput::new("b", text[1]),
        ]
    };
    let (serial, _) = merge_batch(inputs(), &config().with_parallelism(1), &mut Tracer::disabled())
        .await
        .unwrap();
    let (parallel, _) = merge_batch(inputs(), &config(), &mut Tracer::disabled())
        .await
        .unwrap();
    assert_eq!(serial, parallel);
}

#[tokio::test]
async fn section_subset_applies_to_every_report() {
    let inputs = read_inputs(&[fixture("mystic_masons.rep")]).await.unwrap();
    let config = config().with_sections(vec!["battles".into()]);
    let parsed = parse_batch(inputs, &config, &mut Tracer::disabled()).await.unwrap();
    assert_eq!(parsed[0].report.battles.len(), 1);
    assert!(parsed[0].report.regions.is_empty());
}

#[tokio::test]
async fn missing_file_fails_before_parsing() {
    let err = read_inputs(&[fixture("no_such_report.rep")]).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let inputs = vec![ReportInput::new("a", "")];
    let err = parse_batch(inputs, &config().with_parallelism(0), &mut Tracer::disabled())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}
