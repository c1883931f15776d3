//! Batch parsing and merging.
//!
//! ```text
//!  report 1 ──► spawn_blocking ──┐
//!  report 2 ──► spawn_blocking ──┼─► join all ─► merge ─► one report
//!  report N ──► spawn_blocking ──┘
//!        (at most `parallelism` at once)
//! ```
//!
//! Each report is parsed on the blocking pool into its own document. The
//! merge is the only point where documents meet, and it starts only after
//! every parse has finished. The whole batch runs under one deadline; when
//! it passes, the shared cancel flag stops the parsers at their next block.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use turnreport_debug::Tracer;
use turnreport_foundation::{CancelFlag, Error, ErrorKind, Report, Result};
use turnreport_merge::{MergeSummary, merge_all};
use turnreport_parser::ReportParser;

use crate::config::AdvisorConfig;

// =============================================================================
// Inputs and Outputs
// =============================================================================

/// One report's text and the name it is known by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportInput {
    /// Name used in traces and errors.
    pub source: String,
    /// The report text.
    pub text: String,
}

impl ReportInput {
    /// Wraps in-memory text.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Reads a report file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    pub async fn read(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// Reads every report file, in order.
///
/// # Errors
/// Returns the first I/O error.
pub async fn read_inputs(paths: &[PathBuf]) -> Result<Vec<ReportInput>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        inputs.push(ReportInput::read(path).await?);
    }
    Ok(inputs)
}

/// A parsed report and its source name.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedReport {
    /// Name of the input.
    pub source: String,
    /// The document.
    pub report: Report,
}

// =============================================================================
// Batch Runner
// =============================================================================

/// Parses every input, at most `parallelism` at once.
///
/// Results come back in input order.
///
/// # Errors
/// Returns the first failed parse (in input order), a timeout if the batch
/// deadline passes, or a configuration error.
pub async fn parse_batch(
    inputs: Vec<ReportInput>,
    config: &AdvisorConfig,
    tracer: &mut Tracer,
) -> Result<Vec<ParsedReport>> {
    config.validate()?;
    let cancel = CancelFlag::new();
    let parser = config.parser()?.with_cancel(cancel.clone());
    let parallelism = config.parallelism;
    with_deadline(
        config.batch_timeout_secs,
        &cancel,
        parse_all(inputs, parser, parallelism, tracer),
    )
    .await
}

/// Parses every input, then merges them into the first.
///
/// # Errors
/// Returns parse errors as [`parse_batch`] does, a merge error for an empty
/// batch or for reports from different turns, or a timeout.
pub async fn merge_batch(
    inputs: Vec<ReportInput>,
    config: &AdvisorConfig,
    tracer: &mut Tracer,
) -> Result<(Report, MergeSummary)> {
    if inputs.is_empty() {
        return Err(Error::merge("no reports to merge"));
    }
    config.validate()?;
    let cancel = CancelFlag::new();
    let parser = config.parser()?.with_cancel(cancel.clone());
    let parallelism = config.parallelism;
    with_deadline(config.batch_timeout_secs, &cancel, async move {
        let mut parsed = parse_all(inputs, parser, parallelism, tracer).await?.into_iter();
        let Some(primary) = parsed.next() else {
            return Err(Error::merge("no reports to merge"));
        };
        let rest: Vec<Report> = parsed.map(|p| p.report).collect();
        merge_all(primary.report, &rest, tracer)
    })
    .await
}

async fn with_deadline<T>(
    seconds: u64,
    cancel: &CancelFlag,
    job: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(Duration::from_secs(seconds), job).await {
        Ok(result) => result,
        Err(_) => {
            cancel.cancel();
            Err(Error::new(ErrorKind::Timeout { seconds }))
        }
    }
}

async fn parse_all(
    inputs: Vec<ReportInput>,
    parser: ReportParser,
    parallelism: usize,
    tracer: &mut Tracer,
) -> Result<Vec<ParsedReport>> {
    let permits = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut tasks = JoinSet::new();
    let count = inputs.len();

    for (index, input) in inputs.into_iter().enumerate() {
        let permit = Arc::clone(&permits)
            .acquire_owned()
            .await
            .map_err(|e| Error::io(format!("worker pool closed: {e}")))?;
        let parser = parser.clone().with_source(input.source.clone());
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let started = Instant::now();
            let result = parser.parse_report(&input.text);
            (index, input.source, started.elapsed(), result)
        });
    }

    let mut slots: Vec<Option<ParsedReport>> = (0..count).map(|_| None).collect();
    let mut failures: Vec<(usize, Error)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, source, elapsed, result) =
            joined.map_err(|e| Error::io(format!("parse worker failed: {e}")))?;
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        tracer.batch_report_done(&source, millis, result.is_ok());
        match result {
            Ok(report) => slots[index] = Some(ParsedReport { source, report }),
            Err(e) => failures.push((index, e)),
        }
    }

    if let Some((_, error)) = failures.into_iter().min_by_key(|(index, _)| *index) {
        return Err(error);
    }
    Ok(slots.into_iter().flatten().collect())
}
