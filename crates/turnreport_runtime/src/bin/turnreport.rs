//! turnreport CLI entry point.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use turnreport_debug::Tracer;
use turnreport_foundation::{JsonSink, Report};
use turnreport_runtime::{
    AdvisorConfig, load_snapshot, merge_batch, read_inputs, save_snapshot,
};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    command: Option<String>,
    files: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    sections: Option<Vec<String>>,
    pretty: bool,
    trace: bool,
    snapshot: Option<PathBuf>,
    jobs: Option<usize>,
    timeout: Option<u64>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-p" | "--pretty" => config.pretty = true,
            "--trace" => config.trace = true,
            "--config" => config.config_file = Some(PathBuf::from(value(&args, &mut i, "--config")?)),
            "--snapshot" => {
                config.snapshot = Some(PathBuf::from(value(&args, &mut i, "--snapshot")?));
            }
            "--sections" => {
                let list = value(&args, &mut i, "--sections")?;
                config.sections = Some(list.split(',').map(|s| s.trim().to_string()).collect());
            }
            "-j" | "--jobs" => {
                let raw = value(&args, &mut i, "--jobs")?;
                config.jobs = Some(raw.parse().map_err(|_| format!("invalid --jobs value: {raw}"))?);
            }
            "--timeout" => {
                let raw = value(&args, &mut i, "--timeout")?;
                config.timeout =
                    Some(raw.parse().map_err(|_| format!("invalid --timeout value: {raw}"))?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            word if config.command.is_none() => config.command = Some(word.to_string()),
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Applies the config file, then the flags.
fn settings(cli: &CliConfig) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config_file {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    if let Some(sections) = &cli.sections {
        config = config.with_sections(sections.clone());
    }
    if let Some(jobs) = cli.jobs {
        config = config.with_parallelism(jobs);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    if cli.pretty {
        config = config.with_pretty(true);
    }
    if cli.trace {
        config = config.with_trace(true);
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help || cli.command.is_none() {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("turnreport {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = settings(&cli)?;
    let mut tracer = Tracer::new(config.trace.tracer_config());

    let result = match cli.command.as_deref() {
        Some("parse") => parse_files(&cli.files, &config, &mut tracer),
        Some("merge") => merge_files(&cli, &config, &mut tracer),
        Some("show") => show_snapshots(&cli.files, &config),
        Some(other) => Err(format!("unknown command: {other}").into()),
        None => Ok(()),
    };
    if tracer.is_enabled() {
        print_trace_summary(&tracer);
    }
    result
}

fn print_trace_summary(tracer: &Tracer) {
    let stats = tracer.stats();
    let mut counts: Vec<_> = stats.event_counts.into_iter().collect();
    counts.sort_unstable();
    eprintln!(
        "trace: {} record(s) over {} report(s)",
        stats.record_count, stats.report_count
    );
    for (event, count) in counts {
        eprintln!("  {event:<20} {count}");
    }
}

/// Streams one JSON document per file to stdout as it is parsed.
fn parse_files(
    files: &[PathBuf],
    config: &AdvisorConfig,
    tracer: &mut Tracer,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("parse needs at least one report file".into());
    }
    let parser = config.parser()?;
    let stdout = io::stdout();
    for path in files {
        let file = File::open(path)
            .map_err(|e| format!("failed to open '{}': {e}", path.display()))?;
        let parser = parser.clone().with_source(path.display().to_string());
        let mut out = stdout.lock();
        if config.pretty {
            let mut sink = JsonSink::pretty(&mut out);
            parser.parse_reader(BufReader::new(file), &mut sink, tracer)?;
            sink.into_inner()?;
        } else {
            let mut sink = JsonSink::new(&mut out);
            parser.parse_reader(BufReader::new(file), &mut sink, tracer)?;
            sink.into_inner()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Parses every file in parallel and prints the merged document.
fn merge_files(
    cli: &CliConfig,
    config: &AdvisorConfig,
    tracer: &mut Tracer,
) -> Result<(), Box<dyn std::error::Error>> {
    if cli.files.len() < 2 {
        return Err("merge needs a primary report and at least one more".into());
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.parallelism)
        .enable_all()
        .build()?;
    let (report, summary) = runtime.block_on(async {
        let inputs = read_inputs(&cli.files).await?;
        merge_batch(inputs, config, tracer).await
    })?;

    if let Some(path) = &cli.snapshot {
        save_snapshot(&report, path)?;
    }
    print_report(&report, config.pretty)?;
    eprintln!(
        "merged {} report(s): {} region(s) added, {} merged, {} unit(s) added, {} updated",
        summary.reports,
        summary.regions_added,
        summary.regions_merged,
        summary.units_added,
        summary.units_updated
    );
    Ok(())
}

/// Prints stored snapshots as JSON.
fn show_snapshots(files: &[PathBuf], config: &AdvisorConfig) -> Result<(), Box<dyn std::error::Error>> {
    for path in files {
        print_report(&load_snapshot(path)?, config.pretty)?;
    }
    Ok(())
}

fn print_report(report: &Report, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, report)?;
    } else {
        serde_json::to_writer(&mut out, report)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mturnreport\x1b[0m - Atlantis turn report parser and merger

\x1b[1mUSAGE:\x1b[0m
    turnreport <COMMAND> [OPTIONS] [FILES...]

\x1b[1mCOMMANDS:\x1b[0m
    parse <FILE>...                 Parse reports, one JSON document per file
    merge <PRIMARY> <FILE>...       Merge reports of one turn into the primary
    show <SNAPSHOT>...              Print stored snapshots as JSON

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -p, --pretty           Pretty-print JSON
    --config <FILE>        Read settings from a TOML file
    --sections <LIST>      Only parse these sections (comma separated)
    -j, --jobs <N>         Reports parsed at once (merge)
    --timeout <SECS>       Deadline for the whole merge
    --snapshot <FILE>      Also save the merged report as MessagePack

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace                Print parse and merge trace events to stderr

\x1b[1mSECTIONS:\x1b[0m
    header, faction-status, errors, battles, events, skill-reports,
    item-reports, object-reports, attitudes, unclaimed-silver, regions,
    orders-template

\x1b[1mEXAMPLES:\x1b[0m
    turnreport parse report.18                    Print report.18 as JSON
    turnreport parse --sections battles r.18      Battles only
    turnreport merge report.18 report.7 -p        Merge two factions' views
    turnreport merge r.18 r.7 --snapshot t3.mp    Merge and keep a snapshot"
    );
}
