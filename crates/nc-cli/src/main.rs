//! NuComp CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use nc_core::{InputConfig, InputHandler};
use nc_input::HepmcInputHandler;

#[derive(Parser)]
#[command(name = "nucomp")]
#[command(about = "NuComp - Generator predictions vs. neutrino cross-section data")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-scan inputs and report events, conventions, and normalization
    Scan {
        /// Input file or comma-separated list, parentheses optional
        #[arg(short, long)]
        input: String,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare generator predictions against a published measurement
    Compare {
        /// Input file or comma-separated list, parentheses optional
        #[arg(short, long)]
        input: String,

        /// Measurement name (see `nucomp measurements`)
        #[arg(short, long)]
        measurement: String,

        /// Cap on the number of events read
        #[arg(long)]
        max_events: Option<u64>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump reconstructed events for inspection
    Events {
        /// Input file or comma-separated list, parentheses optional
        #[arg(short, long)]
        input: String,

        /// First entry to dump
        #[arg(long, default_value = "0")]
        entry: u64,

        /// Number of entries to dump
        #[arg(long, default_value = "1")]
        count: u64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available measurements
    Measurements,

    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Scan { input, output } => cmd_scan(&input, output.as_ref()),
        Commands::Compare { input, measurement, max_events, output } => {
            cmd_compare(&input, &measurement, max_events, output.as_ref())
        }
        Commands::Events { input, entry, count, output } => {
            cmd_events(&input, entry, count, output.as_ref())
        }
        Commands::Measurements => {
            for name in MEASUREMENTS {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Version => {
            println!("nucomp {}", nc_core::VERSION);
            Ok(())
        }
    }
}

const MEASUREMENTS: &[&str] =
    &["BNL_CC1npip_XSec_1DEnu_nu", "BNL_CC1npip_XSec_1DEnu_nu_UNCORR"];

#[derive(Serialize)]
struct FileReport {
    path: String,
    n_events: u64,
    fatx: f64,
}

#[derive(Serialize)]
struct ScanReport {
    n_events: u64,
    normalization: f64,
    weight_names: Vec<String>,
    precomputed_fatx: Option<f64>,
    files: Vec<FileReport>,
}

fn cmd_scan(input: &str, output: Option<&PathBuf>) -> Result<()> {
    let handler = HepmcInputHandler::new("scan", input, &InputConfig::default())?;
    let meta = handler.metadata();
    let report = ScanReport {
        n_events: handler.n_events(),
        normalization: handler.normalization(),
        weight_names: meta.weight_names.clone(),
        precomputed_fatx: meta.precomputed_fatx,
        files: handler
            .inputs()
            .iter()
            .map(|s| FileReport {
                path: s.path.display().to_string(),
                n_events: s.n_events,
                fatx: s.fatx,
            })
            .collect(),
    };
    write_output(&report, output)
}

fn cmd_compare(
    input: &str,
    measurement: &str,
    max_events: Option<u64>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let config = InputConfig { max_events };
    let mut handler = HepmcInputHandler::new(measurement, input, &config)?;
    let m = nc_measure::from_name(measurement)?;
    let result = nc_measure::run_comparison(m.as_ref(), &mut handler)?;
    write_output(&result, output)
}

#[derive(Serialize)]
struct ParticleDump {
    pid: i32,
    state: nc_core::ParticleState,
    primary_vertex: bool,
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
}

#[derive(Serialize)]
struct EventDump {
    entry: u64,
    event_no: i64,
    mode: i32,
    target_a: i32,
    target_z: i32,
    bound: bool,
    input_weight: f64,
    particles: Vec<ParticleDump>,
}

fn cmd_events(input: &str, entry: u64, count: u64, output: Option<&PathBuf>) -> Result<()> {
    let mut handler = HepmcInputHandler::new("events", input, &InputConfig::default())?;
    let mut dumps = Vec::new();
    for e in entry..entry.saturating_add(count) {
        let event = match handler.event(e)? {
            Some(ev) => ev,
            None => break,
        };
        dumps.push(EventDump {
            entry: e,
            event_no: event.event_no,
            mode: event.mode,
            target_a: event.target_a,
            target_z: event.target_z,
            bound: event.bound,
            input_weight: event.input_weight,
            particles: event
                .particles()
                .iter()
                .map(|p| ParticleDump {
                    pid: p.pid,
                    state: p.state,
                    primary_vertex: p.primary_vertex,
                    px: p.mom.px,
                    py: p.mom.py,
                    pz: p.mom.pz,
                    e: p.mom.e,
                })
                .collect(),
        });
    }
    write_output(&dumps, output)
}

fn write_output<T: Serialize>(value: &T, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
