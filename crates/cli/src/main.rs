//! Directory-based cache coherence simulator CLI.
//!
//! This binary is the "Parser / CLI" collaborator the `coherence-core`
//! library treats as external (§6 of the simulator's interface): it owns
//! argument parsing, trace tokenizing, the verbose-logging subscriber, and
//! rendering the final statistics to `./out_files/`. The core crate never
//! touches `argv`, a file handle, or stdout.

mod output;
mod trace;

use clap::Parser;
use coherence_core::common::SimError;
use coherence_core::config::{Protocol, SimConfig};
use coherence_core::sim::simulator::{SimEvent, Simulator};
use std::fs;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

/// Run a directory-coherence trace and report its cycle-accounted
/// statistics.
///
/// The trace file must already exist under `./cache-traces/`; the rendered
/// `StatsReport` is written to `./out_files/out_<trace-filename>`.
#[derive(Parser, Debug)]
#[command(name = "coherence-sim", version, about)]
struct Cli {
    /// Trace filename, relative to ./cache-traces/.
    trace_filename: String,

    /// Pass `o` to select the MESI optimization; default is MSI.
    #[arg(value_parser = ["o"])]
    optimization: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let help_requested = matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            process::exit(if help_requested { 0 } else { 1 });
        }
    };

    let protocol = if cli.optimization.is_some() { Protocol::Mesi } else { Protocol::Msi };
    let config = SimConfig { protocol, ..SimConfig::default() };

    let reload_handle = init_logging();

    if let Err(err) = run(&cli.trace_filename, config, &reload_handle) {
        eprintln!("{err}");
        process::exit(1);
    }
}

/// Installs a `tracing-subscriber` formatter whose filter starts at `warn`
/// and is raised to `trace` (and lowered back) by the trace's `v`
/// directive. The returned handle is the only thing [`run`] uses to react
/// to [`SimEvent::VerboseToggled`]; the core itself never knows whether
/// logging is on.
fn init_logging() -> tracing_subscriber::reload::Handle<EnvFilter, tracing_subscriber::Registry> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_filter_reloading();
    let handle = builder.reload_handle();
    builder.init();
    handle
}

fn run(
    trace_filename: &str,
    config: SimConfig,
    reload_handle: &tracing_subscriber::reload::Handle<EnvFilter, tracing_subscriber::Registry>,
) -> Result<(), SimError> {
    let trace_path = Path::new("./cache-traces").join(trace_filename);
    let contents = fs::read_to_string(&trace_path).map_err(|e| SimError::io(trace_path.display().to_string(), e))?;

    let mut simulator = Simulator::new(config);

    for (offset, raw_line) in contents.lines().enumerate() {
        let line_no = offset + 1;
        let Some(entry) = trace::parse_line(raw_line, line_no, config.num_processors)? else {
            continue;
        };

        match simulator.execute(entry) {
            SimEvent::Access { .. } => {}
            SimEvent::VerboseToggled(now_verbose) => {
                let level = if now_verbose { "trace" } else { "warn" };
                let _ = reload_handle.reload(EnvFilter::new(level));
            }
            SimEvent::CacheDump(dump) => output::print_cache_dump(&dump),
            SimEvent::HitRate(hit_rate) => output::print_hit_rate(hit_rate),
        }
    }

    output::write_report(trace_filename, &simulator.report())
}
