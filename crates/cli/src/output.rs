//! Output rendering: the cache-dump (`p`) directive's stdout banner and the
//! persisted `./out_files/out_<trace-filename>` report. Formatting lives
//! entirely here — the core crate only ever hands back a [`StatsReport`]
//! and `Vec<Vec<CacheLine>>` snapshots, with no opinion on presentation.

use coherence_core::coherence::CacheLine;
use coherence_core::coherence::LineState;
use coherence_core::common::SimError;
use coherence_core::stats::StatsReport;
use std::fs;
use std::path::Path;

/// Prints one `----Pk----` banner per processor, listing only the
/// non-`Invalid` lines as `Idx: <index> <state> <tag>`.
pub fn print_cache_dump(dump: &[Vec<CacheLine>]) {
    println!("\nCACHE TABLES:\n");
    for (processor, lines) in dump.iter().enumerate() {
        println!("----P{processor}----\n");
        for (index, line) in lines.iter().enumerate() {
            if line.state != LineState::Invalid {
                match line.tag {
                    Some(tag) => println!("Idx: {index} {} tag={tag}", line.state),
                    None => println!("Idx: {index} {}", line.state),
                }
            }
        }
        println!();
    }
    println!("==========\n");
}

/// Prints the `h` directive's current hit rate.
pub fn print_hit_rate(hit_rate: f64) {
    println!("HIT RATE: {hit_rate}");
}

/// Writes `report` to `./out_files/out_<trace_filename>`, creating the
/// `out_files` directory if it does not already exist.
///
/// Called exactly once, after the whole trace has been consumed: there is
/// no partial output on a trace error, because this is only reached on a
/// fully successful run.
pub fn write_report(trace_filename: &str, report: &StatsReport) -> Result<(), SimError> {
    let out_dir = Path::new("./out_files");
    fs::create_dir_all(out_dir).map_err(|e| SimError::io(out_dir.display().to_string(), e))?;

    let out_path = out_dir.join(format!("out_{trace_filename}"));
    fs::write(&out_path, report.to_string()).map_err(|e| SimError::io(out_path.display().to_string(), e))?;

    println!("File {} written with these stats:\n\n{report}", out_path.display());
    Ok(())
}
