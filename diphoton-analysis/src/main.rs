mod analyzer;
mod error;
mod hdf5_handlers;
mod input;
mod output;
mod progress;
#[cfg(test)]
mod test_utils;

use crate::{
    analyzer::{AnalysisSummary, EventAnalyzer},
    error::AnalysisResult,
    input::{EventSource, Hdf5EventSource},
    output::ResultFile,
    progress::ProgressCounter,
};
use clap::Parser;
use hgam_common::{HGAM_DATA_COLLECTION, tracer::init_tracer};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, error, info};

/// Fills the diphoton invariant mass and leading jet transverse momentum
/// histograms from an HGamData record collection.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// HDF5 file holding the "HGamData" record collection
    input: PathBuf,

    /// HDF5 file the histograms are written to, truncated if it exists
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{e}");
            }
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracer();
    debug!("Args: {:?}", args);

    match run(&args.input, &args.output) {
        Ok(summary) => {
            info!(
                "Processed {} events: {} diphoton masses, {} leading jets",
                summary.events, summary.diphoton_entries, summary.jet_entries
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path, output: &Path) -> AnalysisResult<AnalysisSummary> {
    let mut result_file = ResultFile::create(output)?;
    let mut analyzer = EventAnalyzer::book(&mut result_file);

    info!("reading input file \"{}\"", input.display());
    let mut source = Hdf5EventSource::open(input, HGAM_DATA_COLLECTION)?;
    result_file.set_source_file(input)?;

    let mut progress = ProgressCounter::new(source.total_events());
    let summary = analyzer.run(&mut source, &mut result_file, Some(&mut progress))?;

    for histogram in result_file.histograms().iter() {
        debug!(
            "{}: {} entries, {} underflow, {} overflow, {} invalid",
            histogram.name(),
            histogram.entries(),
            histogram.underflow(),
            histogram.overflow(),
            histogram.invalid()
        );
    }
    result_file.write()?;
    result_file.close()?;
    Ok(summary)
}
