mod generator;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use generator::{EventGenerator, GeneratorConfig};
use hgam_common::{CollectionWriter, HGAM_DATA_COLLECTION, tracer::init_tracer};
use std::path::PathBuf;
use tracing::{debug, info};

const BATCH_SIZE: usize = 1024;

/// Writes a collection of random diphoton records, for testing the analysis.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// HDF5 file to write, truncated if it exists
    #[clap(long)]
    output: PathBuf,

    /// Number of events to generate
    #[clap(long, default_value = "10000")]
    events: usize,

    /// Seed of the random number generator, taken from the clock if absent
    #[clap(long)]
    seed: Option<u64>,

    /// Name of the record collection
    #[clap(long, default_value = HGAM_DATA_COLLECTION)]
    collection: String,

    #[clap(flatten)]
    generator: GeneratorConfig,
}

/// Sizes of a written collection.
#[derive(Debug, PartialEq, Eq)]
struct Written {
    events: usize,
    jets: usize,
}

fn main() -> Result<()> {
    init_tracer();

    let args = Cli::parse();
    debug!("Args: {:?}", args);

    let seed = args
        .seed
        .unwrap_or_else(|| Utc::now().timestamp_subsec_nanos().into());
    info!("Generating {} events with seed {seed}", args.events);

    let written = simulate(&args, seed)?;
    info!(
        "Wrote {} events and {} jets to \"{}\"",
        written.events,
        written.jets,
        args.output.display()
    );
    Ok(())
}

fn simulate(args: &Cli, seed: u64) -> Result<Written> {
    let mut generator = EventGenerator::new(&args.generator, seed)?;

    let file = hdf5::File::create(&args.output)?;
    let mut writer = CollectionWriter::create(&file, &args.collection)?;
    let mut batch = Vec::with_capacity(BATCH_SIZE);
    while writer.num_events() < args.events {
        let size = (args.events - writer.num_events()).min(BATCH_SIZE);
        batch.clear();
        batch.extend((0..size).map(|_| generator.next_record()));
        writer.append(&batch)?;
    }

    let written = Written {
        events: writer.num_events(),
        jets: writer.num_jets(),
    };
    drop(writer);
    file.close()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::Path};

    fn create_test_filename(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("temp_hgam_simulator_{name}.h5"));
        path
    }

    fn cli(output: &Path, events: usize) -> Cli {
        let output = output.display().to_string();
        let events = events.to_string();
        Cli::parse_from([
            "hgam-simulator",
            "--output",
            output.as_str(),
            "--events",
            events.as_str(),
            "--seed",
            "11",
        ])
    }

    #[test]
    fn defaults() {
        let args = Cli::parse_from(["hgam-simulator", "--output", "out.h5"]);
        assert_eq!(args.events, 10000);
        assert_eq!(args.seed, None);
        assert_eq!(args.collection, "HGamData");
        assert_eq!(args.generator.signal_mass, 125.0);
        assert_eq!(args.generator.max_jets, 12);
    }

    #[test]
    fn writes_in_batches() {
        let path = create_test_filename("writes_in_batches");
        let args = cli(&path, 2 * BATCH_SIZE + 5);
        let written = simulate(&args, 11).unwrap();
        assert_eq!(written.events, 2 * BATCH_SIZE + 5);

        let file = hdf5::File::open(&path).unwrap();
        let njets = file.dataset("HGamData/njets").unwrap().read_raw::<u32>().unwrap();
        assert_eq!(njets.len(), written.events);
        let total: usize = njets.iter().map(|&n| n as usize).sum();
        assert_eq!(total, written.jets);
        let jet_pt = file.dataset("HGamData/jet_pt").unwrap();
        assert_eq!(jet_pt.size(), written.jets);
        let photon_pt = file.dataset("HGamData/photon_pt").unwrap();
        assert_eq!(photon_pt.shape(), vec![written.events, 2]);

        drop(file);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn seed_reproduces_file() {
        let first = create_test_filename("seed_reproduces_file_first");
        let second = create_test_filename("seed_reproduces_file_second");
        simulate(&cli(&first, 300), 11).unwrap();
        simulate(&cli(&second, 300), 11).unwrap();

        let read = |path: &Path| {
            let file = hdf5::File::open(path).unwrap();
            let photon_pt = file
                .dataset("HGamData/photon_pt")
                .unwrap()
                .read_raw::<f32>()
                .unwrap();
            let jet_pt = file
                .dataset("HGamData/jet_pt")
                .unwrap()
                .read_raw::<f32>()
                .unwrap();
            (photon_pt, jet_pt)
        };
        assert_eq!(read(first.as_path()), read(second.as_path()));

        let _ = fs::remove_file(first);
        let _ = fs::remove_file(second);
    }

    #[test]
    fn no_events() {
        let path = create_test_filename("no_events");
        let written = simulate(&cli(&path, 0), 11).unwrap();
        assert_eq!(written, Written { events: 0, jets: 0 });
        let _ = fs::remove_file(path);
    }
}
