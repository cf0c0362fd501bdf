use super::{Binning, Histogram1D, HistogramId, HistogramRegistry, ObservationSink};
use crate::{
    error::{AnalysisError, AnalysisResult},
    hdf5_handlers::{GroupExt, HasAttributesExt, Hdf5Error, Hdf5Result},
};
use chrono::Utc;
use hdf5::{File, Group};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CREATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Output file owning every histogram booked through it.
///
/// Histograms live in memory until [Self::write] persists them, one group per
/// histogram, named after it.
pub(crate) struct ResultFile {
    file: File,
    path: PathBuf,
    histograms: HistogramRegistry,
}

impl ResultFile {
    /// Creates the file at `path`, truncating any existing content.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub(crate) fn create(path: &Path) -> AnalysisResult<Self> {
        let file = File::create(path).map_err(|source| AnalysisError::OutputOpen {
            path: path.to_owned(),
            source,
        })?;
        file.add_constant_string_attribute("file_name", &path.display().to_string())?;
        file.add_constant_string_attribute("file_time", &Utc::now().to_rfc3339())?;
        file.add_constant_string_attribute("creator", CREATOR)?;
        debug!("Created result file");
        Ok(Self {
            file,
            path: path.to_owned(),
            histograms: HistogramRegistry::default(),
        })
    }

    pub(crate) fn set_source_file(&self, source: &Path) -> AnalysisResult<()> {
        self.file
            .add_constant_string_attribute("source_file", &source.display().to_string())?;
        Ok(())
    }

    pub(crate) fn histograms(&self) -> &HistogramRegistry {
        &self.histograms
    }

    /// Persists every histogram. Call once, after the last observation.
    pub(crate) fn write(&self) -> AnalysisResult<()> {
        for histogram in self.histograms.iter() {
            write_histogram(&self.file, histogram)?;
        }
        self.file.flush().map_err(Hdf5Error::from)?;
        info!(
            "Wrote {} histograms to \"{}\"",
            self.histograms.iter().count(),
            self.path.display()
        );
        Ok(())
    }

    pub(crate) fn close(self) -> AnalysisResult<()> {
        self.file.close().map_err(Hdf5Error::from)?;
        Ok(())
    }
}

impl ObservationSink for ResultFile {
    fn book(&mut self, name: &str, title: &str, binning: Binning) -> HistogramId {
        self.histograms.book(name, title, binning)
    }

    fn record(&mut self, histogram: HistogramId, value: f64) {
        self.histograms.record(histogram, value);
    }
}

#[tracing::instrument(skip_all, level = "debug", fields(histogram = histogram.name()))]
fn write_histogram(parent: &Group, histogram: &Histogram1D) -> Hdf5Result<Group> {
    let group = parent.add_new_group(histogram.name())?;
    group.add_constant_string_attribute("title", histogram.title())?;
    group.add_constant_scalar_attribute("entries", &histogram.entries())?;
    group.add_constant_scalar_attribute("underflow", &histogram.underflow())?;
    group.add_constant_scalar_attribute("overflow", &histogram.overflow())?;
    group.add_constant_scalar_attribute("invalid", &histogram.invalid())?;
    group.add_constant_scalar_attribute("mean", &histogram.mean())?;
    group.add_constant_scalar_attribute("std_dev", &histogram.std_dev())?;
    group.create_constant_slice_dataset("counts", &histogram.counts())?;
    group.create_constant_slice_dataset("edges", &histogram.binning().edges())?;
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TempPath;
    use hdf5::types::VarLenUnicode;

    fn read_string_attribute(group: &Group, name: &str) -> String {
        group
            .attr(name)
            .unwrap()
            .read_scalar::<VarLenUnicode>()
            .unwrap()
            .to_string()
    }

    #[test]
    fn histograms_are_persisted() {
        let temp = TempPath::new("histograms_are_persisted");
        let mut result = ResultFile::create(temp.path()).unwrap();
        let id = result.book("pT_j1", "", Binning::new(4, 0.0, 100.0));
        for value in [10.0, 30.0, 35.0, -1.0, 100.0, f64::NAN] {
            result.record(id, value);
        }
        result.set_source_file(Path::new("input.h5")).unwrap();
        result.write().unwrap();
        result.close().unwrap();

        let file = File::open(temp.path()).unwrap();
        assert_eq!(read_string_attribute(&file, "source_file"), "input.h5");
        assert_eq!(read_string_attribute(&file, "creator"), CREATOR);
        assert!(file.attr("file_time").is_ok());

        let group = file.group("pT_j1").unwrap();
        assert_eq!(read_string_attribute(&group, "title"), "");
        let scalar = |name: &str| group.attr(name).unwrap().read_scalar::<u64>().unwrap();
        assert_eq!(scalar("entries"), 6);
        assert_eq!(scalar("underflow"), 1);
        assert_eq!(scalar("overflow"), 1);
        assert_eq!(scalar("invalid"), 1);

        let counts = group.dataset("counts").unwrap().read_raw::<u64>().unwrap();
        assert_eq!(counts, vec![1, 2, 0, 0]);
        let edges = group.dataset("edges").unwrap().read_raw::<f64>().unwrap();
        assert_eq!(edges, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn existing_content_is_truncated() {
        let temp = TempPath::new("existing_content_is_truncated");
        let file = File::create(temp.path()).unwrap();
        file.create_group("stale").unwrap();
        file.close().unwrap();

        ResultFile::create(temp.path()).unwrap().close().unwrap();

        let file = File::open(temp.path()).unwrap();
        assert!(!file.link_exists("stale"));
    }

    #[test]
    fn unwritable_output() {
        let path = Path::new("/nonexistent_directory/result.h5");
        assert!(matches!(
            ResultFile::create(path),
            Err(AnalysisError::OutputOpen { .. })
        ));
    }
}
