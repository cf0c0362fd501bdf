//! Histogram booking and persistence.
mod histogram;
mod result_file;

pub(crate) use histogram::{Binning, Histogram1D};
pub(crate) use result_file::ResultFile;

/// Handle to a histogram booked in an [ObservationSink].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HistogramId(usize);

/// Accepts scalar observations for histograms of fixed binning.
pub(crate) trait ObservationSink {
    /// Creates an empty histogram and returns its handle.
    fn book(&mut self, name: &str, title: &str, binning: Binning) -> HistogramId;

    fn record(&mut self, histogram: HistogramId, value: f64);
}

/// In-memory [ObservationSink], histograms are kept in booking order.
#[derive(Default)]
pub(crate) struct HistogramRegistry {
    histograms: Vec<Histogram1D>,
}

impl HistogramRegistry {
    #[cfg(test)]
    pub(crate) fn get(&self, histogram: HistogramId) -> Option<&Histogram1D> {
        self.histograms.get(histogram.0)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Histogram1D> {
        self.histograms.iter()
    }
}

impl ObservationSink for HistogramRegistry {
    fn book(&mut self, name: &str, title: &str, binning: Binning) -> HistogramId {
        self.histograms.push(Histogram1D::new(name, title, binning));
        HistogramId(self.histograms.len() - 1)
    }

    fn record(&mut self, histogram: HistogramId, value: f64) {
        if let Some(histogram) = self.histograms.get_mut(histogram.0) {
            histogram.fill(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_order() {
        let mut registry = HistogramRegistry::default();
        let first = registry.book("first", "", Binning::new(10, 0.0, 10.0));
        let second = registry.book("second", "", Binning::new(5, 0.0, 1.0));

        registry.record(second, 0.5);
        registry.record(second, 0.7);
        registry.record(first, 3.0);

        let names: Vec<_> = registry.iter().map(Histogram1D::name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(registry.get(first).map(Histogram1D::entries), Some(1));
        assert_eq!(registry.get(second).map(Histogram1D::entries), Some(2));
    }

    #[test]
    fn unknown_histogram() {
        let registry = HistogramRegistry::default();
        assert!(registry.get(HistogramId(3)).is_none());
    }
}
