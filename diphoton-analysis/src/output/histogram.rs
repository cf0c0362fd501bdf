use ndarray::array;
use ndarray_stats::histogram::{Bins, Edges, Grid, Histogram};
use noisy_float::types::{N64, n64};

/// Fixed binning of a one-dimensional histogram: `bins` bins of equal width
/// covering `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Binning {
    pub(crate) bins: usize,
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}

impl Binning {
    pub(crate) const fn new(bins: usize, lower: f64, upper: f64) -> Self {
        Self { bins, lower, upper }
    }

    /// The `bins + 1` bin edges, the last one being exactly `upper`.
    pub(crate) fn edges(&self) -> Vec<f64> {
        let width = self.upper - self.lower;
        (0..self.bins)
            .map(|i| self.lower + width * (i as f64) / (self.bins as f64))
            .chain(std::iter::once(self.upper))
            .collect()
    }
}

/// A named accumulator of scalar observations.
///
/// Bins are half-open, `[low, high)`. Observations below the lowest edge go
/// to the underflow, observations at or above the highest edge go to the
/// overflow, and NaN is counted as invalid. Every call to [Self::fill] counts
/// as one entry.
pub(crate) struct Histogram1D {
    name: String,
    title: String,
    binning: Binning,
    histogram: Histogram<N64>,
    entries: u64,
    underflow: u64,
    overflow: u64,
    invalid: u64,
    sum_x: f64,
    sum_x2: f64,
}

impl Histogram1D {
    pub(crate) fn new(name: &str, title: &str, binning: Binning) -> Self {
        let edges = Edges::from(binning.edges().into_iter().map(n64).collect::<Vec<_>>());
        let grid = Grid::from(vec![Bins::new(edges)]);
        Self {
            name: name.to_owned(),
            title: title.to_owned(),
            binning,
            histogram: Histogram::new(grid),
            entries: 0,
            underflow: 0,
            overflow: 0,
            invalid: 0,
            sum_x: 0.0,
            sum_x2: 0.0,
        }
    }

    pub(crate) fn fill(&mut self, value: f64) {
        self.entries += 1;
        let Some(observation) = N64::try_new(value) else {
            self.invalid += 1;
            return;
        };
        match self.histogram.add_observation(&array![observation]) {
            Ok(()) => {
                self.sum_x += value;
                self.sum_x2 += value * value;
            }
            Err(_) if value < self.binning.lower => self.underflow += 1,
            Err(_) => self.overflow += 1,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn binning(&self) -> &Binning {
        &self.binning
    }

    pub(crate) fn entries(&self) -> u64 {
        self.entries
    }

    pub(crate) fn underflow(&self) -> u64 {
        self.underflow
    }

    pub(crate) fn overflow(&self) -> u64 {
        self.overflow
    }

    pub(crate) fn invalid(&self) -> u64 {
        self.invalid
    }

    /// Number of observations which landed in a bin.
    pub(crate) fn in_range(&self) -> u64 {
        self.entries - self.underflow - self.overflow - self.invalid
    }

    /// Bin counts, lowest bin first.
    pub(crate) fn counts(&self) -> Vec<u64> {
        self.histogram.counts().iter().map(|&count| count as u64).collect()
    }

    /// Index of the bin `value` falls into, `None` if out of range.
    #[cfg(test)]
    pub(crate) fn bin_index(&self, value: f64) -> Option<usize> {
        let value = N64::try_new(value)?;
        self.histogram
            .grid()
            .index_of(&array![value])
            .and_then(|index| index.first().copied())
    }

    /// Mean of the in-range observations, zero if there are none.
    pub(crate) fn mean(&self) -> f64 {
        match self.in_range() {
            0 => 0.0,
            n => self.sum_x / n as f64,
        }
    }

    /// Standard deviation of the in-range observations, zero if there are none.
    pub(crate) fn std_dev(&self) -> f64 {
        match self.in_range() {
            0 => 0.0,
            n => {
                let mean = self.mean();
                (self.sum_x2 / n as f64 - mean * mean).max(0.0).sqrt()
            }
        }
    }
}
