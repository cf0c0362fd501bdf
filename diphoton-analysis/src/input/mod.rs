//! Sources of [EventRecord]s.
mod hdf5_source;

use crate::error::AnalysisResult;
use hgam_common::EventRecord;

pub(crate) use hdf5_source::Hdf5EventSource;

/// Yields the records of a collection in storage order.
///
/// The returned record is only valid until the next call to
/// [Self::next_event].
pub(crate) trait EventSource {
    /// Number of records in the collection.
    fn total_events(&self) -> usize;

    /// Returns the next record, or `None` once the collection is exhausted.
    fn next_event(&mut self) -> AnalysisResult<Option<&EventRecord>>;
}

/// Serves records from memory.
#[cfg(test)]
pub(crate) struct VecEventSource {
    records: Vec<EventRecord>,
    next: usize,
}

#[cfg(test)]
impl VecEventSource {
    pub(crate) fn new(records: Vec<EventRecord>) -> Self {
        Self { records, next: 0 }
    }
}

#[cfg(test)]
impl EventSource for VecEventSource {
    fn total_events(&self) -> usize {
        self.records.len()
    }

    fn next_event(&mut self) -> AnalysisResult<Option<&EventRecord>> {
        let index = self.next;
        self.next = (index + 1).min(self.records.len());
        Ok(self.records.get(index))
    }
}
