//! The per-record diphoton selection.
use crate::{
    error::AnalysisResult,
    input::EventSource,
    output::{Binning, HistogramId, ObservationSink},
    progress::ProgressObserver,
};
use hgam_common::{
    EventRecord,
    kinematics::{LorentzVector, PtEtaPhiM},
};
use tracing::debug;

pub(crate) const M_YY: &str = "m_yy";
pub(crate) const M_YY_BINNING: Binning = Binning::new(110, 105.0, 160.0);
pub(crate) const PT_J1: &str = "pT_j1";
pub(crate) const PT_J1_BINNING: Binning = Binning::new(500, 0.0, 1000.0);

/// Counts gathered over one pass of the collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnalysisSummary {
    pub(crate) events: usize,
    pub(crate) diphoton_entries: usize,
    pub(crate) jet_entries: usize,
}

/// Fills the diphoton invariant mass of every record, and the transverse
/// momentum of the first stored jet of every record with at least one jet.
pub(crate) struct EventAnalyzer {
    m_yy: HistogramId,
    pt_j1: HistogramId,
}

impl EventAnalyzer {
    /// Books the analysis histograms in `sink`.
    pub(crate) fn book(sink: &mut impl ObservationSink) -> Self {
        Self {
            m_yy: sink.book(M_YY, "", M_YY_BINNING),
            pt_j1: sink.book(PT_J1, "", PT_J1_BINNING),
        }
    }

    /// Returns whether `pT_j1` was filled.
    pub(crate) fn process(&mut self, record: &EventRecord, sink: &mut impl ObservationSink) -> bool {
        let [leading, subleading] = record.photons.each_ref().map(PtEtaPhiM::from);
        sink.record(self.m_yy, (leading + subleading).mass());

        match record.leading_jet().map(PtEtaPhiM::from) {
            Some(jet) => {
                sink.record(self.pt_j1, jet.pt());
                true
            }
            None => false,
        }
    }

    /// Processes every record of `source`, in storage order.
    pub(crate) fn run<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
        sink: &mut impl ObservationSink,
        mut progress: Option<&mut dyn ProgressObserver>,
    ) -> AnalysisResult<AnalysisSummary> {
        let mut summary = AnalysisSummary::default();
        while let Some(record) = source.next_event()? {
            summary.events += 1;
            summary.diphoton_entries += 1;
            if self.process(record, sink) {
                summary.jet_entries += 1;
            }
            if let Some(progress) = progress.as_deref_mut() {
                progress.advance();
            }
        }
        if let Some(progress) = progress {
            progress.finish();
        }
        debug!("{summary:?}");
        Ok(summary)
    }
}
