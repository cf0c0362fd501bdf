//! Reads a record collection from an HDF5 file, one chunk of records at a time.
use super::EventSource;
use crate::{
    error::{AnalysisError, AnalysisResult, MalformedReason},
    hdf5_handlers::{DatasetExt, GroupExt, Hdf5Result},
};
use hdf5::{Dataset, File};
use hgam_common::{
    Component, EventField, EventRecord, JetCount, PHOTONS_PER_EVENT, PhysicsObject,
};
use itertools::izip;
use ndarray::{Array1, Array2, s};
use std::{array, ops::Range, path::Path};
use strum::IntoEnumIterator;
use tracing::{debug, info};

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 4096;

/// [EventSource] backed by a record collection in an HDF5 file.
///
/// The layout of the collection is checked once, when it is opened, so that
/// reading a chunk can only fail on I/O.
pub(crate) struct Hdf5EventSource {
    _file: File,
    collection: String,
    njets: Array1<JetCount>,
    photons: [Dataset; 4],
    jets: [Dataset; 4],
    chunk_size: usize,
    next_event: usize,
    next_jet: usize,
    buffer: Vec<EventRecord>,
    position: usize,
}

impl Hdf5EventSource {
    #[tracing::instrument(skip_all, fields(path = %path.display(), collection = name))]
    pub(crate) fn open(path: &Path, name: &str) -> AnalysisResult<Self> {
        let file = File::open(path).map_err(|source| AnalysisError::InputOpen {
            path: path.to_owned(),
            source,
        })?;
        let group = file
            .link_exists(name)
            .then(|| file.get_group(name).ok())
            .flatten()
            .ok_or_else(|| AnalysisError::MissingCollection {
                name: name.to_owned(),
                path: path.to_owned(),
            })?;

        let malformed = |reason: MalformedReason| AnalysisError::MalformedCollection {
            collection: name.to_owned(),
            reason,
        };

        if let Some(field) = EventField::iter().find(|field| !group.link_exists(field.name())) {
            return Err(malformed(MalformedReason::MissingField(field)));
        }

        let njets = group.get_dataset(EventField::Njets.name())?;
        check_one_dimensional(&njets, EventField::Njets).map_err(malformed)?;
        let njets = njets.read_all_1d::<JetCount>()?;
        let num_events = njets.len();
        let num_jets: usize = njets.iter().map(|&n| n as usize).sum();

        let open_photons = |component| -> AnalysisResult<Dataset> {
            let field = EventField::photon(component);
            let dataset = group.get_dataset(field.name())?;
            let shape = dataset.shape();
            let valid = matches!(
                shape.as_slice(),
                [events, columns] if *events == num_events && *columns >= PHOTONS_PER_EVENT
            );
            if valid {
                Ok(dataset)
            } else {
                Err(malformed(MalformedReason::FieldShape {
                    field,
                    expected: format!("[{num_events}, >= {PHOTONS_PER_EVENT}]"),
                    found: shape,
                }))
            }
        };
        let photons = [
            open_photons(Component::Pt)?,
            open_photons(Component::Eta)?,
            open_photons(Component::Phi)?,
            open_photons(Component::M)?,
        ];

        let open_jets = |component| -> AnalysisResult<Dataset> {
            let field = EventField::jet(component);
            let dataset = group.get_dataset(field.name())?;
            check_one_dimensional(&dataset, field).map_err(malformed)?;
            if dataset.size() == num_jets {
                Ok(dataset)
            } else {
                Err(malformed(MalformedReason::FieldLength {
                    field,
                    expected: num_jets,
                    found: dataset.size(),
                }))
            }
        };
        let jets = [
            open_jets(Component::Pt)?,
            open_jets(Component::Eta)?,
            open_jets(Component::Phi)?,
            open_jets(Component::M)?,
        ];

        info!("Collection \"{name}\" holds {num_events} events and {num_jets} jets");
        Ok(Self {
            _file: file,
            collection: name.to_owned(),
            njets,
            photons,
            jets,
            chunk_size: DEFAULT_CHUNK_SIZE,
            next_event: 0,
            next_jet: 0,
            buffer: Vec::new(),
            position: 0,
        })
    }

    /// Sets the number of records read from the file at once.
    #[cfg(test)]
    pub(crate) fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Replaces the buffer with the records following the last chunk.
    fn load_chunk(&mut self) -> AnalysisResult<()> {
        let events = self.next_event..(self.next_event + self.chunk_size).min(self.njets.len());
        let njets = self.njets.slice(s![events.clone()]);
        let num_jets: usize = njets.iter().map(|&n| n as usize).sum();
        let jets = self.next_jet..(self.next_jet + num_jets);

        let [photon_pt, photon_eta, photon_phi, photon_m] =
            read_photons(&self.photons, events.clone())?;
        let [jet_pt, jet_eta, jet_phi, jet_m] = read_jets(&self.jets, jets.clone())?;
        let mut jet_objects = izip!(jet_pt.iter(), jet_eta.iter(), jet_phi.iter(), jet_m.iter())
            .map(|(&pt, &eta, &phi, &m)| PhysicsObject::new(pt, eta, phi, m));

        self.buffer.clear();
        for (pt, eta, phi, m, &count) in izip!(
            photon_pt.rows(),
            photon_eta.rows(),
            photon_phi.rows(),
            photon_m.rows(),
            njets.iter()
        ) {
            // Rows hold exactly PHOTONS_PER_EVENT columns
            let mut objects = izip!(pt, eta, phi, m)
                .map(|(&pt, &eta, &phi, &m)| PhysicsObject::new(pt, eta, phi, m));
            let photons: [PhysicsObject; PHOTONS_PER_EVENT] =
                array::from_fn(|_| objects.next().unwrap_or_default());
            let event_jets = jet_objects.by_ref().take(count as usize).collect();
            self.buffer.push(EventRecord::new(photons, event_jets));
        }

        debug!(
            "Loaded events {}..{} ({} jets) of \"{}\"",
            events.start, events.end, num_jets, self.collection
        );
        self.position = 0;
        self.next_event = events.end;
        self.next_jet = jets.end;
        Ok(())
    }
}

impl EventSource for Hdf5EventSource {
    fn total_events(&self) -> usize {
        self.njets.len()
    }

    fn next_event(&mut self) -> AnalysisResult<Option<&EventRecord>> {
        if self.position >= self.buffer.len() {
            if self.next_event >= self.njets.len() {
                return Ok(None);
            }
            self.load_chunk()?;
        }
        let index = self.position;
        self.position += 1;
        Ok(self.buffer.get(index))
    }
}

fn check_one_dimensional(dataset: &Dataset, field: EventField) -> Result<(), MalformedReason> {
    let shape = dataset.shape();
    if shape.len() == 1 {
        Ok(())
    } else {
        Err(MalformedReason::FieldShape {
            field,
            expected: "one dimension".to_owned(),
            found: shape,
        })
    }
}

fn read_photons(datasets: &[Dataset; 4], events: Range<usize>) -> Hdf5Result<[Array2<f32>; 4]> {
    let [pt, eta, phi, m] = datasets;
    Ok([
        pt.read_rows_2d(events.clone(), PHOTONS_PER_EVENT)?,
        eta.read_rows_2d(events.clone(), PHOTONS_PER_EVENT)?,
        phi.read_rows_2d(events.clone(), PHOTONS_PER_EVENT)?,
        m.read_rows_2d(events, PHOTONS_PER_EVENT)?,
    ])
}

fn read_jets(datasets: &[Dataset; 4], jets: Range<usize>) -> Hdf5Result<[Array1<f32>; 4]> {
    let [pt, eta, phi, m] = datasets;
    Ok([
        pt.read_range_1d(jets.clone())?,
        eta.read_range_1d(jets.clone())?,
        phi.read_range_1d(jets.clone())?,
        m.read_range_1d(jets)?,
    ])
}
