//! Columnar layout of a record collection in an HDF5 group.
//!
//! A collection holds one dataset per [EventField]. `njets` has one entry per
//! event, the photon fields are `[events, 2]`, and the jet fields are flat:
//! the jets of every event are appended one event after the other, so the
//! jets of event `i` start at the sum of `njets` over the preceding events.
use crate::{EventRecord, JetCount, PHOTONS_PER_EVENT, PhysicsObject};
use hdf5::{Dataset, Group};
use ndarray::{Array1, Array2, s};
use strum::{Display, EnumIter, IntoStaticStr};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("HDF5 Error: {0}")]
    HDF5(#[from] hdf5::Error),
    #[error("Shape Error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("Collection \"{0}\" already exists")]
    CollectionExists(String),
}

/// Kinematic component of a [PhysicsObject].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Pt,
    Eta,
    Phi,
    M,
}

impl Component {
    /// Components in the order [PhysicsObject::new] takes them.
    pub const ALL: [Component; 4] = [Self::Pt, Self::Eta, Self::Phi, Self::M];

    pub fn of(self, object: &PhysicsObject) -> f32 {
        match self {
            Self::Pt => object.pt,
            Self::Eta => object.eta,
            Self::Phi => object.phi,
            Self::M => object.m,
        }
    }
}

/// Names of the datasets making up a record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventField {
    Njets,
    PhotonPt,
    PhotonEta,
    PhotonPhi,
    PhotonM,
    JetPt,
    JetEta,
    JetPhi,
    JetM,
}

impl EventField {
    pub fn photon(component: Component) -> Self {
        match component {
            Component::Pt => Self::PhotonPt,
            Component::Eta => Self::PhotonEta,
            Component::Phi => Self::PhotonPhi,
            Component::M => Self::PhotonM,
        }
    }

    pub fn jet(component: Component) -> Self {
        match component {
            Component::Pt => Self::JetPt,
            Component::Eta => Self::JetEta,
            Component::Phi => Self::JetPhi,
            Component::M => Self::JetM,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Appends [EventRecord]s to a new record collection.
pub struct CollectionWriter {
    group: Group,
    njets: Dataset,
    photons: [Dataset; 4],
    jets: [Dataset; 4],
    num_events: usize,
    num_jets: usize,
}

impl CollectionWriter {
    /// Creates the group `name` in `parent`, with empty resizable datasets
    /// for every [EventField].
    pub fn create(parent: &Group, name: &str) -> Result<Self, LayoutError> {
        if parent.link_exists(name) {
            return Err(LayoutError::CollectionExists(name.to_owned()));
        }
        let group = parent.create_group(name)?;

        let njets = group
            .new_dataset::<JetCount>()
            .shape((0..,))
            .create(EventField::Njets.name())?;

        let create_photon_dataset = |component| {
            group
                .new_dataset::<f32>()
                .shape((0.., PHOTONS_PER_EVENT))
                .create(EventField::photon(component).name())
        };
        let photons = [
            create_photon_dataset(Component::Pt)?,
            create_photon_dataset(Component::Eta)?,
            create_photon_dataset(Component::Phi)?,
            create_photon_dataset(Component::M)?,
        ];

        let create_jet_dataset = |component| {
            group
                .new_dataset::<f32>()
                .shape((0..,))
                .create(EventField::jet(component).name())
        };
        let jets = [
            create_jet_dataset(Component::Pt)?,
            create_jet_dataset(Component::Eta)?,
            create_jet_dataset(Component::Phi)?,
            create_jet_dataset(Component::M)?,
        ];

        Ok(Self {
            group,
            njets,
            photons,
            jets,
            num_events: 0,
            num_jets: 0,
        })
    }

    pub fn num_events(&self) -> usize {
        self.num_events
    }

    pub fn num_jets(&self) -> usize {
        self.num_jets
    }

    /// Appends `records` after the events already written.
    pub fn append(&mut self, records: &[EventRecord]) -> Result<(), LayoutError> {
        if records.is_empty() {
            return Ok(());
        }
        let start = self.num_events;
        let end = start + records.len();

        let njets: Array1<JetCount> = records.iter().map(EventRecord::njets).collect();
        self.njets.resize((end,))?;
        self.njets.write_slice(&njets, s![start..end])?;

        for (component, dataset) in Component::ALL.into_iter().zip(&self.photons) {
            let values = records
                .iter()
                .flat_map(|record| record.photons.iter().map(|photon| component.of(photon)))
                .collect::<Vec<_>>();
            let values = Array2::from_shape_vec((records.len(), PHOTONS_PER_EVENT), values)?;
            dataset.resize((end, PHOTONS_PER_EVENT))?;
            dataset.write_slice(&values, s![start..end, ..])?;
        }

        let jet_count: usize = records.iter().map(|record| record.jets.len()).sum();
        let jet_start = self.num_jets;
        let jet_end = jet_start + jet_count;
        if jet_count > 0 {
            for (component, dataset) in Component::ALL.into_iter().zip(&self.jets) {
                let values: Array1<f32> = records
                    .iter()
                    .flat_map(|record| record.jets.iter().map(|jet| component.of(jet)))
                    .collect();
                dataset.resize((jet_end,))?;
                dataset.write_slice(&values, s![jet_start..jet_end])?;
            }
        }

        debug!(
            "Appended {} events ({} jets) to {}",
            records.len(),
            jet_count,
            self.group.name()
        );
        self.num_events = end;
        self.num_jets = jet_end;
        Ok(())
    }
}
