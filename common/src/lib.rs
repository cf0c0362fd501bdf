pub mod kinematics;
pub mod layout;
pub mod record;
pub mod tracer;

pub use layout::{CollectionWriter, Component, EventField, LayoutError};
pub use record::{EventRecord, PhysicsObject};

pub type JetCount = u32;
pub type Momentum = f64;

/// Name of the record collection holding the diphoton candidate events.
pub const HGAM_DATA_COLLECTION: &str = "HGamData";

pub const PHOTONS_PER_EVENT: usize = 2;
