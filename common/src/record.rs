use crate::{JetCount, PHOTONS_PER_EVENT};

/// Kinematics of one reconstructed object, as stored in the columnar input.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsObject {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub m: f32,
}

impl PhysicsObject {
    pub fn new(pt: f32, eta: f32, phi: f32, m: f32) -> Self {
        Self { pt, eta, phi, m }
    }
}

/// One entry of a record collection.
///
/// Photons and jets are kept in storage order, the jets are expected to be
/// ordered by descending transverse momentum.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub photons: [PhysicsObject; PHOTONS_PER_EVENT],
    pub jets: Vec<PhysicsObject>,
}

impl EventRecord {
    pub fn new(photons: [PhysicsObject; PHOTONS_PER_EVENT], jets: Vec<PhysicsObject>) -> Self {
        Self { photons, jets }
    }

    pub fn njets(&self) -> JetCount {
        // A record never holds anywhere near u32::MAX jets.
        JetCount::try_from(self.jets.len()).unwrap_or(JetCount::MAX)
    }

    pub fn leading_jet(&self) -> Option<&PhysicsObject> {
        self.jets.first()
    }
}
