//! Minimal Lorentz-vector arithmetic needed to reconstruct composite systems.
//!
//! Two coordinate systems are provided. [PtEtaPhiM] keeps the detector-style
//! coordinates an object was built from, and returns its transverse momentum
//! and mass exactly as stored. [PxPyPzE] is the cartesian form in which sums
//! are taken.
use crate::{Momentum, PhysicsObject};
use std::ops::Add;

/// Common accessors of a four-momentum, regardless of its coordinate system.
pub trait LorentzVector {
    fn px(&self) -> Momentum;
    fn py(&self) -> Momentum;
    fn pz(&self) -> Momentum;
    fn e(&self) -> Momentum;

    /// Squared invariant mass, negative for space-like vectors.
    fn m2(&self) -> Momentum {
        self.e() * self.e() - (self.px() * self.px() + self.py() * self.py() + self.pz() * self.pz())
    }

    /// Invariant mass. Space-like vectors yield `-sqrt(-m2)`.
    fn mass(&self) -> Momentum {
        let m2 = self.m2();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }

    /// Transverse momentum with respect to the beam (z) axis.
    fn pt(&self) -> Momentum {
        self.px().hypot(self.py())
    }

    fn to_cartesian(&self) -> PxPyPzE {
        PxPyPzE::new(self.px(), self.py(), self.pz(), self.e())
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PtEtaPhiM {
    pt: Momentum,
    eta: f64,
    phi: f64,
    m: Momentum,
}

impl PtEtaPhiM {
    pub fn new(pt: Momentum, eta: f64, phi: f64, m: Momentum) -> Self {
        Self { pt, eta, phi, m }
    }

    fn p2(&self) -> Momentum {
        let p = self.pt * self.eta.cosh();
        p * p
    }
}

impl From<&PhysicsObject> for PtEtaPhiM {
    fn from(object: &PhysicsObject) -> Self {
        Self::new(
            object.pt.into(),
            object.eta.into(),
            object.phi.into(),
            object.m.into(),
        )
    }
}

impl LorentzVector for PtEtaPhiM {
    fn px(&self) -> Momentum {
        self.pt * self.phi.cos()
    }

    fn py(&self) -> Momentum {
        self.pt * self.phi.sin()
    }

    fn pz(&self) -> Momentum {
        self.pt * self.eta.sinh()
    }

    fn e(&self) -> Momentum {
        if self.m >= 0.0 {
            (self.p2() + self.m * self.m).sqrt()
        } else {
            (self.p2() - self.m * self.m).max(0.0).sqrt()
        }
    }

    fn mass(&self) -> Momentum {
        self.m
    }

    fn pt(&self) -> Momentum {
        self.pt
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PxPyPzE {
    px: Momentum,
    py: Momentum,
    pz: Momentum,
    e: Momentum,
}

impl PxPyPzE {
    pub fn new(px: Momentum, py: Momentum, pz: Momentum, e: Momentum) -> Self {
        Self { px, py, pz, e }
    }
}

impl LorentzVector for PxPyPzE {
    fn px(&self) -> Momentum {
        self.px
    }

    fn py(&self) -> Momentum {
        self.py
    }

    fn pz(&self) -> Momentum {
        self.pz
    }

    fn e(&self) -> Momentum {
        self.e
    }
}

impl Add for PxPyPzE {
    type Output = PxPyPzE;

    fn add(self, rhs: Self) -> Self::Output {
        PxPyPzE::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

impl Add for PtEtaPhiM {
    type Output = PxPyPzE;

    fn add(self, rhs: Self) -> Self::Output {
        self.to_cartesian() + rhs.to_cartesian()
    }
}

impl Add<PtEtaPhiM> for PxPyPzE {
    type Output = PxPyPzE;

    fn add(self, rhs: PtEtaPhiM) -> Self::Output {
        self + rhs.to_cartesian()
    }
}
