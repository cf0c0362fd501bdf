//! Random diphoton records: a Gaussian signal peak on a falling continuum,
//! plus a Poisson number of jets.
use clap::Args;
use hgam_common::{EventRecord, PHOTONS_PER_EVENT, PhysicsObject};
use rand::{
    Rng, SeedableRng,
    distr::{Bernoulli, BernoulliError},
    rngs::StdRng,
};
use rand_distr::{Distribution, Exp, ExpError, Normal, NormalError, Poisson, PoissonError};
use std::f64::consts::{PI, TAU};
use thiserror::Error;

const PHOTON_MAX_ETA: f64 = 2.37;
const CONTINUUM_START: f64 = 100.0;
/// Largest deviation of the photon pair from back-to-back, in azimuth.
const ACOPLANARITY: f64 = 0.5;
/// Smallest ratio of subleading to leading photon transverse momentum.
const MIN_PT_RATIO: f64 = 0.3;

const JET_MAX_ETA: f64 = 4.4;
const JET_MIN_PT: f64 = 25.0;
const JET_PT_SCALE: f64 = 40.0;
const JET_MIN_MASS: f64 = 2.0;
const JET_MAX_MASS: f64 = 15.0;

#[derive(Debug, Error)]
pub(crate) enum GeneratorError {
    #[error("Invalid signal fraction: {0}")]
    SignalFraction(#[from] BernoulliError),
    #[error("Invalid signal peak: {0}")]
    SignalPeak(#[from] NormalError),
    #[error("Invalid continuum slope: {0}")]
    Continuum(ExpError),
    #[error("Invalid jet transverse momentum scale: {0}")]
    JetPt(ExpError),
    #[error("Invalid mean jet multiplicity: {0}")]
    JetMultiplicity(#[from] PoissonError),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct GeneratorConfig {
    /// Fraction of events drawn from the signal peak
    #[clap(long, default_value = "0.1")]
    pub(crate) signal_fraction: f64,

    /// Mean of the signal peak, in GeV
    #[clap(long, default_value = "125.0")]
    pub(crate) signal_mass: f64,

    /// Standard deviation of the signal peak, in GeV
    #[clap(long, default_value = "1.7")]
    pub(crate) signal_width: f64,

    /// Decay rate of the continuum above 100 GeV, in 1/GeV
    #[clap(long, default_value = "0.03")]
    pub(crate) continuum_slope: f64,

    /// Mean number of jets per event
    #[clap(long, default_value = "2.0")]
    pub(crate) mean_jets: f64,

    /// Largest number of jets in an event
    #[clap(long, default_value = "12")]
    pub(crate) max_jets: usize,
}

pub(crate) struct EventGenerator {
    rng: StdRng,
    signal: Bernoulli,
    peak: Normal<f64>,
    continuum: Exp<f64>,
    multiplicity: Option<Poisson<f64>>,
    jet_pt: Exp<f64>,
    max_jets: usize,
}

impl EventGenerator {
    /// A given `seed` always yields the same sequence of records.
    pub(crate) fn new(config: &GeneratorConfig, seed: u64) -> Result<Self, GeneratorError> {
        let multiplicity = if config.mean_jets == 0.0 {
            None
        } else {
            Some(Poisson::new(config.mean_jets)?)
        };
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            signal: Bernoulli::new(config.signal_fraction)?,
            peak: Normal::new(config.signal_mass, config.signal_width)?,
            continuum: Exp::new(config.continuum_slope).map_err(GeneratorError::Continuum)?,
            multiplicity,
            jet_pt: Exp::new(1.0 / JET_PT_SCALE).map_err(GeneratorError::JetPt)?,
            max_jets: config.max_jets,
        })
    }

    pub(crate) fn next_record(&mut self) -> EventRecord {
        let mass = self.diphoton_mass();
        let photons = self.photons(mass);
        let jets = self.jets();
        EventRecord::new(photons, jets)
    }

    fn diphoton_mass(&mut self) -> f64 {
        if self.signal.sample(&mut self.rng) {
            self.peak.sample(&mut self.rng)
        } else {
            CONTINUUM_START + self.continuum.sample(&mut self.rng)
        }
    }

    /// Two massless photons with invariant mass `mass`, leading photon first.
    fn photons(&mut self, mass: f64) -> [PhysicsObject; PHOTONS_PER_EVENT] {
        let leading_eta = self.rng.random_range(-PHOTON_MAX_ETA..PHOTON_MAX_ETA);
        let subleading_eta = self.rng.random_range(-PHOTON_MAX_ETA..PHOTON_MAX_ETA);
        let leading_phi = self.rng.random_range(-PI..PI);
        let subleading_phi =
            wrap_phi(leading_phi + PI + self.rng.random_range(-ACOPLANARITY..ACOPLANARITY));
        let ratio = self.rng.random_range(MIN_PT_RATIO..=1.0);

        // m^2 = 2 pt1 pt2 (cosh(deta) - cos(dphi))
        let opening = (leading_eta - subleading_eta).cosh() - (leading_phi - subleading_phi).cos();
        let leading_pt = mass.max(0.0) / (2.0 * ratio * opening).sqrt();
        [
            PhysicsObject::new(leading_pt as f32, leading_eta as f32, leading_phi as f32, 0.0),
            PhysicsObject::new(
                (ratio * leading_pt) as f32,
                subleading_eta as f32,
                subleading_phi as f32,
                0.0,
            ),
        ]
    }

    /// Jets ordered by descending transverse momentum.
    fn jets(&mut self) -> Vec<PhysicsObject> {
        let count = match &self.multiplicity {
            Some(poisson) => poisson.sample(&mut self.rng) as usize,
            None => 0,
        }
        .min(self.max_jets);

        let mut pts = (0..count)
            .map(|_| JET_MIN_PT + self.jet_pt.sample(&mut self.rng))
            .collect::<Vec<_>>();
        pts.sort_by(|a, b| b.total_cmp(a));

        pts.into_iter()
            .map(|pt| {
                PhysicsObject::new(
                    pt as f32,
                    self.rng.random_range(-JET_MAX_ETA..JET_MAX_ETA) as f32,
                    self.rng.random_range(-PI..PI) as f32,
                    self.rng.random_range(JET_MIN_MASS..JET_MAX_MASS) as f32,
                )
            })
            .collect()
    }
}

fn wrap_phi(phi: f64) -> f64 {
    (phi + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use hgam_common::kinematics::{LorentzVector, PtEtaPhiM};

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            signal_fraction: 0.1,
            signal_mass: 125.0,
            signal_width: 1.7,
            continuum_slope: 0.03,
            mean_jets: 2.0,
            max_jets: 12,
        }
    }

    fn pair_mass(photons: &[PhysicsObject; PHOTONS_PER_EVENT]) -> f64 {
        let [leading, subleading] = photons.each_ref().map(PtEtaPhiM::from);
        (leading + subleading).mass()
    }

    #[test]
    fn same_seed_same_records() {
        let mut first = EventGenerator::new(&config(), 7).unwrap();
        let mut second = EventGenerator::new(&config(), 7).unwrap();
        for _ in 0..50 {
            assert_eq!(first.next_record(), second.next_record());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut first = EventGenerator::new(&config(), 7).unwrap();
        let mut second = EventGenerator::new(&config(), 8).unwrap();
        let first: Vec<_> = (0..10).map(|_| first.next_record()).collect();
        let second: Vec<_> = (0..10).map(|_| second.next_record()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn photons_reproduce_mass() {
        let mut generator = EventGenerator::new(&config(), 1).unwrap();
        for mass in [100.0, 125.0, 151.5] {
            for _ in 0..20 {
                let photons = generator.photons(mass);
                assert_approx_eq!(pair_mass(&photons), mass, 1e-2);

                let [leading, subleading] = photons;
                assert!(leading.pt >= subleading.pt);
                for photon in photons {
                    assert!(photon.eta.abs() < PHOTON_MAX_ETA as f32);
                    assert!(photon.phi.abs() <= PI as f32);
                    assert_eq!(photon.m, 0.0);
                }
            }
        }
    }

    #[test]
    fn pure_signal_peak() {
        let config = GeneratorConfig {
            signal_fraction: 1.0,
            signal_width: 0.0,
            ..config()
        };
        let mut generator = EventGenerator::new(&config, 3).unwrap();
        for _ in 0..20 {
            let record = generator.next_record();
            assert_approx_eq!(pair_mass(&record.photons), 125.0, 1e-2);
        }
    }

    #[test]
    fn continuum_starts_at_threshold() {
        let config = GeneratorConfig {
            signal_fraction: 0.0,
            ..config()
        };
        let mut generator = EventGenerator::new(&config, 4).unwrap();
        for _ in 0..100 {
            assert!(generator.diphoton_mass() >= CONTINUUM_START);
        }
    }

    #[test]
    fn jets_are_ordered_and_bounded() {
        let config = GeneratorConfig {
            mean_jets: 6.0,
            max_jets: 5,
            ..config()
        };
        let mut generator = EventGenerator::new(&config, 5).unwrap();
        let mut total = 0;
        for _ in 0..200 {
            let record = generator.next_record();
            assert!(record.jets.len() <= 5);
            total += record.jets.len();
            assert!(record.jets.windows(2).all(|pair| match pair {
                [first, second] => first.pt >= second.pt,
                _ => false,
            }));
            for jet in &record.jets {
                assert!(jet.pt >= JET_MIN_PT as f32);
                assert!(jet.eta.abs() < JET_MAX_ETA as f32);
                assert!((JET_MIN_MASS as f32..=JET_MAX_MASS as f32).contains(&jet.m));
            }
        }
        assert!(total > 0);
    }

    #[test]
    fn no_jets_without_multiplicity() {
        let config = GeneratorConfig {
            mean_jets: 0.0,
            ..config()
        };
        let mut generator = EventGenerator::new(&config, 6).unwrap();
        assert!((0..50).all(|_| generator.next_record().jets.is_empty()));
    }

    #[test]
    fn invalid_configuration() {
        let invalid = |config: GeneratorConfig| EventGenerator::new(&config, 0).err();
        assert!(matches!(
            invalid(GeneratorConfig {
                signal_fraction: 1.5,
                ..config()
            }),
            Some(GeneratorError::SignalFraction(_))
        ));
        assert!(matches!(
            invalid(GeneratorConfig {
                signal_width: -1.0,
                ..config()
            }),
            Some(GeneratorError::SignalPeak(_))
        ));
        assert!(matches!(
            invalid(GeneratorConfig {
                continuum_slope: -0.1,
                ..config()
            }),
            Some(GeneratorError::Continuum(_))
        ));
        assert!(matches!(
            invalid(GeneratorConfig {
                mean_jets: -1.0,
                ..config()
            }),
            Some(GeneratorError::JetMultiplicity(_))
        ));
    }

    #[test]
    fn phi_wrapping() {
        assert_approx_eq!(wrap_phi(PI + 0.25), -PI + 0.25);
        assert_approx_eq!(wrap_phi(-PI - 0.25), PI - 0.25);
        assert_approx_eq!(wrap_phi(1.0), 1.0);
    }
}
