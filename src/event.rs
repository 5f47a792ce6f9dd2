//! Event data model.
//!
//! An [`Event`] is one detector-observation unit: collections of physics
//! objects (jets, muons, electrons, taus, vertices), a missing-energy
//! estimate, and the trigger decisions recorded for the event. The evaluator
//! borrows an event read-only for the duration of a single evaluation and
//! keeps only indices into its collections.
//!
//! Every collection is optional: `None` models a collection that could not be
//! retrieved upstream. Individual quality quantities that may be absent from
//! a malformed object are `Option` as well; an absent required quantity fails
//! the quality predicate that needs it instead of aborting the event.

use serde::{Deserialize, Serialize};

/// Four-momentum in collider coordinates (transverse momentum, pseudorapidity,
/// azimuth, energy).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub energy: f64,
}

impl FourMomentum {
    pub fn new(pt: f64, eta: f64, phi: f64, energy: f64) -> Self {
        Self {
            pt,
            eta,
            phi,
            energy,
        }
    }

    /// Momentum rescaled by an energy-correction factor. Direction is
    /// preserved; pt and energy scale together.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            pt: self.pt * factor,
            eta: self.eta,
            phi: self.phi,
            energy: self.energy * factor,
        }
    }

    pub fn abs_eta(&self) -> f64 {
        self.eta.abs()
    }
}

/// A particle-flow jet with its identification quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jet {
    pub p4: FourMomentum,
    /// Stored energy-correction factor (1.0 = uncorrected).
    pub correction: f64,
    /// Output of the b-tagging algorithm for this jet.
    pub btag_discriminant: f64,
    pub neutral_hadron_fraction: Option<f64>,
    pub neutral_em_fraction: Option<f64>,
    pub charged_hadron_fraction: Option<f64>,
    pub charged_em_fraction: Option<f64>,
    pub constituent_count: Option<u32>,
    pub charged_multiplicity: Option<u32>,
}

impl Default for Jet {
    fn default() -> Self {
        Self {
            p4: FourMomentum::default(),
            correction: 1.0,
            btag_discriminant: 0.0,
            neutral_hadron_fraction: None,
            neutral_em_fraction: None,
            charged_hadron_fraction: None,
            charged_em_fraction: None,
            constituent_count: None,
            charged_multiplicity: None,
        }
    }
}

impl Jet {
    pub fn new(p4: FourMomentum) -> Self {
        Self {
            p4,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Muon {
    pub p4: FourMomentum,
    pub is_global: bool,
    pub normalized_chi2: Option<f64>,
    pub valid_muon_hits: Option<u32>,
    pub matched_stations: Option<u32>,
    /// Transverse impact parameter with respect to the beam line.
    pub dxy: Option<f64>,
    pub relative_isolation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Electron {
    pub p4: FourMomentum,
    pub id_score: Option<f64>,
    pub missing_inner_hits: Option<u32>,
    pub relative_isolation: Option<f64>,
    pub passes_conversion_veto: bool,
}

/// A hadronic tau candidate with the discriminants consumed by the tau veto.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tau {
    pub p4: FourMomentum,
    pub medium_combined_isolation: bool,
    pub against_electron_tight: bool,
    pub against_muon_tight: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub ndof: f64,
    pub z: f64,
    /// Transverse distance from the beam line.
    pub rho: f64,
    pub is_fake: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingEt {
    pub et: f64,
    pub phi: f64,
}

/// One trigger path and whether it fired for this event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPath {
    pub name: String,
    pub fired: bool,
}

/// Ordered record of the trigger decisions for one event.
///
/// Lookup is by exact path name; a path absent from the record reads as not
/// fired.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerRecord {
    paths: Vec<TriggerPath>,
}

impl TriggerRecord {
    pub fn new(paths: Vec<TriggerPath>) -> Self {
        Self { paths }
    }

    /// Build a record from `(name, fired)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            paths: pairs
                .into_iter()
                .map(|(name, fired)| TriggerPath {
                    name: name.into(),
                    fired,
                })
                .collect(),
        }
    }

    pub fn fired(&self, name: &str) -> bool {
        self.paths.iter().any(|p| p.name == name && p.fired)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// One detector-observation unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub jets: Option<Vec<Jet>>,
    pub muons: Option<Vec<Muon>>,
    pub electrons: Option<Vec<Electron>>,
    pub taus: Option<Vec<Tau>>,
    pub met: Option<MissingEt>,
    pub vertices: Option<Vec<Vertex>>,
    pub triggers: Option<TriggerRecord>,
}

impl Event {
    /// Whether the named trigger path fired. A missing trigger record or an
    /// unknown path reads as not fired.
    pub fn trigger_fired(&self, name: &str) -> bool {
        self.triggers.as_ref().is_some_and(|t| t.fired(name))
    }
}
