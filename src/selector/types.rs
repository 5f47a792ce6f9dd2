//! Collaborator traits at the object-selection seams.
//!
//! The evaluator holds these behind `Arc<dyn …>` so that the identification
//! functors, the jet energy correction, and the b-tag decision can be swapped
//! without touching the cut flow itself. The standard implementations in
//! [`super::defaults`] are built from the selection configuration; tests and
//! embedding frameworks can inject their own.

use std::sync::Arc;

use crate::event::{Electron, Event, FourMomentum, Jet, Muon, Vertex};
use crate::selector::bits::{
    ElectronQualityBits, JetQualityBits, MuonQualityBits, QualityCheck, VertexQualityBits,
};

/// Jet identification predicate.
pub trait JetSelector: Send + Sync {
    fn quality(&self, jet: &Jet) -> QualityCheck<JetQualityBits>;
}

/// Muon identification predicate.
pub trait MuonSelector: Send + Sync {
    fn quality(&self, muon: &Muon) -> QualityCheck<MuonQualityBits>;
}

/// Electron identification predicate.
pub trait ElectronSelector: Send + Sync {
    fn quality(&self, electron: &Electron) -> QualityCheck<ElectronQualityBits>;
}

/// Primary-vertex goodness predicate.
pub trait VertexSelector: Send + Sync {
    fn quality(&self, vertex: &Vertex) -> QualityCheck<VertexQualityBits>;
}

/// Jet energy correction collaborator.
pub trait JetCorrector: Send + Sync {
    fn corrected_momentum(&self, jet: &Jet, event: &Event) -> FourMomentum;
}

/// B-tag decision collaborator.
pub trait JetTagger: Send + Sync {
    fn is_tagged(&self, jet: &Jet, event: &Event) -> bool;
}

pub type SharedJetSelector = Arc<dyn JetSelector>;
pub type SharedMuonSelector = Arc<dyn MuonSelector>;
pub type SharedElectronSelector = Arc<dyn ElectronSelector>;
pub type SharedVertexSelector = Arc<dyn VertexSelector>;
pub type SharedJetCorrector = Arc<dyn JetCorrector>;
pub type SharedJetTagger = Arc<dyn JetTagger>;
