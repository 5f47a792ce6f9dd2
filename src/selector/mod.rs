//! Object-quality selection collaborators.
//!
//! The cut flow consumes object-level decisions through a small set of trait
//! seams: identification selectors per object kind (each returning pass/fail
//! plus per-criterion reason bits), a jet energy correction, and a b-tag
//! decision. Standard implementations driven by the selection configuration
//! live in [`defaults`]; the evaluator accepts any implementation behind an
//! `Arc`.

pub mod bits;
pub mod defaults;
pub mod types;

pub use bits::{
    ElectronQualityBits, JetQualityBits, MuonQualityBits, QualityCheck, VertexQualityBits,
};
pub use defaults::{
    DiscriminantTagger, NominalCorrector, StandardElectronSelector, StandardJetSelector,
    StandardMuonSelector, StandardVertexSelector,
};
pub use types::{
    ElectronSelector, JetCorrector, JetSelector, JetTagger, MuonSelector, SharedElectronSelector,
    SharedJetCorrector, SharedJetSelector, SharedJetTagger, SharedMuonSelector,
    SharedVertexSelector, VertexSelector,
};
