//! # Cut-Flow Selection Engine
//!
//! A library for evaluating collider events against an ordered,
//! short-circuiting sequence of named selection criteria ("cuts") and
//! recording, per event, exactly which cuts were satisfied.
//!
//! Given a configured flow, each event walks the cuts in fixed order. A cut
//! can be evaluated, ignored (treated as always satisfied but still
//! recorded), or not considered at all because its group is switched off.
//! Downstream efficiency bookkeeping relies on these outcomes staying
//! distinct. The first evaluated-and-unsatisfied cut rejects the event and
//! names the rejection point.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cutflow_engine::{CutflowEvaluator, Event, SelectionConfig};
//!
//! // Load and validate a selection configuration
//! let config = SelectionConfig::from_yaml_str(r#"
//! jet_quality: {}
//! vertex_quality: {}
//! muon_quality: {}
//! electron_quality: {}
//! event_selector:
//!     is_mc: true
//!     mc_trigger_path_el: HLT_Ele27_WP85_Gsf
//!     mc_trigger_path_mu: HLT_IsoMu24_eta2p1
//!     min_jet: 2
//! "#)?;
//!
//! // Create the evaluator once, evaluate many events
//! let mut evaluator = CutflowEvaluator::new(config)?;
//!
//! let event: Event = serde_json::from_str(&event_json)?;
//! let result = evaluator.evaluate(&event);
//!
//! if result.overall_pass() {
//!     println!("accepted");
//! } else if let Some(cut) = result.rejection_point() {
//!     println!("rejected at {cut}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Collaborators
//!
//! The object-quality selectors, the jet energy correction, and the b-tag
//! decision sit behind trait seams and can be replaced:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cutflow_engine::CutflowEvaluatorBuilder;
//!
//! let mut evaluator = CutflowEvaluatorBuilder::new(config)
//!     .with_jet_tagger(Arc::new(MyTagger))
//!     .build()?;
//! ```

pub mod config;
pub mod cutflow;
pub mod error;
pub mod event;
pub mod filter;
pub mod selector;

// Primary engine interface
pub use cutflow::{
    CutName, CutRegistry, CutStatus, CutValue, CutflowEvaluator, CutflowEvaluatorBuilder,
    CutflowResult,
};

// Configuration
pub use config::{
    ElectronQualityConfig, EventSelectorConfig, JetQualityConfig, MuonQualityConfig,
    SelectionConfig, VertexQualityConfig,
};

// Core types and errors
pub use error::{CutflowError, Result};
pub use event::{
    Electron, Event, FourMomentum, Jet, MissingEt, Muon, Tau, TriggerPath, TriggerRecord, Vertex,
};

// Object filter stage
pub use filter::{
    count_veto_taus, filter_electrons, filter_jets, filter_muons, KinematicThresholds,
    SelectedJets, SelectedObjects,
};

// Selector system
pub use selector::{
    DiscriminantTagger, ElectronQualityBits, ElectronSelector, JetCorrector, JetQualityBits,
    JetSelector, JetTagger, MuonQualityBits, MuonSelector, NominalCorrector, QualityCheck,
    SharedElectronSelector, SharedJetCorrector, SharedJetSelector, SharedJetTagger,
    SharedMuonSelector, SharedVertexSelector, StandardElectronSelector, StandardJetSelector,
    StandardMuonSelector, StandardVertexSelector, VertexQualityBits, VertexSelector,
};
