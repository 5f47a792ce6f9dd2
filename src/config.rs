//! Selection configuration.
//!
//! A [`SelectionConfig`] is immutable and event-independent: it is loaded
//! once, validated, and shared read-only by every evaluation. Five sub-blocks
//! are required: the four object-quality blocks and the event-selector
//! block. A missing block is a fatal startup error, never a per-event one;
//! an unconfigured selector producing silent wrong answers is worse than
//! stopping the job.
//!
//! Configurations deserialize from YAML:
//!
//! ```rust,ignore
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
//! ```
//!
//! Within a block every field has a documented default, so a block may be
//! given as `{}` to accept the standard working points.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CutflowError, Result};

/// Jet identification working points.
///
/// Predicate conventions: fraction maxima are strict (`value < max`),
/// fraction minima are strict (`value > min`), count minima are strict
/// (`count > min`). A jet missing any required quantity fails that criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetQualityConfig {
    pub max_neutral_hadron_fraction: f64,
    pub max_neutral_em_fraction: f64,
    pub min_charged_hadron_fraction: f64,
    pub max_charged_em_fraction: f64,
    pub min_constituent_count: u32,
    pub min_charged_multiplicity: u32,
}

impl Default for JetQualityConfig {
    fn default() -> Self {
        Self {
            max_neutral_hadron_fraction: 0.99,
            max_neutral_em_fraction: 0.99,
            min_charged_hadron_fraction: 0.0,
            max_charged_em_fraction: 0.99,
            min_constituent_count: 1,
            min_charged_multiplicity: 0,
        }
    }
}

/// Muon identification working points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuonQualityConfig {
    pub require_global: bool,
    pub max_normalized_chi2: f64,
    pub min_valid_muon_hits: u32,
    pub min_matched_stations: u32,
    pub max_abs_dxy: f64,
    pub max_relative_isolation: f64,
}

impl Default for MuonQualityConfig {
    fn default() -> Self {
        Self {
            require_global: true,
            max_normalized_chi2: 10.0,
            min_valid_muon_hits: 0,
            min_matched_stations: 1,
            max_abs_dxy: 0.2,
            max_relative_isolation: 0.12,
        }
    }
}

/// Electron identification working points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectronQualityConfig {
    pub min_id_score: f64,
    pub max_missing_inner_hits: u32,
    pub max_relative_isolation: f64,
    pub require_conversion_veto: bool,
}

impl Default for ElectronQualityConfig {
    fn default() -> Self {
        Self {
            min_id_score: 0.9,
            max_missing_inner_hits: 1,
            max_relative_isolation: 0.1,
            require_conversion_veto: true,
        }
    }
}

/// Primary-vertex goodness working points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexQualityConfig {
    pub min_ndof: f64,
    pub max_abs_z: f64,
    pub max_rho: f64,
}

impl Default for VertexQualityConfig {
    fn default() -> Self {
        Self {
            min_ndof: 4.0,
            max_abs_z: 24.0,
            max_rho: 2.0,
        }
    }
}

/// The event-selector parameter block: cut-group switches, kinematic
/// thresholds, multiplicity bounds, and trigger paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSelectorConfig {
    /// Monte-Carlo vs. data mode. Selects which trigger-path set applies.
    pub is_mc: bool,
    /// Dump every trigger path and its decision on the first event.
    pub dump_trigger: bool,

    pub trigger_cut: bool,
    /// Data-mode electron-channel paths, scanned in order; first match wins.
    pub trigger_path_el: Vec<String>,
    /// Data-mode muon-channel paths, scanned in order; first match wins.
    pub trigger_path_mu: Vec<String>,
    pub mc_trigger_path_el: String,
    pub mc_trigger_path_mu: String,

    pub pv_cut: bool,
    pub noise_filter_cut: bool,

    pub jet_cuts: bool,
    pub jet_min_pt: f64,
    pub jet_max_abs_eta: f64,
    pub min_jet: usize,
    pub max_jet: usize,
    pub leading_jet_pt: f64,

    pub muon_cuts: bool,
    pub muon_min_pt: f64,
    pub muon_max_abs_eta: f64,
    pub min_muon: usize,

    pub electron_cuts: bool,
    pub electron_min_pt: f64,
    pub electron_max_abs_eta: f64,
    pub min_electron: usize,

    pub min_lepton: usize,
    pub max_lepton: usize,
    pub second_lepton_veto: bool,
    pub tau_veto: bool,

    pub met_cuts: bool,
    pub min_met: f64,

    pub btag_cuts: bool,
    pub btag_1: bool,
    pub btag_2: bool,
    pub btag_3: bool,

    /// Global scale applied on top of each jet's stored correction factor.
    pub jet_energy_scale: f64,
    /// Discriminant working point of the standard tagger.
    pub btag_working_point: f64,

    /// Cut labels to force-ignore: the cut is still recorded but treated as
    /// always satisfied.
    pub ignored_cuts: Vec<String>,
}

impl Default for EventSelectorConfig {
    fn default() -> Self {
        Self {
            is_mc: false,
            dump_trigger: false,

            trigger_cut: true,
            trigger_path_el: Vec::new(),
            trigger_path_mu: Vec::new(),
            mc_trigger_path_el: String::new(),
            mc_trigger_path_mu: String::new(),

            pv_cut: true,
            noise_filter_cut: true,

            jet_cuts: true,
            jet_min_pt: 30.0,
            jet_max_abs_eta: 2.4,
            min_jet: 1,
            max_jet: 100,
            leading_jet_pt: 50.0,

            muon_cuts: true,
            muon_min_pt: 26.0,
            muon_max_abs_eta: 2.1,
            min_muon: 0,

            electron_cuts: true,
            electron_min_pt: 30.0,
            electron_max_abs_eta: 2.5,
            min_electron: 0,

            min_lepton: 1,
            max_lepton: 1,
            second_lepton_veto: true,
            tau_veto: true,

            met_cuts: true,
            min_met: 20.0,

            btag_cuts: false,
            btag_1: true,
            btag_2: false,
            btag_3: false,

            jet_energy_scale: 1.0,
            btag_working_point: 0.8,

            ignored_cuts: Vec::new(),
        }
    }
}

/// The complete, validated selection configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub jet_quality: JetQualityConfig,
    pub vertex_quality: VertexQualityConfig,
    pub muon_quality: MuonQualityConfig,
    pub electron_quality: ElectronQualityConfig,
    pub event_selector: EventSelectorConfig,
}

/// Deserialization shape where every block is optional, so that an absent
/// block can be diagnosed by name instead of surfacing as a generic parse
/// error.
#[derive(Debug, Deserialize)]
struct RawSelectionConfig {
    jet_quality: Option<JetQualityConfig>,
    vertex_quality: Option<VertexQualityConfig>,
    muon_quality: Option<MuonQualityConfig>,
    electron_quality: Option<ElectronQualityConfig>,
    event_selector: Option<EventSelectorConfig>,
}

impl RawSelectionConfig {
    fn validate(self) -> Result<SelectionConfig> {
        Ok(SelectionConfig {
            jet_quality: self
                .jet_quality
                .ok_or(CutflowError::MissingConfigBlock("jet_quality"))?,
            vertex_quality: self
                .vertex_quality
                .ok_or(CutflowError::MissingConfigBlock("vertex_quality"))?,
            muon_quality: self
                .muon_quality
                .ok_or(CutflowError::MissingConfigBlock("muon_quality"))?,
            electron_quality: self
                .electron_quality
                .ok_or(CutflowError::MissingConfigBlock("electron_quality"))?,
            event_selector: self
                .event_selector
                .ok_or(CutflowError::MissingConfigBlock("event_selector"))?,
        })
    }
}

impl SelectionConfig {
    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let raw: RawSelectionConfig =
            serde_yaml::from_str(text).map_err(|e| CutflowError::Config(e.to_string()))?;
        raw.validate()
    }

    /// Parse and validate a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
