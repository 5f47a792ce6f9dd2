//! Standard implementations of the selection collaborators.
//!
//! Each is built from the corresponding configuration block and evaluates
//! the documented working points. An object missing a required quantity
//! fails that criterion; nothing here panics on malformed input.

use crate::config::{
    ElectronQualityConfig, EventSelectorConfig, JetQualityConfig, MuonQualityConfig,
    VertexQualityConfig,
};
use crate::event::{Electron, Event, FourMomentum, Jet, Muon, Vertex};
use crate::selector::bits::{
    ElectronQualityBits, JetQualityBits, MuonQualityBits, QualityCheck, VertexQualityBits,
};
use crate::selector::types::{
    ElectronSelector, JetCorrector, JetSelector, JetTagger, MuonSelector, VertexSelector,
};

/// Particle-flow jet identification at configured working points.
#[derive(Debug, Clone)]
pub struct StandardJetSelector {
    config: JetQualityConfig,
}

impl StandardJetSelector {
    pub fn new(config: JetQualityConfig) -> Self {
        Self { config }
    }
}

impl JetSelector for StandardJetSelector {
    fn quality(&self, jet: &Jet) -> QualityCheck<JetQualityBits> {
        let mut bits = JetQualityBits::empty();

        if jet
            .neutral_hadron_fraction
            .is_some_and(|v| v < self.config.max_neutral_hadron_fraction)
        {
            bits |= JetQualityBits::NEUTRAL_HADRON_FRACTION;
        }
        if jet
            .neutral_em_fraction
            .is_some_and(|v| v < self.config.max_neutral_em_fraction)
        {
            bits |= JetQualityBits::NEUTRAL_EM_FRACTION;
        }
        if jet
            .charged_hadron_fraction
            .is_some_and(|v| v > self.config.min_charged_hadron_fraction)
        {
            bits |= JetQualityBits::CHARGED_HADRON_FRACTION;
        }
        if jet
            .charged_em_fraction
            .is_some_and(|v| v < self.config.max_charged_em_fraction)
        {
            bits |= JetQualityBits::CHARGED_EM_FRACTION;
        }
        if jet
            .constituent_count
            .is_some_and(|n| n > self.config.min_constituent_count)
        {
            bits |= JetQualityBits::CONSTITUENT_COUNT;
        }
        if jet
            .charged_multiplicity
            .is_some_and(|n| n > self.config.min_charged_multiplicity)
        {
            bits |= JetQualityBits::CHARGED_MULTIPLICITY;
        }

        QualityCheck::new(bits == JetQualityBits::all(), bits)
    }
}

/// Global muon identification at configured working points.
#[derive(Debug, Clone)]
pub struct StandardMuonSelector {
    config: MuonQualityConfig,
}

impl StandardMuonSelector {
    pub fn new(config: MuonQualityConfig) -> Self {
        Self { config }
    }
}

impl MuonSelector for StandardMuonSelector {
    fn quality(&self, muon: &Muon) -> QualityCheck<MuonQualityBits> {
        let mut bits = MuonQualityBits::empty();

        if muon.is_global || !self.config.require_global {
            bits |= MuonQualityBits::GLOBAL;
        }
        if muon
            .normalized_chi2
            .is_some_and(|v| v < self.config.max_normalized_chi2)
        {
            bits |= MuonQualityBits::NORMALIZED_CHI2;
        }
        if muon
            .valid_muon_hits
            .is_some_and(|n| n > self.config.min_valid_muon_hits)
        {
            bits |= MuonQualityBits::VALID_MUON_HITS;
        }
        if muon
            .matched_stations
            .is_some_and(|n| n >= self.config.min_matched_stations)
        {
            bits |= MuonQualityBits::MATCHED_STATIONS;
        }
        if muon
            .dxy
            .is_some_and(|v| v.abs() < self.config.max_abs_dxy)
        {
            bits |= MuonQualityBits::IMPACT_PARAMETER;
        }
        if muon
            .relative_isolation
            .is_some_and(|v| v < self.config.max_relative_isolation)
        {
            bits |= MuonQualityBits::ISOLATION;
        }

        QualityCheck::new(bits == MuonQualityBits::all(), bits)
    }
}

/// Electron identification at configured working points.
#[derive(Debug, Clone)]
pub struct StandardElectronSelector {
    config: ElectronQualityConfig,
}

impl StandardElectronSelector {
    pub fn new(config: ElectronQualityConfig) -> Self {
        Self { config }
    }
}

impl ElectronSelector for StandardElectronSelector {
    fn quality(&self, electron: &Electron) -> QualityCheck<ElectronQualityBits> {
        let mut bits = ElectronQualityBits::empty();

        if electron
            .id_score
            .is_some_and(|v| v > self.config.min_id_score)
        {
            bits |= ElectronQualityBits::ID_SCORE;
        }
        if electron
            .missing_inner_hits
            .is_some_and(|n| n <= self.config.max_missing_inner_hits)
        {
            bits |= ElectronQualityBits::MISSING_INNER_HITS;
        }
        if electron
            .relative_isolation
            .is_some_and(|v| v < self.config.max_relative_isolation)
        {
            bits |= ElectronQualityBits::ISOLATION;
        }
        if electron.passes_conversion_veto || !self.config.require_conversion_veto {
            bits |= ElectronQualityBits::CONVERSION_VETO;
        }

        QualityCheck::new(bits == ElectronQualityBits::all(), bits)
    }
}

/// Primary-vertex goodness at configured working points.
#[derive(Debug, Clone)]
pub struct StandardVertexSelector {
    config: VertexQualityConfig,
}

impl StandardVertexSelector {
    pub fn new(config: VertexQualityConfig) -> Self {
        Self { config }
    }
}

impl VertexSelector for StandardVertexSelector {
    fn quality(&self, vertex: &Vertex) -> QualityCheck<VertexQualityBits> {
        let mut bits = VertexQualityBits::empty();

        if !vertex.is_fake {
            bits |= VertexQualityBits::NOT_FAKE;
        }
        if vertex.ndof >= self.config.min_ndof {
            bits |= VertexQualityBits::NDOF;
        }
        if vertex.z.abs() <= self.config.max_abs_z {
            bits |= VertexQualityBits::Z_POSITION;
        }
        if vertex.rho <= self.config.max_rho {
            bits |= VertexQualityBits::RHO;
        }

        QualityCheck::new(bits == VertexQualityBits::all(), bits)
    }
}

/// Applies each jet's stored correction factor times a configured global
/// scale. Calibration itself happens upstream; this collaborator only
/// replays stored factors.
#[derive(Debug, Clone)]
pub struct NominalCorrector {
    scale: f64,
}

impl NominalCorrector {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn from_config(config: &EventSelectorConfig) -> Self {
        Self::new(config.jet_energy_scale)
    }
}

impl JetCorrector for NominalCorrector {
    fn corrected_momentum(&self, jet: &Jet, _event: &Event) -> FourMomentum {
        jet.p4.scaled(jet.correction * self.scale)
    }
}

/// Tags a jet when its discriminant reaches the configured working point.
#[derive(Debug, Clone)]
pub struct DiscriminantTagger {
    working_point: f64,
}

impl DiscriminantTagger {
    pub fn new(working_point: f64) -> Self {
        Self { working_point }
    }

    pub fn from_config(config: &EventSelectorConfig) -> Self {
        Self::new(config.btag_working_point)
    }
}

impl JetTagger for DiscriminantTagger {
    fn is_tagged(&self, jet: &Jet, _event: &Event) -> bool {
        jet.btag_discriminant >= self.working_point
    }
}
