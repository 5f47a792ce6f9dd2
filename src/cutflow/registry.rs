//! Ordered cut registry.
//!
//! Cut order is fixed: it defines both the display order and the logical
//! short-circuit order of the evaluator. Registration must follow that order
//! exactly; getting it wrong is a configuration error detected at startup,
//! never silently reordered.

use std::fmt;

use crate::config::EventSelectorConfig;
use crate::error::{CutflowError, Result};

/// The named cuts of the single-lepton flow, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CutName {
    NoSelection,
    Trigger,
    PrimaryVertex,
    NoiseFilter,
    OneJetOrMore,
    TwoJetsOrMore,
    ThreeJetsOrMore,
    MinJetMultiplicity,
    MaxJetMultiplicity,
    LeadingJetPt,
    MinMet,
    MinMuon,
    MinElectron,
    MinLepton,
    MaxLepton,
    SecondLeptonVeto,
    TauVeto,
    OneBtagOrMore,
    TwoBtagsOrMore,
    ThreeBtagsOrMore,
    AllCuts,
}

impl CutName {
    pub const COUNT: usize = 21;

    /// Every cut in evaluation order.
    pub const ALL: [CutName; CutName::COUNT] = [
        CutName::NoSelection,
        CutName::Trigger,
        CutName::PrimaryVertex,
        CutName::NoiseFilter,
        CutName::OneJetOrMore,
        CutName::TwoJetsOrMore,
        CutName::ThreeJetsOrMore,
        CutName::MinJetMultiplicity,
        CutName::MaxJetMultiplicity,
        CutName::LeadingJetPt,
        CutName::MinMet,
        CutName::MinMuon,
        CutName::MinElectron,
        CutName::MinLepton,
        CutName::MaxLepton,
        CutName::SecondLeptonVeto,
        CutName::TauVeto,
        CutName::OneBtagOrMore,
        CutName::TwoBtagsOrMore,
        CutName::ThreeBtagsOrMore,
        CutName::AllCuts,
    ];

    /// Position in evaluation order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The display label, as it appears in cut-flow tables and the
    /// `ignored_cuts` configuration list.
    pub fn label(self) -> &'static str {
        match self {
            CutName::NoSelection => "No selection",
            CutName::Trigger => "Trigger",
            CutName::PrimaryVertex => "Primary vertex",
            CutName::NoiseFilter => "Noise and scraping filter",
            CutName::OneJetOrMore => "One jet or more",
            CutName::TwoJetsOrMore => "Two jets or more",
            CutName::ThreeJetsOrMore => "Three jets or more",
            CutName::MinJetMultiplicity => "Min jet multiplicity",
            CutName::MaxJetMultiplicity => "Max jet multiplicity",
            CutName::LeadingJetPt => "Leading jet pt",
            CutName::MinMet => "Min MET",
            CutName::MinMuon => "Min muon",
            CutName::MinElectron => "Min electron",
            CutName::MinLepton => "Min lepton",
            CutName::MaxLepton => "Max lepton",
            CutName::SecondLeptonVeto => "Second lepton veto",
            CutName::TauVeto => "Tau veto",
            CutName::OneBtagOrMore => "1 btag or more",
            CutName::TwoBtagsOrMore => "2 btag or more",
            CutName::ThreeBtagsOrMore => "3 btag or more",
            CutName::AllCuts => "All cuts",
        }
    }

    /// Resolve a display label back to its cut.
    pub fn from_label(label: &str) -> Option<CutName> {
        CutName::ALL.iter().find(|c| c.label() == label).copied()
    }
}

impl fmt::Display for CutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed cut threshold: an object-multiplicity bound or a kinematic value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutValue {
    Count(usize),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
struct CutSetting {
    considered: bool,
    ignored: bool,
    threshold: Option<CutValue>,
}

impl Default for CutSetting {
    fn default() -> Self {
        Self {
            considered: true,
            ignored: false,
            threshold: None,
        }
    }
}

/// The ordered list of registered cuts with their configured state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutRegistry {
    cuts: Vec<(CutName, CutSetting)>,
}

impl CutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next cut. Registration must follow [`CutName::ALL`]
    /// order exactly.
    pub fn register(&mut self, name: CutName) -> Result<()> {
        match CutName::ALL.get(self.cuts.len()) {
            Some(&expected) if expected == name => {
                self.cuts.push((name, CutSetting::default()));
                Ok(())
            }
            expected => Err(CutflowError::CutOrder {
                expected: expected
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|| "no further cuts".to_string()),
                found: name.label().to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CutName> + '_ {
        self.cuts.iter().map(|(name, _)| *name)
    }

    fn setting(&self, name: CutName) -> Option<&CutSetting> {
        self.cuts
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, setting)| setting)
    }

    fn setting_mut(&mut self, name: CutName) -> Option<&mut CutSetting> {
        self.cuts
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, setting)| setting)
    }

    /// Whether the cut applies at all. A non-considered cut is recorded as
    /// "does not apply", which is distinct from failing.
    pub fn is_considered(&self, name: CutName) -> bool {
        self.setting(name).is_some_and(|s| s.considered)
    }

    /// Whether the cut is treated as always satisfied while still being
    /// recorded.
    pub fn is_ignored(&self, name: CutName) -> bool {
        self.setting(name).is_some_and(|s| s.ignored)
    }

    pub fn set_considered(&mut self, name: CutName, considered: bool) {
        if let Some(setting) = self.setting_mut(name) {
            setting.considered = considered;
        }
    }

    pub fn set_ignored(&mut self, name: CutName, ignored: bool) {
        if let Some(setting) = self.setting_mut(name) {
            setting.ignored = ignored;
        }
    }

    pub fn set_count_threshold(&mut self, name: CutName, count: usize) {
        if let Some(setting) = self.setting_mut(name) {
            setting.threshold = Some(CutValue::Count(count));
        }
    }

    pub fn set_value_threshold(&mut self, name: CutName, value: f64) {
        if let Some(setting) = self.setting_mut(name) {
            setting.threshold = Some(CutValue::Value(value));
        }
    }

    /// The configured multiplicity bound of a count-threshold cut.
    /// Requesting one for a cut that carries no count threshold is a
    /// programming error surfaced at startup.
    pub fn count_threshold(&self, name: CutName) -> Result<usize> {
        match self.setting(name).and_then(|s| s.threshold) {
            Some(CutValue::Count(count)) => Ok(count),
            Some(CutValue::Value(_)) => Err(CutflowError::ThresholdType {
                cut: name.label(),
                requested: "count",
            }),
            None => Err(CutflowError::NotAThreshold(name.label())),
        }
    }

    /// The configured kinematic value of a value-threshold cut.
    pub fn value_threshold(&self, name: CutName) -> Result<f64> {
        match self.setting(name).and_then(|s| s.threshold) {
            Some(CutValue::Value(value)) => Ok(value),
            Some(CutValue::Count(_)) => Err(CutflowError::ThresholdType {
                cut: name.label(),
                requested: "value",
            }),
            None => Err(CutflowError::NotAThreshold(name.label())),
        }
    }

    /// Build the standard single-lepton flow from the event-selector block.
    ///
    /// Group switches map onto the registry as follows: `trigger_cut`,
    /// `pv_cut`, `noise_filter_cut`, `jet_cuts` and `met_cuts` control
    /// whether their cuts are considered; a disabled b-tag block leaves the
    /// three tag cuts considered but ignored, so their bits still read as
    /// passed in downstream bookkeeping.
    pub fn standard(config: &EventSelectorConfig) -> Result<Self> {
        let mut registry = Self::new();
        for name in CutName::ALL {
            registry.register(name)?;
        }

        registry.set_considered(CutName::Trigger, config.trigger_cut);
        registry.set_considered(CutName::PrimaryVertex, config.pv_cut);
        registry.set_considered(CutName::NoiseFilter, config.noise_filter_cut);

        for name in [
            CutName::OneJetOrMore,
            CutName::TwoJetsOrMore,
            CutName::ThreeJetsOrMore,
            CutName::MinJetMultiplicity,
            CutName::MaxJetMultiplicity,
            CutName::LeadingJetPt,
        ] {
            registry.set_considered(name, config.jet_cuts);
        }
        registry.set_count_threshold(CutName::MinJetMultiplicity, config.min_jet);
        registry.set_count_threshold(CutName::MaxJetMultiplicity, config.max_jet);
        registry.set_value_threshold(CutName::LeadingJetPt, config.leading_jet_pt);

        registry.set_considered(CutName::MinMet, config.met_cuts);
        registry.set_value_threshold(CutName::MinMet, config.min_met);

        registry.set_count_threshold(CutName::MinMuon, config.min_muon);
        registry.set_count_threshold(CutName::MinElectron, config.min_electron);
        registry.set_count_threshold(CutName::MinLepton, config.min_lepton);
        registry.set_count_threshold(CutName::MaxLepton, config.max_lepton);

        registry.set_ignored(CutName::SecondLeptonVeto, !config.second_lepton_veto);

        if config.btag_cuts {
            registry.set_ignored(CutName::OneBtagOrMore, !config.btag_1);
            registry.set_ignored(CutName::TwoBtagsOrMore, !config.btag_2);
            registry.set_ignored(CutName::ThreeBtagsOrMore, !config.btag_3);
        } else {
            registry.set_ignored(CutName::OneBtagOrMore, true);
            registry.set_ignored(CutName::TwoBtagsOrMore, true);
            registry.set_ignored(CutName::ThreeBtagsOrMore, true);
        }

        for label in &config.ignored_cuts {
            let name = CutName::from_label(label)
                .ok_or_else(|| CutflowError::UnknownCut(label.clone()))?;
            registry.set_ignored(name, true);
        }

        Ok(registry)
    }
}
