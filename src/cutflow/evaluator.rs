//! The cut-flow evaluator.
//!
//! Walks the registered cuts in fixed order for one event, feeding each
//! predicate from the object filter stage, and stops at the first cut that
//! is evaluated, not satisfied, and not ignored. Cuts whose group is
//! disabled are recorded as not considered and never evaluated; cuts after
//! the rejection point are left unmarked.

use std::sync::Arc;

use log::{debug, info};

use crate::config::SelectionConfig;
use crate::cutflow::registry::{CutName, CutRegistry};
use crate::cutflow::result::{CutStatus, CutflowResult};
use crate::error::Result;
use crate::event::Event;
use crate::filter::{
    count_veto_taus, filter_electrons, filter_jets, filter_muons, KinematicThresholds,
    SelectedObjects,
};
use crate::selector::{
    DiscriminantTagger, NominalCorrector, SharedElectronSelector, SharedJetCorrector,
    SharedJetSelector, SharedJetTagger, SharedMuonSelector, SharedVertexSelector,
    StandardElectronSelector, StandardJetSelector, StandardMuonSelector, StandardVertexSelector,
};

/// Builder for a [`CutflowEvaluator`] with custom collaborators.
///
/// Any collaborator not supplied is built from the corresponding
/// configuration block.
///
/// ```rust,ignore
/// let evaluator = CutflowEvaluatorBuilder::new(config)
///     .with_jet_tagger(Arc::new(MyTagger))
///     .build()?;
/// ```
pub struct CutflowEvaluatorBuilder {
    config: SelectionConfig,
    jet_selector: Option<SharedJetSelector>,
    muon_selector: Option<SharedMuonSelector>,
    electron_selector: Option<SharedElectronSelector>,
    vertex_selector: Option<SharedVertexSelector>,
    jet_corrector: Option<SharedJetCorrector>,
    jet_tagger: Option<SharedJetTagger>,
}

impl CutflowEvaluatorBuilder {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            jet_selector: None,
            muon_selector: None,
            electron_selector: None,
            vertex_selector: None,
            jet_corrector: None,
            jet_tagger: None,
        }
    }

    pub fn with_jet_selector(mut self, selector: SharedJetSelector) -> Self {
        self.jet_selector = Some(selector);
        self
    }

    pub fn with_muon_selector(mut self, selector: SharedMuonSelector) -> Self {
        self.muon_selector = Some(selector);
        self
    }

    pub fn with_electron_selector(mut self, selector: SharedElectronSelector) -> Self {
        self.electron_selector = Some(selector);
        self
    }

    pub fn with_vertex_selector(mut self, selector: SharedVertexSelector) -> Self {
        self.vertex_selector = Some(selector);
        self
    }

    pub fn with_jet_corrector(mut self, corrector: SharedJetCorrector) -> Self {
        self.jet_corrector = Some(corrector);
        self
    }

    pub fn with_jet_tagger(mut self, tagger: SharedJetTagger) -> Self {
        self.jet_tagger = Some(tagger);
        self
    }

    pub fn build(self) -> Result<CutflowEvaluator> {
        let registry = CutRegistry::standard(&self.config.event_selector)?;

        // Resolving every threshold here keeps typed-accessor misuse a
        // startup failure; the per-event path only sees plain numbers.
        let min_jet = registry.count_threshold(CutName::MinJetMultiplicity)?;
        let max_jet = registry.count_threshold(CutName::MaxJetMultiplicity)?;
        let leading_jet_pt = registry.value_threshold(CutName::LeadingJetPt)?;
        let min_met = registry.value_threshold(CutName::MinMet)?;
        let min_muon = registry.count_threshold(CutName::MinMuon)?;
        let min_electron = registry.count_threshold(CutName::MinElectron)?;
        let min_lepton = registry.count_threshold(CutName::MinLepton)?;
        let max_lepton = registry.count_threshold(CutName::MaxLepton)?;

        let jet_selector = self.jet_selector.unwrap_or_else(|| {
            Arc::new(StandardJetSelector::new(self.config.jet_quality.clone()))
        });
        let muon_selector = self.muon_selector.unwrap_or_else(|| {
            Arc::new(StandardMuonSelector::new(self.config.muon_quality.clone()))
        });
        let electron_selector = self.electron_selector.unwrap_or_else(|| {
            Arc::new(StandardElectronSelector::new(
                self.config.electron_quality.clone(),
            ))
        });
        let vertex_selector = self.vertex_selector.unwrap_or_else(|| {
            Arc::new(StandardVertexSelector::new(
                self.config.vertex_quality.clone(),
            ))
        });
        let jet_corrector = self
            .jet_corrector
            .unwrap_or_else(|| Arc::new(NominalCorrector::from_config(&self.config.event_selector)));
        let jet_tagger = self
            .jet_tagger
            .unwrap_or_else(|| Arc::new(DiscriminantTagger::from_config(&self.config.event_selector)));

        Ok(CutflowEvaluator {
            config: self.config,
            registry,
            jet_selector,
            muon_selector,
            electron_selector,
            vertex_selector,
            jet_corrector,
            jet_tagger,
            min_jet,
            max_jet,
            leading_jet_pt,
            min_met,
            min_muon,
            min_electron,
            min_lepton,
            max_lepton,
            first_event: true,
        })
    }
}

/// The cut-flow decision engine: one configuration, many events.
///
/// ```rust,ignore
/// let config = SelectionConfig::from_yaml_file("selection.yaml")?;
/// let mut evaluator = CutflowEvaluator::new(config)?;
///
/// for event in events {
///     let result = evaluator.evaluate(&event);
///     if result.overall_pass() {
///         keep(&event);
///     }
/// }
/// ```
pub struct CutflowEvaluator {
    config: SelectionConfig,
    registry: CutRegistry,
    jet_selector: SharedJetSelector,
    muon_selector: SharedMuonSelector,
    electron_selector: SharedElectronSelector,
    vertex_selector: SharedVertexSelector,
    jet_corrector: SharedJetCorrector,
    jet_tagger: SharedJetTagger,
    min_jet: usize,
    max_jet: usize,
    leading_jet_pt: f64,
    min_met: f64,
    min_muon: usize,
    min_electron: usize,
    min_lepton: usize,
    max_lepton: usize,
    /// Gates the optional one-time trigger-name dump.
    first_event: bool,
}

impl std::fmt::Debug for CutflowEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutflowEvaluator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("min_jet", &self.min_jet)
            .field("max_jet", &self.max_jet)
            .field("leading_jet_pt", &self.leading_jet_pt)
            .field("min_met", &self.min_met)
            .field("min_muon", &self.min_muon)
            .field("min_electron", &self.min_electron)
            .field("min_lepton", &self.min_lepton)
            .field("max_lepton", &self.max_lepton)
            .field("first_event", &self.first_event)
            .finish_non_exhaustive()
    }
}

impl CutflowEvaluator {
    /// Build an evaluator with the standard collaborators from a validated
    /// configuration.
    pub fn new(config: SelectionConfig) -> Result<Self> {
        CutflowEvaluatorBuilder::new(config).build()
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn registry(&self) -> &CutRegistry {
        &self.registry
    }

    /// Evaluate one event against the configured flow.
    ///
    /// May be called repeatedly; evaluations are independent and the result
    /// is written exactly once per call.
    pub fn evaluate(&mut self, event: &Event) -> CutflowResult {
        if self.first_event {
            self.first_event = false;
            if self.config.event_selector.dump_trigger {
                self.dump_trigger_paths(event);
            }
        }

        let mut result = CutflowResult::new();
        let _ = self.run(event, &mut result);
        result
    }

    /// One forward pass over the flow. Returns `None` at the rejection
    /// point, which leaves every later cut unmarked.
    fn run(&self, event: &Event, result: &mut CutflowResult) -> Option<()> {
        result.mark(CutName::NoSelection, CutStatus::PassedEvaluated);

        debug!("trigger cuts...");
        self.apply(result, CutName::Trigger, || self.trigger_decision(event))?;

        debug!("pv cuts...");
        self.apply(result, CutName::PrimaryVertex, || {
            self.good_vertex_present(event)
        })?;

        // Placeholder for an upstream noise/scraping decision; applies no
        // further condition of its own.
        self.apply(result, CutName::NoiseFilter, || true)?;

        debug!("jet cuts...");
        let selection = &self.config.event_selector;
        let jets = filter_jets(
            event.jets.as_deref(),
            self.jet_selector.as_ref(),
            self.jet_corrector.as_ref(),
            self.jet_tagger.as_ref(),
            event,
            &KinematicThresholds::new(selection.jet_min_pt, selection.jet_max_abs_eta),
        );
        let n_jets = jets.n_good();

        self.apply(result, CutName::OneJetOrMore, || jets.available && n_jets >= 1)?;
        self.apply(result, CutName::TwoJetsOrMore, || jets.available && n_jets >= 2)?;
        self.apply(result, CutName::ThreeJetsOrMore, || {
            jets.available && n_jets >= 3
        })?;
        self.apply(result, CutName::MinJetMultiplicity, || {
            jets.available && n_jets >= self.min_jet
        })?;
        self.apply(result, CutName::MaxJetMultiplicity, || {
            jets.available && n_jets <= self.max_jet
        })?;
        self.apply(result, CutName::LeadingJetPt, || {
            jets.available && jets.leading_pt >= self.leading_jet_pt
        })?;

        debug!("met cuts...");
        self.apply(result, CutName::MinMet, || {
            event.met.as_ref().is_some_and(|met| met.et > self.min_met)
        })?;

        debug!("lepton cuts...");
        let muons = if selection.muon_cuts {
            filter_muons(
                event.muons.as_deref(),
                self.muon_selector.as_ref(),
                &KinematicThresholds::new(selection.muon_min_pt, selection.muon_max_abs_eta),
            )
        } else {
            SelectedObjects::disabled()
        };
        let electrons = if selection.electron_cuts {
            filter_electrons(
                event.electrons.as_deref(),
                self.electron_selector.as_ref(),
                &KinematicThresholds::new(
                    selection.electron_min_pt,
                    selection.electron_max_abs_eta,
                ),
            )
        } else {
            SelectedObjects::disabled()
        };

        let leptons_available = muons.available && electrons.available;
        let n_leptons = muons.n_good() + electrons.n_good();

        self.apply(result, CutName::MinMuon, || {
            muons.available && muons.n_good() >= self.min_muon
        })?;
        self.apply(result, CutName::MinElectron, || {
            electrons.available && electrons.n_good() >= self.min_electron
        })?;
        self.apply(result, CutName::MinLepton, || {
            leptons_available && n_leptons >= self.min_lepton
        })?;
        self.apply(result, CutName::MaxLepton, || {
            leptons_available && n_leptons <= self.max_lepton
        })?;

        // The veto fires only on the mixed-flavor ambiguity, never on a
        // second lepton of the same flavor.
        self.apply(result, CutName::SecondLeptonVeto, || {
            !(muons.n_good() >= 1 && electrons.n_good() >= 1)
        })?;

        let veto_taus = if selection.tau_veto {
            count_veto_taus(event.taus.as_deref())
        } else {
            Some(0)
        };
        self.apply(result, CutName::TauVeto, || veto_taus == Some(0))?;

        debug!("btag cuts...");
        let n_tagged = jets.n_tagged();
        self.apply(result, CutName::OneBtagOrMore, || {
            jets.available && n_tagged >= 1
        })?;
        self.apply(result, CutName::TwoBtagsOrMore, || {
            jets.available && n_tagged >= 2
        })?;
        self.apply(result, CutName::ThreeBtagsOrMore, || {
            jets.available && n_tagged >= 3
        })?;

        result.mark(CutName::AllCuts, CutStatus::PassedEvaluated);
        Some(())
    }

    /// Record one cut. A non-considered cut is marked and skipped without
    /// consulting its predicate; a failing, non-ignored cut ends the walk.
    fn apply(
        &self,
        result: &mut CutflowResult,
        name: CutName,
        predicate: impl FnOnce() -> bool,
    ) -> Option<()> {
        if !self.registry.is_considered(name) {
            result.mark(name, CutStatus::NotConsidered);
            return Some(());
        }
        if predicate() {
            result.mark(name, CutStatus::PassedEvaluated);
            Some(())
        } else if self.registry.is_ignored(name) {
            result.mark(name, CutStatus::PassedIgnored);
            Some(())
        } else {
            result.mark(name, CutStatus::Failed);
            debug!("rejected at '{}'", name);
            None
        }
    }

    /// The trigger decision. In Monte-Carlo mode either designated MC path
    /// suffices; in data mode each channel's path list is scanned in
    /// configured order and the first firing path wins.
    fn trigger_decision(&self, event: &Event) -> bool {
        let Some(record) = event.triggers.as_ref() else {
            return false;
        };
        let selection = &self.config.event_selector;

        if selection.is_mc {
            record.fired(&selection.mc_trigger_path_el)
                || record.fired(&selection.mc_trigger_path_mu)
        } else {
            let electron_channel = selection
                .trigger_path_el
                .iter()
                .any(|path| record.fired(path));
            let muon_channel = selection
                .trigger_path_mu
                .iter()
                .any(|path| record.fired(path));
            electron_channel || muon_channel
        }
    }

    fn good_vertex_present(&self, event: &Event) -> bool {
        event.vertices.as_deref().is_some_and(|vertices| {
            vertices
                .iter()
                .any(|vertex| self.vertex_selector.quality(vertex).passed)
        })
    }

    fn dump_trigger_paths(&self, event: &Event) {
        let Some(record) = event.triggers.as_ref() else {
            info!("trigger dump requested but event carries no trigger record");
            return;
        };
        for (index, path) in record.iter().enumerate() {
            info!("{:4}  {}  fired = {}", index, path.name, path.fired);
        }
    }
}
