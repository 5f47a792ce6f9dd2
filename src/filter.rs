//! Object filter stage.
//!
//! Pure functions of (collection, selector, thresholds) that partition each
//! object collection into the derived sets the event-level cuts consume:
//! quality-passing objects ("all"), quality-and-kinematics-passing objects
//! ("good"), and for jets the tagged subset, together with the aggregate
//! counts and the leading corrected pt. All derived sequences hold indices
//! into the borrowed collection and preserve input order; they are recomputed
//! per event and discarded afterwards.

use crate::event::{Electron, Event, FourMomentum, Jet, Muon, Tau};
use crate::selector::{ElectronSelector, JetCorrector, JetSelector, JetTagger, MuonSelector};

/// Tau-veto identification is fixed, matching the upstream selection: the
/// three discriminants plus pt > 20 and |eta| < 2.4.
const TAU_VETO_MIN_PT: f64 = 20.0;
const TAU_VETO_MAX_ABS_ETA: f64 = 2.4;

/// Kinematic acceptance for one object kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicThresholds {
    pub min_pt: f64,
    pub max_abs_eta: f64,
}

impl KinematicThresholds {
    pub fn new(min_pt: f64, max_abs_eta: f64) -> Self {
        Self { min_pt, max_abs_eta }
    }

    fn accepts(&self, p4: &FourMomentum) -> bool {
        p4.pt > self.min_pt && p4.abs_eta() < self.max_abs_eta
    }
}

/// Derived jet sets for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedJets {
    /// False when the jet collection could not be retrieved.
    pub available: bool,
    /// Indices of quality-passing jets regardless of kinematics. The full
    /// quality-passing set is what downstream energy-correction
    /// recomputation needs, not just the final selection.
    pub all: Vec<usize>,
    /// Indices of quality-passing jets inside the kinematic acceptance,
    /// judged on the corrected momentum.
    pub good: Vec<usize>,
    /// Corrected momentum and tag decision for every good jet, in input
    /// order.
    pub corrected: Vec<(FourMomentum, bool)>,
    /// Indices of good jets that are additionally tagged.
    pub tagged: Vec<usize>,
    /// Maximum corrected pt among good jets; 0.0 when there are none.
    pub leading_pt: f64,
}

impl SelectedJets {
    fn empty(available: bool) -> Self {
        Self {
            available,
            all: Vec::new(),
            good: Vec::new(),
            corrected: Vec::new(),
            tagged: Vec::new(),
            leading_pt: 0.0,
        }
    }

    pub fn unavailable() -> Self {
        Self::empty(false)
    }

    pub fn n_good(&self) -> usize {
        self.good.len()
    }

    pub fn n_tagged(&self) -> usize {
        self.tagged.len()
    }
}

/// Derived lepton sets for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedObjects {
    /// False when the collection could not be retrieved.
    pub available: bool,
    /// Size of the input collection.
    pub n_all: usize,
    /// Indices of quality-and-kinematics-passing objects, in input order.
    pub good: Vec<usize>,
}

impl SelectedObjects {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            n_all: 0,
            good: Vec::new(),
        }
    }

    /// The empty selection produced when an object kind's filtering is
    /// switched off: no objects selected, but not a retrieval failure.
    pub fn disabled() -> Self {
        Self {
            available: true,
            n_all: 0,
            good: Vec::new(),
        }
    }

    pub fn n_good(&self) -> usize {
        self.good.len()
    }
}

/// Partition a jet collection into quality-passing, good, and tagged sets.
///
/// Kinematics are judged on the corrected momentum; the tag decision is
/// evaluated only for jets that pass both quality and kinematics.
pub fn filter_jets(
    jets: Option<&[Jet]>,
    selector: &dyn JetSelector,
    corrector: &dyn JetCorrector,
    tagger: &dyn JetTagger,
    event: &Event,
    thresholds: &KinematicThresholds,
) -> SelectedJets {
    let Some(jets) = jets else {
        return SelectedJets::unavailable();
    };

    let mut selected = SelectedJets::empty(true);

    for (index, jet) in jets.iter().enumerate() {
        if !selector.quality(jet).passed {
            continue;
        }
        selected.all.push(index);

        let p4 = corrector.corrected_momentum(jet, event);
        if !thresholds.accepts(&p4) {
            continue;
        }

        let tagged = tagger.is_tagged(jet, event);
        selected.good.push(index);
        selected.corrected.push((p4, tagged));
        if p4.pt > selected.leading_pt {
            selected.leading_pt = p4.pt;
        }
        if tagged {
            selected.tagged.push(index);
        }
    }

    selected
}

/// Select muons passing quality and kinematic thresholds.
pub fn filter_muons(
    muons: Option<&[Muon]>,
    selector: &dyn MuonSelector,
    thresholds: &KinematicThresholds,
) -> SelectedObjects {
    let Some(muons) = muons else {
        return SelectedObjects::unavailable();
    };

    let good = muons
        .iter()
        .enumerate()
        .filter(|(_, muon)| selector.quality(muon).passed && thresholds.accepts(&muon.p4))
        .map(|(index, _)| index)
        .collect();

    SelectedObjects {
        available: true,
        n_all: muons.len(),
        good,
    }
}

/// Select electrons passing quality and kinematic thresholds.
pub fn filter_electrons(
    electrons: Option<&[Electron]>,
    selector: &dyn ElectronSelector,
    thresholds: &KinematicThresholds,
) -> SelectedObjects {
    let Some(electrons) = electrons else {
        return SelectedObjects::unavailable();
    };

    let good = electrons
        .iter()
        .enumerate()
        .filter(|(_, el)| selector.quality(el).passed && thresholds.accepts(&el.p4))
        .map(|(index, _)| index)
        .collect();

    SelectedObjects {
        available: true,
        n_all: electrons.len(),
        good,
    }
}

/// Count taus passing the fixed veto identification. Returns `None` when the
/// collection could not be retrieved, which fails the tau veto.
pub fn count_veto_taus(taus: Option<&[Tau]>) -> Option<usize> {
    taus.map(|taus| {
        taus.iter()
            .filter(|tau| {
                tau.medium_combined_isolation
                    && tau.against_electron_tight
                    && tau.against_muon_tight
                    && tau.p4.pt > TAU_VETO_MIN_PT
                    && tau.p4.abs_eta() < TAU_VETO_MAX_ABS_ETA
            })
            .count()
    })
}
