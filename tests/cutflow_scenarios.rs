//! End-to-end cut-flow scenarios.
//!
//! Each test builds a configured evaluator, feeds it a hand-crafted event,
//! and checks the recorded cut flow: where rejections land, how ignored and
//! not-considered cuts are recorded, and the aggregate properties the
//! bookkeeping downstream depends on.

use cutflow_engine::{
    CutName, CutStatus, CutflowEvaluator, Electron, Event, FourMomentum, Jet, MissingEt, Muon,
    SelectionConfig, Tau, TriggerRecord, Vertex,
};

const MC_EL_PATH: &str = "HLT_Ele27_WP85_Gsf";
const MC_MU_PATH: &str = "HLT_IsoMu24_eta2p1";

fn base_config() -> SelectionConfig {
    let mut config = SelectionConfig::default();
    let selector = &mut config.event_selector;
    selector.is_mc = true;
    selector.mc_trigger_path_el = MC_EL_PATH.to_string();
    selector.mc_trigger_path_mu = MC_MU_PATH.to_string();
    selector.min_jet = 1;
    selector.max_lepton = 5;
    config
}

fn evaluator(config: SelectionConfig) -> CutflowEvaluator {
    CutflowEvaluator::new(config).unwrap()
}

fn good_jet(pt: f64, btag: f64) -> Jet {
    Jet {
        p4: FourMomentum::new(pt, 0.4, 0.0, pt * 1.1),
        btag_discriminant: btag,
        neutral_hadron_fraction: Some(0.1),
        neutral_em_fraction: Some(0.1),
        charged_hadron_fraction: Some(0.4),
        charged_em_fraction: Some(0.2),
        constituent_count: Some(6),
        charged_multiplicity: Some(4),
        ..Jet::default()
    }
}

fn good_muon(pt: f64) -> Muon {
    Muon {
        p4: FourMomentum::new(pt, 0.9, 0.0, pt * 1.05),
        is_global: true,
        normalized_chi2: Some(1.2),
        valid_muon_hits: Some(10),
        matched_stations: Some(3),
        dxy: Some(0.01),
        relative_isolation: Some(0.04),
    }
}

fn good_electron(pt: f64) -> Electron {
    Electron {
        p4: FourMomentum::new(pt, -0.7, 1.5, pt * 1.02),
        id_score: Some(0.96),
        missing_inner_hits: Some(0),
        relative_isolation: Some(0.03),
        passes_conversion_veto: true,
    }
}

fn good_vertex() -> Vertex {
    Vertex {
        ndof: 8.0,
        z: 1.0,
        rho: 0.2,
        is_fake: false,
    }
}

/// A single-muon event that passes the base configuration end to end.
fn passing_event() -> Event {
    Event {
        jets: Some(vec![
            good_jet(110.0, 0.9),
            good_jet(60.0, 0.2),
            good_jet(45.0, 0.0),
        ]),
        muons: Some(vec![good_muon(40.0)]),
        electrons: Some(vec![]),
        taus: Some(vec![]),
        met: Some(MissingEt { et: 60.0, phi: 0.4 }),
        vertices: Some(vec![good_vertex()]),
        triggers: Some(TriggerRecord::from_pairs([
            (MC_EL_PATH, false),
            (MC_MU_PATH, true),
        ])),
    }
}

#[test]
fn scenario_a_zero_good_jets_rejected_at_one_jet_or_more() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        jets: Some(vec![]),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);

    assert!(!result.overall_pass());
    assert_eq!(result.rejection_point(), Some(CutName::OneJetOrMore));
    // Cuts after the rejection point are left unmarked.
    assert!(!result.was_considered(CutName::TwoJetsOrMore));
    assert!(!result.was_considered(CutName::AllCuts));
}

#[test]
fn scenario_b_mixed_flavor_rejected_at_second_lepton_veto() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        muons: Some(vec![good_muon(40.0), good_muon(32.0)]),
        electrons: Some(vec![good_electron(45.0)]),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);

    assert_eq!(result.rejection_point(), Some(CutName::SecondLeptonVeto));
    assert!(result.passed(CutName::MaxLepton));
}

#[test]
fn scenario_c_same_flavor_passes_second_lepton_veto() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        muons: Some(vec![good_muon(40.0), good_muon(32.0)]),
        electrons: Some(vec![]),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);

    // Two muons and no electron: no mixed-flavor ambiguity.
    assert!(result.passed(CutName::SecondLeptonVeto));
    assert!(result.overall_pass());
}

#[test]
fn scenario_d_btag_block_disabled_records_passed_bits() {
    let mut config = base_config();
    config.event_selector.btag_cuts = false;
    let mut evaluator = evaluator(config);

    // No tagged jets at all.
    let event = Event {
        jets: Some(vec![
            good_jet(110.0, 0.0),
            good_jet(60.0, 0.0),
            good_jet(45.0, 0.0),
        ]),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);

    for name in [
        CutName::OneBtagOrMore,
        CutName::TwoBtagsOrMore,
        CutName::ThreeBtagsOrMore,
    ] {
        assert!(result.passed(name), "btag bit not passed: {name}");
        assert_eq!(result.status(name), CutStatus::PassedIgnored);
    }
    assert!(result.overall_pass());
}

#[test]
fn scenario_d_btag_block_enabled_rejects_on_tag_count() {
    let mut config = base_config();
    config.event_selector.btag_cuts = true;
    config.event_selector.btag_1 = true;
    let mut evaluator = evaluator(config);

    let event = Event {
        jets: Some(vec![
            good_jet(110.0, 0.0),
            good_jet(60.0, 0.0),
            good_jet(45.0, 0.0),
        ]),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);

    assert_eq!(result.rejection_point(), Some(CutName::OneBtagOrMore));
}

#[test]
fn scenario_e_mc_electron_path_alone_passes_trigger() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        triggers: Some(TriggerRecord::from_pairs([
            (MC_EL_PATH, true),
            (MC_MU_PATH, false),
        ])),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert!(result.passed(CutName::Trigger));
}

#[test]
fn idempotence_same_event_same_config_bit_identical() {
    let mut evaluator = evaluator(base_config());
    let accepted = passing_event();
    let rejected = Event {
        jets: Some(vec![]),
        ..passing_event()
    };

    assert_eq!(evaluator.evaluate(&accepted), evaluator.evaluate(&accepted));
    assert_eq!(evaluator.evaluate(&rejected), evaluator.evaluate(&rejected));
}

#[test]
fn monotonicity_ignoring_the_failing_cut_accepts() {
    // Three good jets, all below the leading-pt threshold: fails exactly
    // one cut.
    let event = Event {
        jets: Some(vec![
            good_jet(45.0, 0.9),
            good_jet(40.0, 0.0),
            good_jet(35.0, 0.0),
        ]),
        ..passing_event()
    };

    let base = evaluator(base_config()).evaluate(&event);
    assert_eq!(base.rejection_point(), Some(CutName::LeadingJetPt));

    // Ignoring the failing cut flips the event to accepted.
    let mut config = base_config();
    config.event_selector.ignored_cuts = vec!["Leading jet pt".to_string()];
    let ignored = evaluator(config).evaluate(&event);
    assert!(ignored.overall_pass());
    assert_eq!(
        ignored.status(CutName::LeadingJetPt),
        CutStatus::PassedIgnored
    );
}

#[test]
fn monotonicity_ignoring_any_cut_never_rejects_an_accepted_event() {
    let event = passing_event();
    assert!(evaluator(base_config()).evaluate(&event).overall_pass());

    for name in CutName::ALL {
        let mut config = base_config();
        config
            .event_selector
            .ignored_cuts
            .push(name.label().to_string());
        let result = evaluator(config).evaluate(&event);
        assert!(
            result.overall_pass(),
            "ignoring '{name}' rejected an accepted event"
        );
    }
}

#[test]
fn monotonicity_ignoring_an_unrelated_cut_keeps_the_rejection_point() {
    let event = Event {
        jets: Some(vec![
            good_jet(45.0, 0.9),
            good_jet(40.0, 0.0),
            good_jet(35.0, 0.0),
        ]),
        ..passing_event()
    };

    let mut config = base_config();
    config.event_selector.ignored_cuts = vec!["Min MET".to_string()];
    let result = evaluator(config).evaluate(&event);

    assert_eq!(result.rejection_point(), Some(CutName::LeadingJetPt));
}

#[test]
fn block_disable_jet_cuts_recorded_not_considered() {
    let mut config = base_config();
    config.event_selector.jet_cuts = false;
    let mut evaluator = evaluator(config);

    // Zero good jets would fail every jet cut if they were considered.
    let event = Event {
        jets: Some(vec![]),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);

    for name in [
        CutName::OneJetOrMore,
        CutName::TwoJetsOrMore,
        CutName::ThreeJetsOrMore,
        CutName::MinJetMultiplicity,
        CutName::MaxJetMultiplicity,
        CutName::LeadingJetPt,
    ] {
        assert_eq!(result.status(name), CutStatus::NotConsidered);
        assert!(!result.passed(name));
    }
    // The walk continues past the disabled block.
    assert!(result.overall_pass());
}

#[test]
fn leading_jet_pt_uses_maximum_corrected_pt_of_good_jets() {
    let mut config = base_config();
    config.event_selector.leading_jet_pt = 100.0;
    let mut evaluator = evaluator(config);

    // Raw leading pt is 95, but its stored correction lifts it to 114.
    let mut high = good_jet(95.0, 0.0);
    high.correction = 1.2;
    let event = Event {
        jets: Some(vec![good_jet(80.0, 0.0), high, good_jet(50.0, 0.0)]),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert!(result.passed(CutName::LeadingJetPt));
}

#[test]
fn leading_jet_pt_fails_with_zero_good_jets_unless_ignored() {
    let mut config = base_config();
    config.event_selector.min_jet = 0;
    config.event_selector.ignored_cuts = vec![
        "One jet or more".to_string(),
        "Two jets or more".to_string(),
        "Three jets or more".to_string(),
    ];
    let event = Event {
        jets: Some(vec![]),
        ..passing_event()
    };

    let result = evaluator(config.clone()).evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::LeadingJetPt));

    config
        .event_selector
        .ignored_cuts
        .push("Leading jet pt".to_string());
    let result = evaluator(config).evaluate(&event);
    assert!(result.overall_pass());
}

#[test]
fn missing_jet_collection_fails_first_jet_cut() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        jets: None,
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::OneJetOrMore));
}

#[test]
fn missing_met_fails_min_met() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        met: None,
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::MinMet));
}

#[test]
fn missing_tau_collection_fails_active_tau_veto() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        taus: None,
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::TauVeto));
}

#[test]
fn tau_veto_rejects_on_veto_quality_tau() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        taus: Some(vec![Tau {
            p4: FourMomentum::new(30.0, 1.1, 0.0, 31.0),
            medium_combined_isolation: true,
            against_electron_tight: true,
            against_muon_tight: true,
        }]),
        ..passing_event()
    };

    let result = evaluator.evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::TauVeto));
}

#[test]
fn data_mode_first_matching_path_wins() {
    let mut config = base_config();
    let selector = &mut config.event_selector;
    selector.is_mc = false;
    selector.trigger_path_el = vec![
        "HLT_Ele27_v1".to_string(),
        "HLT_Ele27_v2".to_string(),
        "HLT_Ele27_v3".to_string(),
    ];
    selector.trigger_path_mu = vec!["HLT_IsoMu24_v1".to_string()];
    let mut evaluator = evaluator(config);

    // Only the last electron-channel version fired.
    let event = Event {
        triggers: Some(TriggerRecord::from_pairs([
            ("HLT_Ele27_v1", false),
            ("HLT_Ele27_v2", false),
            ("HLT_Ele27_v3", true),
            ("HLT_IsoMu24_v1", false),
        ])),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);
    assert!(result.passed(CutName::Trigger));

    // No configured path fired at all.
    let event = Event {
        triggers: Some(TriggerRecord::from_pairs([("HLT_Other", true)])),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);
    assert_eq!(result.rejection_point(), Some(CutName::Trigger));
}

#[test]
fn rejected_event_has_unique_rejection_point() {
    let mut evaluator = evaluator(base_config());
    let event = Event {
        jets: Some(vec![]),
        met: None,
        taus: None,
        ..passing_event()
    };

    // Several cuts would fail, but only the first is recorded as failed.
    let result = evaluator.evaluate(&event);
    let failed: Vec<_> = CutName::ALL
        .iter()
        .filter(|name| result.status(**name) == CutStatus::Failed)
        .collect();

    assert_eq!(failed, vec![&CutName::OneJetOrMore]);
}

#[test]
fn accepted_event_has_every_bit_set() {
    let mut config = base_config();
    // Force one ignored cut into the accepted flow.
    config.event_selector.ignored_cuts = vec!["Min MET".to_string()];
    let mut evaluator = evaluator(config);

    let event = Event {
        met: Some(MissingEt { et: 5.0, phi: 0.0 }),
        ..passing_event()
    };
    let result = evaluator.evaluate(&event);

    assert!(result.overall_pass());
    assert_eq!(result.status(CutName::MinMet), CutStatus::PassedIgnored);
    for name in CutName::ALL {
        assert!(result.passed(name), "bit not set on accepted event: {name}");
    }
}
