//! Basic usage of the cut-flow engine: configure once, evaluate events,
//! inspect the recorded flow.
//!
//! Run with `cargo run --example basic_usage`.

use cutflow_engine::{CutflowEvaluator, Event, SelectionConfig};

const CONFIG_YAML: &str = r#"
jet_quality: {}
vertex_quality: {}
muon_quality: {}
electron_quality: {}
event_selector:
    is_mc: true
    mc_trigger_path_el: HLT_Ele27_WP85_Gsf
    mc_trigger_path_mu: HLT_IsoMu24_eta2p1
    min_jet: 1
    leading_jet_pt: 50.0
"#;

const EVENT_JSON: &str = r#"{
    "jets": [
        {
            "p4": {"pt": 120.0, "eta": 0.4, "phi": 0.0, "energy": 132.0},
            "btag_discriminant": 0.92,
            "neutral_hadron_fraction": 0.1,
            "neutral_em_fraction": 0.1,
            "charged_hadron_fraction": 0.4,
            "charged_em_fraction": 0.2,
            "constituent_count": 6,
            "charged_multiplicity": 4
        },
        {
            "p4": {"pt": 60.0, "eta": -1.1, "phi": 2.1, "energy": 70.0},
            "neutral_hadron_fraction": 0.1,
            "neutral_em_fraction": 0.1,
            "charged_hadron_fraction": 0.4,
            "charged_em_fraction": 0.2,
            "constituent_count": 5,
            "charged_multiplicity": 3
        },
        {
            "p4": {"pt": 45.0, "eta": 1.8, "phi": -2.0, "energy": 55.0},
            "neutral_hadron_fraction": 0.1,
            "neutral_em_fraction": 0.1,
            "charged_hadron_fraction": 0.4,
            "charged_em_fraction": 0.2,
            "constituent_count": 5,
            "charged_multiplicity": 3
        }
    ],
    "muons": [
        {
            "p4": {"pt": 40.0, "eta": 0.9, "phi": 0.3, "energy": 42.0},
            "is_global": true,
            "normalized_chi2": 1.2,
            "valid_muon_hits": 10,
            "matched_stations": 3,
            "dxy": 0.01,
            "relative_isolation": 0.04
        }
    ],
    "electrons": [],
    "taus": [],
    "met": {"et": 60.0, "phi": 0.4},
    "vertices": [{"ndof": 8.0, "z": 1.0, "rho": 0.2, "is_fake": false}],
    "triggers": [
        {"name": "HLT_Ele27_WP85_Gsf", "fired": false},
        {"name": "HLT_IsoMu24_eta2p1", "fired": true}
    ]
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = SelectionConfig::from_yaml_str(CONFIG_YAML)?;
    let mut evaluator = CutflowEvaluator::new(config)?;

    let event: Event = serde_json::from_str(EVENT_JSON)?;
    let result = evaluator.evaluate(&event);

    println!("cut flow:\n{result}");
    if result.overall_pass() {
        println!("event accepted");
    } else if let Some(cut) = result.rejection_point() {
        println!("event rejected at '{cut}'");
    }

    Ok(())
}
