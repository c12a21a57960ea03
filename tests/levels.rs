use heartlink_trials::engine::{Baseline, Observation, SymptomLevel};
use serde_json::json;

#[test]
fn parses_names_and_numbers() {
    assert_eq!(SymptomLevel::parse("none").value(), 0.0);
    assert_eq!(SymptomLevel::parse("Mild").value(), 1.0);
    assert_eq!(SymptomLevel::parse(" MODERATE ").value(), 2.0);
    assert_eq!(SymptomLevel::parse("severe").value(), 3.0);
    assert_eq!(SymptomLevel::parse("2.5").value(), 2.5);
    assert_eq!(SymptomLevel::parse("7").value(), 3.0);
    assert_eq!(SymptomLevel::parse("unknown").value(), 0.0);
}

#[test]
fn new_clamps_into_range() {
    assert_eq!(SymptomLevel::new(-1.0).value(), 0.0);
    assert_eq!(SymptomLevel::new(4.2).value(), 3.0);
    assert_eq!(SymptomLevel::new(f64::NAN).value(), 0.0);
    assert_eq!(SymptomLevel::new(1.25).value(), 1.25);
}

#[test]
fn observation_from_loose_record() {
    let record = json!({
        "sobLevel": "severe",
        "edema": 0,
        "edemaLevel": 2,
        "fatigue": true,
        "orthopnea": 1,
    });
    let observation = Observation::from_json(&record);
    assert_eq!(observation.levels(), [3.0, 2.0, 1.0]);
    assert!(observation.orthopnea);
}

#[test]
fn missing_fields_default_to_zero() {
    let observation = Observation::from_json(&json!({}));
    assert_eq!(observation, Observation::default());

    let observation = Observation::from_json(&json!("not an object"));
    assert_eq!(observation.levels(), [0.0, 0.0, 0.0]);
    assert!(!observation.orthopnea);
}

#[test]
fn baseline_accepts_prefixed_keys() {
    let record = json!({
        "baselineSob": 1.5,
        "baselineEdema": "mild",
        "baselineFatigue": null,
        "baselineOrthopnea": true,
    });
    let baseline = Baseline::from_json(&record);
    assert_eq!(baseline.levels(), [1.5, 1.0, 0.0]);
    assert!(baseline.orthopnea);
}

#[test]
fn deserializes_with_aliases() {
    let observation: Observation =
        serde_json::from_str(r#"{"sobLevel":"mild","edema":null,"fatigue":9}"#).unwrap();
    assert_eq!(observation.levels(), [1.0, 0.0, 3.0]);
    assert!(!observation.orthopnea);

    let baseline: Baseline =
        serde_json::from_str(r#"{"baselineSob":"moderate","baselineOrthopnea":true}"#).unwrap();
    assert_eq!(baseline.levels(), [2.0, 0.0, 0.0]);
    assert!(baseline.orthopnea);
}
