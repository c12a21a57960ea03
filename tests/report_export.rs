use std::fs::File;

use heartlink_trials::{
    engine::{RiskCategory, ScoringEngine},
    metrics::ConfusionMatrix,
    report::{self, MASTER_CSV, MASTER_JSON, README},
    trials::{run_suite, TrialId, TrialMetrics},
};
use tempfile::tempdir;

#[test]
fn export_writes_every_artefact() {
    let tmp = tempdir().expect("tempdir");
    let results_dir = tmp.path().join("results");
    let engine = ScoringEngine::default();
    let results = run_suite(
        42,
        &engine,
        &[TrialId::OrthopneaTrigger, TrialId::MergedNoiseGuard],
    );

    let summary = report::export(&results, &results_dir, 42, true).expect("export");
    assert_eq!(summary.files.len(), 5);
    for name in [
        "T1_2_results.csv",
        "T1_3_results.csv",
        MASTER_CSV,
        MASTER_JSON,
        README,
    ] {
        assert!(results_dir.join(name).is_file(), "missing {name}");
    }

    let mut master = csv::Reader::from_path(results_dir.join(MASTER_CSV)).expect("master csv");
    let headers = master.headers().expect("headers").clone();
    assert_eq!(&headers[0], "Trial ID");
    assert!(headers.iter().any(|h| h == "fp_guard"));
    let rows: Vec<csv::StringRecord> = master.records().collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "T1.2");

    let json: serde_json::Value =
        serde_json::from_reader(File::open(results_dir.join(MASTER_JSON)).expect("json"))
            .expect("parse json");
    assert_eq!(json["T1.2"]["N_cases"], 500);
    assert_eq!(json["T1.3"]["N_cases"], 5000);

    let readme = std::fs::read_to_string(results_dir.join(README)).expect("readme");
    assert!(readme.contains("Seed: 42"));
    assert!(readme.contains("T1.3 Merged-Noise Guard Test"));

    let archive_path = summary.archive.expect("archive requested");
    assert_eq!(archive_path, tmp.path().join("results.zip"));
    let archive = zip::ZipArchive::new(File::open(&archive_path).expect("zip")).expect("read zip");
    assert_eq!(archive.len(), 5);
}

#[test]
fn export_without_archive() {
    let tmp = tempdir().expect("tempdir");
    let results_dir = tmp.path().join("plain");
    let results = run_suite(1, &ScoringEngine::default(), &[TrialId::OrthopneaTrigger]);
    let summary = report::export(&results, &results_dir, 1, false).expect("export");
    assert!(summary.archive.is_none());
    assert!(!tmp.path().join("plain.zip").exists());
}

#[test]
fn trial_csv_lists_metric_value_rows() {
    let tmp = tempdir().expect("tempdir");
    let metrics = TrialMetrics::new().with("N_cases", 3usize).with("accuracy", 0.5);
    let path = report::write_trial_csv(tmp.path(), TrialId::ChronicVsAcute, &metrics)
        .expect("trial csv");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("T1_5_results.csv"));

    let text = std::fs::read_to_string(path).expect("read csv");
    assert_eq!(text, "metric,value\nN_cases,3\naccuracy,0.5\n");
}

#[test]
fn tables_flatten_to_dotted_rows() {
    let matrix = ConfusionMatrix::from_pairs(&[RiskCategory::Green], &[RiskCategory::Yellow]);
    let metrics = TrialMetrics::new()
        .with("N_cases", 1usize)
        .with("confusion", matrix);
    let rows = report::flatten_metrics(&metrics);
    assert_eq!(rows.len(), 17);
    assert_eq!(rows[0], ("N_cases".to_string(), "1".to_string()));
    assert!(rows.contains(&("confusion.Green->Yellow".to_string(), "1".to_string())));
    assert!(rows.contains(&("confusion.Red->Red".to_string(), "0".to_string())));
}
