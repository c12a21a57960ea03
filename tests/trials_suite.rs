use heartlink_trials::{
    engine::ScoringEngine,
    trials::{run_suite, MetricValue, TrialId, UnknownTrial},
};

fn count(value: Option<&MetricValue>) -> u64 {
    match value {
        Some(MetricValue::Count(n)) => *n,
        other => panic!("expected a count, got {other:?}"),
    }
}

fn table_sum(value: Option<&MetricValue>) -> u64 {
    value
        .and_then(MetricValue::as_table)
        .map(|table| table.values().sum())
        .expect("table metric")
}

#[test]
fn same_seed_reproduces_results() {
    let engine = ScoringEngine::default();
    let ids = [TrialId::OrthopneaTrigger, TrialId::MergedNoiseGuard];
    let first = run_suite(42, &engine, &ids);
    let second = run_suite(42, &engine, &ids);
    assert_eq!(first, second);
    assert_eq!(first.keys().copied().collect::<Vec<_>>(), ids.to_vec());
}

#[test]
fn full_suite_reports_every_trial() {
    let engine = ScoringEngine::default();
    let results = run_suite(42, &engine, &TrialId::ALL);
    assert_eq!(results.len(), 10);
    assert_eq!(
        results.keys().copied().collect::<Vec<_>>(),
        TrialId::ALL.to_vec()
    );

    let t10 = &results[&TrialId::BaselineDrift];
    assert_eq!(count(t10.get("N_users")), 10_000);
    assert_eq!(count(t10.get("days")), 30);
    assert!(t10.get("stable_within_pm_0_04").is_some());

    assert_eq!(count(results[&TrialId::PerturbationSweep].get("N_cases")), 1_000);
    assert_eq!(count(results[&TrialId::OrthopneaTrigger].get("N_cases")), 500);

    let t13 = &results[&TrialId::MergedNoiseGuard];
    assert_eq!(count(t13.get("N_cases")), 5_000);
    assert_eq!(count(t13.get("fp_guard")), 0);
    assert_eq!(count(t13.get("fp_no_guard")), 0);

    let t14 = &results[&TrialId::CooldownClamp];
    assert_eq!(count(t14.get("N_sequences")), 500);
    let days = t14
        .get("median_days_to_green")
        .and_then(MetricValue::as_f64)
        .expect("median days");
    assert!((0.0..20.0).contains(&days));

    let t15 = &results[&TrialId::ChronicVsAcute];
    assert_eq!(count(t15.get("N_cases")), 2_000);
    assert_eq!(table_sum(t15.get("true_dist")), 2_000);
    assert_eq!(table_sum(t15.get("pred_dist")), 2_000);

    let t16 = &results[&TrialId::FalseAlertSweep];
    assert_eq!(count(t16.get("N_days")), 25_000);
    assert_eq!(count(t16.get("false_alerts")), 0);

    let t17 = &results[&TrialId::PingPongAudit];
    assert_eq!(count(t17.get("N_trajectories")), 100);
    assert_eq!(count(t17.get("days")), 60);

    assert_eq!(count(results[&TrialId::CrossBaselineStress].get("N_cases")), 4_000);

    let t19 = &results[&TrialId::IntegratedHoldout];
    assert_eq!(count(t19.get("N_cases")), 4_800);
    assert_eq!(table_sum(t19.get("confusion")), 4_800);

    let rates = [
        (TrialId::PerturbationSweep, "unchanged_rate"),
        (TrialId::OrthopneaTrigger, "orthopnea_escalation_accuracy"),
        (TrialId::CooldownClamp, "clamp_hold_rate"),
        (TrialId::ChronicVsAcute, "accuracy"),
        (TrialId::ChronicVsAcute, "auc_surrogate"),
        (TrialId::FalseAlertSweep, "false_alert_rate"),
        (TrialId::PingPongAudit, "mean_ping_pong_rate"),
        (TrialId::CrossBaselineStress, "within_pm_0_05"),
        (TrialId::IntegratedHoldout, "accuracy"),
        (TrialId::IntegratedHoldout, "accuracy_CI95_low"),
        (TrialId::IntegratedHoldout, "accuracy_CI95_high"),
    ];
    for (id, name) in rates {
        let value = results[&id]
            .get(name)
            .and_then(MetricValue::as_f64)
            .unwrap_or_else(|| panic!("{id} is missing {name}"));
        assert!((0.0..=1.0).contains(&value), "{id} {name} = {value}");
    }
}

#[test]
fn trial_ids_parse_loosely() {
    assert_eq!("T1.3".parse::<TrialId>(), Ok(TrialId::MergedNoiseGuard));
    assert_eq!("t1_3".parse::<TrialId>(), Ok(TrialId::MergedNoiseGuard));
    assert_eq!("1.9".parse::<TrialId>(), Ok(TrialId::IntegratedHoldout));
    assert_eq!(
        "T2.0".parse::<TrialId>(),
        Err(UnknownTrial("T2.0".to_string()))
    );
}

#[test]
fn trial_ids_format_for_files() {
    assert_eq!(TrialId::CooldownClamp.to_string(), "T1.4");
    assert_eq!(TrialId::CooldownClamp.file_stem(), "T1_4");
    assert_eq!(TrialId::ALL[0].code(), "T1.0");
}
