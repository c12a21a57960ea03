use heartlink_trials::{
    engine::RiskCategory::{self, Green, Orange, Red, Yellow},
    metrics::{
        accuracy, auc::binary_auc, fraction_within, mean, median, ping_pong_rate,
        population_std, round3, surrogate_auc, wilson_interval, ConfusionMatrix,
    },
};

#[test]
fn wilson_bounds_at_extremes() {
    let (low, high) = wilson_interval(0.0, 100);
    assert!(low < 1e-12);
    assert!(high > 0.0 && high < 0.1);

    let (low, high) = wilson_interval(1.0, 100);
    assert!(high > 1.0 - 1e-12);
    assert!(low > 0.9 && low < 1.0);
}

#[test]
fn wilson_interval_narrows_with_more_trials() {
    let widths: Vec<f64> = [10, 50, 100, 500, 1_000]
        .into_iter()
        .map(|n| {
            let (low, high) = wilson_interval(0.5, n);
            high - low
        })
        .collect();
    assert!(widths.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn wilson_without_trials_is_degenerate() {
    assert_eq!(wilson_interval(0.3, 0), (0.0, 0.0));
}

#[test]
fn ping_pong_counts_returns_after_one_day() {
    assert_eq!(ping_pong_rate(&[Green, Yellow, Green]), 1.0);
    assert_eq!(ping_pong_rate(&[Green, Yellow, Yellow, Green]), 0.0);
    assert_eq!(ping_pong_rate(&[Green, Green, Green, Green]), 0.0);
    assert_eq!(ping_pong_rate(&[Green, Yellow]), 0.0);
    assert_eq!(ping_pong_rate(&[]), 0.0);
}

#[test]
fn surrogate_auc_of_perfect_prediction_is_one() {
    let labels = [Green, Yellow, Orange, Red, Green, Yellow];
    assert!((surrogate_auc(&labels, &labels) - 1.0).abs() < 1e-12);
}

#[test]
fn surrogate_auc_with_single_class_is_half() {
    let truth = [Green; 4];
    let predicted = [Green, Yellow, Red, Orange];
    assert!((surrogate_auc(&truth, &predicted) - 0.5).abs() < 1e-12);
}

#[test]
fn tied_scores_are_not_averaged() {
    assert_eq!(binary_auc(&[false, true], &[0, 0]), 0.0);
    assert!((surrogate_auc(&[Green, Yellow], &[Green, Green]) - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn confusion_table_covers_every_pair() {
    let truth = [Green, Yellow, Yellow, Red];
    let predicted = [Green, Orange, Yellow, Red];
    let matrix = ConfusionMatrix::from_pairs(&truth, &predicted);
    assert_eq!(matrix.total(), 4);
    assert_eq!(matrix.correct(), 3);
    assert_eq!(matrix.count(Yellow, Orange), 1);

    let table = matrix.to_table();
    assert_eq!(table.len(), 16);
    assert_eq!(table.keys().next().map(String::as_str), Some("Green->Green"));
    assert_eq!(table["Yellow->Orange"], 1);
    assert_eq!(table["Red->Green"], 0);
}

#[test]
fn distribution_sits_on_the_diagonal() {
    let labels = [Green, Green, Red];
    let matrix = ConfusionMatrix::distribution(&labels);
    assert_eq!(matrix.count(Green, Green), 2);
    assert_eq!(matrix.count(Red, Red), 1);
    assert_eq!(matrix.correct(), matrix.total());
}

#[test]
fn accuracy_handles_empty_input() {
    let none: [RiskCategory; 0] = [];
    assert_eq!(accuracy(&none, &none), 0.0);
    assert_eq!(accuracy(&[Green, Red], &[Green, Yellow]), 0.5);
}

#[test]
fn summary_statistics() {
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(
        population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]),
        2.0
    );
    assert_eq!(fraction_within(&[-0.03, 0.04, 0.05, -0.2], 0.04), 0.5);
    assert_eq!(round3(0.12345), 0.123);
    assert_eq!(round3(2.0004), 2.0);
}
