use heartlink_trials::engine::{deescalation::hold_deescalation, RiskCategory};

use RiskCategory::{Green, Orange, Red, Yellow};

const HOLD: usize = 5;

#[test]
fn empty_history_accepts_green() {
    assert_eq!(hold_deescalation(&[], Green, HOLD), Green);
}

#[test]
fn history_without_escalation_accepts_green() {
    assert_eq!(hold_deescalation(&[Green, Yellow, Yellow], Green, HOLD), Green);
}

#[test]
fn green_right_after_red_is_held() {
    assert_eq!(hold_deescalation(&[Red], Green, HOLD), Yellow);
}

#[test]
fn non_green_proposals_pass_through() {
    assert_eq!(hold_deescalation(&[Red], Orange, HOLD), Orange);
    assert_eq!(hold_deescalation(&[Orange], Yellow, HOLD), Yellow);
    assert_eq!(hold_deescalation(&[Orange], Red, HOLD), Red);
}

#[test]
fn green_needs_five_calm_days_after_escalation() {
    assert_eq!(
        hold_deescalation(&[Orange, Yellow, Yellow, Yellow], Green, HOLD),
        Yellow
    );
    assert_eq!(
        hold_deescalation(&[Orange, Yellow, Yellow, Yellow, Yellow], Green, HOLD),
        Yellow
    );
    assert_eq!(
        hold_deescalation(&[Orange, Yellow, Yellow, Yellow, Yellow, Green], Green, HOLD),
        Green
    );
}

#[test]
fn only_the_latest_escalation_counts() {
    let categories = [Red, Green, Green, Green, Green, Green, Orange, Yellow];
    assert_eq!(hold_deescalation(&categories, Green, HOLD), Yellow);
}
