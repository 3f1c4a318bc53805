use signal_deck::risk_module::{assess_risk, RiskAssessment, SkipReasonCode};

#[test]
fn classic_three_to_one() {
    match assess_risk(100.0, 90.0, 130.0) {
        RiskAssessment::Ratio {
            risk,
            reward,
            ratio,
        } => {
            assert!((risk - 10.0).abs() < f64::EPSILON);
            assert!((reward - 30.0).abs() < f64::EPSILON);
            assert!((ratio - 3.0).abs() < f64::EPSILON);
        }
        other => panic!("expected ratio, got {:?}", other),
    }
}

#[test]
fn zero_risk_is_reported_not_infinite() {
    let r = assess_risk(100.0, 100.0, 130.0);
    assert_eq!(
        r,
        RiskAssessment::UndefinedRatio {
            risk: 0.0,
            reward: 30.0
        }
    );
    assert_eq!(r.ratio(), None);
    assert_eq!(r.to_string(), "undefined ratio (zero risk)");
}

#[test]
fn non_positive_inputs_skip_the_computation() {
    assert_eq!(
        assess_risk(0.0, 90.0, 130.0),
        RiskAssessment::Skipped(SkipReasonCode::EntryNotPositive)
    );
    assert_eq!(
        assess_risk(100.0, 0.0, 130.0),
        RiskAssessment::Skipped(SkipReasonCode::StopLossNotPositive)
    );
    assert_eq!(
        assess_risk(100.0, 90.0, -1.0),
        RiskAssessment::Skipped(SkipReasonCode::TakeProfitNotPositive)
    );
    assert_eq!(
        SkipReasonCode::EntryNotPositive.as_str(),
        "risk.entry_not_positive"
    );
}

#[test]
fn target_below_entry_is_not_clamped() {
    let r = assess_risk(100.0, 90.0, 95.0);
    assert_eq!(r.ratio(), Some(-0.5));
}
