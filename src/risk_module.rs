use std::fmt;

/// Why a risk/reward computation was not performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReasonCode {
    EntryNotPositive,
    StopLossNotPositive,
    TakeProfitNotPositive,
}

impl SkipReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EntryNotPositive => "risk.entry_not_positive",
            Self::StopLossNotPositive => "risk.stop_loss_not_positive",
            Self::TakeProfitNotPositive => "risk.take_profit_not_positive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskAssessment {
    /// At least one input was missing or not positive; nothing was computed.
    Skipped(SkipReasonCode),
    /// Entry equals stop-loss, so there is no risk to divide by.
    UndefinedRatio { risk: f64, reward: f64 },
    Ratio { risk: f64, reward: f64, ratio: f64 },
}

impl RiskAssessment {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            RiskAssessment::Ratio { ratio, .. } => Some(*ratio),
            _ => None,
        }
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskAssessment::Skipped(_) => write!(f, "enter entry, stop loss and take profit"),
            RiskAssessment::UndefinedRatio { .. } => write!(f, "undefined ratio (zero risk)"),
            RiskAssessment::Ratio { ratio, .. } => write!(f, "{:.2}", ratio),
        }
    }
}

/// Risk/reward for a long setup: `(take_profit - entry) / (entry - stop_loss)`.
///
/// The ratio is not clamped; a stop above entry yields a negative ratio.
pub fn assess_risk(entry: f64, stop_loss: f64, take_profit: f64) -> RiskAssessment {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(entry) {
        return RiskAssessment::Skipped(SkipReasonCode::EntryNotPositive);
    }
    if !positive(stop_loss) {
        return RiskAssessment::Skipped(SkipReasonCode::StopLossNotPositive);
    }
    if !positive(take_profit) {
        return RiskAssessment::Skipped(SkipReasonCode::TakeProfitNotPositive);
    }

    let risk = entry - stop_loss;
    let reward = take_profit - entry;
    if risk == 0.0 {
        return RiskAssessment::UndefinedRatio { risk, reward };
    }
    RiskAssessment::Ratio {
        risk,
        reward,
        ratio: reward / risk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_above_entry_gives_negative_ratio() {
        let r = assess_risk(100.0, 110.0, 130.0);
        assert_eq!(
            r,
            RiskAssessment::Ratio {
                risk: -10.0,
                reward: 30.0,
                ratio: -3.0
            }
        );
    }

    #[test]
    fn display_rounds_to_two_decimals() {
        assert_eq!(assess_risk(100.0, 97.0, 110.0).to_string(), "3.33");
    }

    #[test]
    fn non_finite_inputs_are_skipped() {
        assert_eq!(
            assess_risk(f64::NAN, 90.0, 130.0),
            RiskAssessment::Skipped(SkipReasonCode::EntryNotPositive)
        );
    }
}
