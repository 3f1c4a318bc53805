use thiserror::Error;

use crate::indicator::{IndicatorKind, IndicatorSeries};
use crate::model::signal::{Signal, SignalReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("no indicator data to score")]
    EmptySeries,

    #[error("{0} is not defined yet (series too short)")]
    Undefined(IndicatorKind),
}

/// Thresholds for the scoring rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRules {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub buy_score: i32,
    pub sell_score: i32,
}

impl Default for SignalRules {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            buy_score: 2,
            sell_score: -1,
        }
    }
}

impl SignalRules {
    pub fn classify(&self, score: i32) -> Signal {
        if score >= self.buy_score {
            Signal::Buy
        } else if score <= self.sell_score {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

/// Score the last row of `series`.
///
/// Refuses with [`SignalError::Undefined`] when any input is missing, since a
/// comparison against an absent value would silently skew the score.
pub fn evaluate(series: &IndicatorSeries, rules: &SignalRules) -> Result<SignalReading, SignalError> {
    let last = series.last().ok_or(SignalError::EmptySeries)?;
    let require = |kind: IndicatorKind| last.get(kind).ok_or(SignalError::Undefined(kind));

    let sma_fast = require(IndicatorKind::SmaFast)?;
    let sma_slow = require(IndicatorKind::SmaSlow)?;
    let ema = require(IndicatorKind::Ema)?;
    let rsi = require(IndicatorKind::Rsi)?;

    let mut score = 0;
    if sma_fast > sma_slow {
        score += 1;
    }
    if last.price > ema {
        score += 1;
    }
    if rsi < rules.rsi_oversold {
        score += 1;
    }
    if rsi > rules.rsi_overbought {
        score -= 1;
    }

    Ok(SignalReading {
        signal: rules.classify(score),
        score,
    })
}
