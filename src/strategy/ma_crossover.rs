use crate::indicator::IndicatorSeries;
use crate::model::trade::TradeSide;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestConfig {
    pub starting_cash: f64,
    /// First index the replay looks at. 50 keeps both default SMA windows filled.
    pub warmup: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            starting_cash: 1000.0,
            warmup: 50,
        }
    }
}

/// One all-in or all-out conversion executed during the replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestFill {
    pub index: usize,
    pub timestamp_ms: i64,
    pub side: TradeSide,
    pub price: f64,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub starting_cash: f64,
    pub final_value: f64,
    pub fills: Vec<BacktestFill>,
    /// `true` when the replay ended long and `final_value` is marked to market.
    pub holding: bool,
}

impl BacktestResult {
    pub fn return_pct(&self) -> f64 {
        if self.starting_cash <= 0.0 {
            return 0.0;
        }
        (self.final_value / self.starting_cash - 1.0) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PositionState {
    Flat { cash: f64 },
    Long { units: f64 },
}

/// Replay the fast/slow SMA rule over `series`.
///
/// Buys all-in whenever fast > slow while flat and sells everything whenever
/// fast < slow while long. The buy reacts to the state, not to the crossing
/// edge, so a series that starts with fast already above slow buys on the
/// first replayed index.
pub fn run_backtest(series: &IndicatorSeries, config: &BacktestConfig) -> BacktestResult {
    let mut state = PositionState::Flat {
        cash: config.starting_cash,
    };
    let mut fills = Vec::new();

    for (index, row) in series.rows().iter().enumerate().skip(config.warmup) {
        let (Some(fast), Some(slow)) = (row.sma_fast, row.sma_slow) else {
            continue;
        };

        state = match state {
            PositionState::Flat { cash } if fast > slow && row.price > 0.0 => {
                let units = cash / row.price;
                fills.push(BacktestFill {
                    index,
                    timestamp_ms: row.timestamp_ms,
                    side: TradeSide::Buy,
                    price: row.price,
                    units,
                });
                PositionState::Long { units }
            }
            PositionState::Long { units } if fast < slow => {
                fills.push(BacktestFill {
                    index,
                    timestamp_ms: row.timestamp_ms,
                    side: TradeSide::Sell,
                    price: row.price,
                    units,
                });
                PositionState::Flat {
                    cash: units * row.price,
                }
            }
            unchanged => unchanged,
        };
    }

    let (final_value, holding) = match state {
        PositionState::Flat { cash } => (cash, false),
        PositionState::Long { units } => {
            let last_price = series.last().map(|row| row.price).unwrap_or(0.0);
            (units * last_price, true)
        }
    };

    tracing::debug!(
        rows = series.len(),
        fills = fills.len(),
        final_value,
        holding,
        "Backtest replay finished"
    );

    BacktestResult {
        starting_cash: config.starting_cash,
        final_value,
        fills,
        holding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{IndicatorParams, IndicatorRow};

    fn row(price: f64, fast: Option<f64>, slow: Option<f64>) -> IndicatorRow {
        IndicatorRow {
            timestamp_ms: 0,
            price,
            sma_fast: fast,
            sma_slow: slow,
            ema: Some(price),
            rsi: None,
        }
    }

    fn series(rows: Vec<IndicatorRow>) -> IndicatorSeries {
        IndicatorSeries::from_rows(IndicatorParams::default(), rows)
    }

    fn no_warmup() -> BacktestConfig {
        BacktestConfig {
            starting_cash: 1000.0,
            warmup: 0,
        }
    }

    #[test]
    fn buys_on_state_without_a_crossing_edge() {
        // fast is above slow from the very first row; there is no crossing.
        let s = series(vec![
            row(10.0, Some(2.0), Some(1.0)),
            row(20.0, Some(2.0), Some(1.0)),
        ]);
        let result = run_backtest(&s, &no_warmup());
        assert_eq!(result.fills.len(), 1);
        assert_eq!(result.fills[0].index, 0);
        assert_eq!(result.fills[0].side, TradeSide::Buy);
        assert!(result.holding);
        assert!((result.final_value - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn holding_gates_repeat_buys() {
        let s = series(vec![
            row(10.0, Some(2.0), Some(1.0)),
            row(11.0, Some(2.0), Some(1.0)),
            row(12.0, Some(2.0), Some(1.0)),
        ]);
        let result = run_backtest(&s, &no_warmup());
        assert_eq!(result.fills.len(), 1);
    }

    #[test]
    fn sells_then_rebuys_on_next_bullish_state() {
        let s = series(vec![
            row(10.0, Some(2.0), Some(1.0)),
            row(20.0, Some(1.0), Some(2.0)),
            row(40.0, Some(2.0), Some(1.0)),
            row(20.0, Some(2.0), Some(1.0)),
        ]);
        let result = run_backtest(&s, &no_warmup());
        let sides: Vec<TradeSide> = result.fills.iter().map(|f| f.side).collect();
        assert_eq!(sides, vec![TradeSide::Buy, TradeSide::Sell, TradeSide::Buy]);
        // 1000 -> 100 units -> 2000 cash -> 50 units -> marked at 20
        assert!((result.final_value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn equal_smas_take_no_action() {
        let s = series(vec![row(10.0, Some(1.0), Some(1.0)); 5]);
        let result = run_backtest(&s, &no_warmup());
        assert!(result.fills.is_empty());
        assert_eq!(result.final_value, 1000.0);
    }

    #[test]
    fn undefined_smas_are_skipped() {
        let s = series(vec![row(10.0, None, Some(1.0)), row(10.0, Some(2.0), None)]);
        let result = run_backtest(&s, &no_warmup());
        assert!(result.fills.is_empty());
    }

    #[test]
    fn rows_before_warmup_are_ignored() {
        let mut rows = vec![row(10.0, Some(2.0), Some(1.0)); 3];
        rows.push(row(10.0, Some(1.0), Some(2.0)));
        let result = run_backtest(
            &series(rows),
            &BacktestConfig {
                starting_cash: 1000.0,
                warmup: 3,
            },
        );
        assert!(result.fills.is_empty());
        assert_eq!(result.final_value, 1000.0);
    }
}
