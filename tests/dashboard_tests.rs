use signal_deck::config::CoinConfig;
use signal_deck::dashboard::load_snapshot;
use signal_deck::error::MarketDataError;
use signal_deck::indicator::{IndicatorKind, IndicatorParams};
use signal_deck::market_data::MarketDataSource;
use signal_deck::model::price::PriceSeries;
use signal_deck::model::signal::Signal;
use signal_deck::strategy::ma_crossover::BacktestConfig;
use signal_deck::strategy::score::{SignalError, SignalRules};

struct FixedSource {
    spot: Result<f64, u16>,
    prices: Vec<f64>,
}

impl MarketDataSource for FixedSource {
    fn spot_price(&self, _coin_id: &str) -> Result<f64, MarketDataError> {
        self.spot.map_err(|status| MarketDataError::Api {
            status,
            msg: "unavailable".to_string(),
        })
    }

    fn price_history(&self, coin_id: &str, _days: u32) -> Result<PriceSeries, MarketDataError> {
        Ok(PriceSeries::from_prices(coin_id, &self.prices))
    }
}

fn bitcoin() -> CoinConfig {
    CoinConfig {
        label: "Bitcoin".to_string(),
        id: "bitcoin".to_string(),
    }
}

#[test]
fn snapshot_carries_series_indicators_and_signal() {
    let source = FixedSource {
        spot: Ok(180.0),
        prices: (0..80).map(|i| 100.0 + i as f64).collect(),
    };
    let snapshot = load_snapshot(
        &source,
        &bitcoin(),
        30,
        &IndicatorParams::default(),
        &SignalRules::default(),
    )
    .unwrap();

    assert_eq!(snapshot.coin, bitcoin());
    assert_eq!(snapshot.days, 30);
    assert_eq!(snapshot.spot_price, 180.0);
    assert_eq!(snapshot.series.len(), 80);
    assert_eq!(snapshot.indicators.len(), 80);
    // Steady rise: trend and momentum agree but RSI is overbought.
    let reading = snapshot.signal.as_ref().unwrap();
    assert_eq!(reading.score, 1);
    assert_eq!(reading.signal, Signal::Hold);

    let result = snapshot.backtest(&BacktestConfig::default());
    assert!(result.holding);
}

#[test]
fn short_history_still_loads_without_a_signal() {
    let source = FixedSource {
        spot: Ok(120.0),
        prices: (0..30).map(|i| 100.0 + i as f64).collect(),
    };
    let snapshot = load_snapshot(
        &source,
        &bitcoin(),
        7,
        &IndicatorParams::default(),
        &SignalRules::default(),
    )
    .unwrap();
    assert_eq!(
        snapshot.signal,
        Err(SignalError::Undefined(IndicatorKind::SmaSlow))
    );
    assert!(snapshot.backtest(&BacktestConfig::default()).fills.is_empty());
}

#[test]
fn empty_history_is_refused() {
    let source = FixedSource {
        spot: Ok(120.0),
        prices: Vec::new(),
    };
    let err = load_snapshot(
        &source,
        &bitcoin(),
        7,
        &IndicatorParams::default(),
        &SignalRules::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MarketDataError::EmptySeries { days: 7, .. }));
}

#[test]
fn spot_failure_fails_the_snapshot() {
    let source = FixedSource {
        spot: Err(503),
        prices: (0..80).map(|i| 100.0 + i as f64).collect(),
    };
    let err = load_snapshot(
        &source,
        &bitcoin(),
        30,
        &IndicatorParams::default(),
        &SignalRules::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MarketDataError::Api { status: 503, .. }));
}
