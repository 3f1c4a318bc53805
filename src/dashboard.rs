use crate::config::CoinConfig;
use crate::error::MarketDataError;
use crate::indicator::{compute_indicators, IndicatorParams, IndicatorSeries};
use crate::market_data::MarketDataSource;
use crate::model::price::PriceSeries;
use crate::model::signal::SignalReading;
use crate::strategy::ma_crossover::{run_backtest, BacktestConfig, BacktestResult};
use crate::strategy::score::{evaluate, SignalError, SignalRules};

/// Everything the dashboard shows for one coin and lookback window.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub coin: CoinConfig,
    pub days: u32,
    pub spot_price: f64,
    pub series: PriceSeries,
    pub indicators: IndicatorSeries,
    pub signal: Result<SignalReading, SignalError>,
}

impl Snapshot {
    pub fn backtest(&self, config: &BacktestConfig) -> BacktestResult {
        run_backtest(&self.indicators, config)
    }
}

/// Fetch, compute indicators and score. A failed or empty fetch returns an
/// error and nothing downstream runs.
pub fn load_snapshot<S: MarketDataSource>(
    source: &S,
    coin: &CoinConfig,
    days: u32,
    params: &IndicatorParams,
    rules: &SignalRules,
) -> Result<Snapshot, MarketDataError> {
    tracing::info!(coin = %coin.id, days, "Loading snapshot");

    let spot_price = source.spot_price(&coin.id)?;
    let series = source.price_history(&coin.id, days)?;
    if series.is_empty() {
        return Err(MarketDataError::EmptySeries {
            coin_id: coin.id.clone(),
            days,
        });
    }

    let indicators = compute_indicators(&series, params);
    let signal = evaluate(&indicators, rules);
    match &signal {
        Ok(reading) => tracing::info!(
            coin = %coin.id,
            signal = %reading.signal,
            score = reading.score,
            "Signal computed"
        ),
        Err(e) => tracing::warn!(coin = %coin.id, reason = %e, "Signal withheld"),
    }

    Ok(Snapshot {
        coin: coin.clone(),
        days,
        spot_price,
        series,
        indicators,
        signal,
    })
}
