pub mod ema;
pub mod rsi;
pub mod sma;

use std::fmt;

use serde::Deserialize;

use crate::model::price::PriceSeries;

use ema::ema_series;
use rsi::rsi_series;
use sma::sma_series;

/// Window sizes for the indicator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_span: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            ema_span: 20,
            rsi_period: 14,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    SmaFast,
    SmaSlow,
    Ema,
    Rsi,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndicatorKind::SmaFast => "fast SMA",
            IndicatorKind::SmaSlow => "slow SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Rsi => "RSI",
        };
        f.write_str(label)
    }
}

/// Indicator values at one index of the source series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    pub timestamp_ms: i64,
    pub price: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorRow {
    pub fn get(&self, kind: IndicatorKind) -> Option<f64> {
        match kind {
            IndicatorKind::SmaFast => self.sma_fast,
            IndicatorKind::SmaSlow => self.sma_slow,
            IndicatorKind::Ema => self.ema,
            IndicatorKind::Rsi => self.rsi,
        }
    }
}

/// Indicator rows aligned index-for-index with a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    params: IndicatorParams,
    rows: Vec<IndicatorRow>,
}

impl IndicatorSeries {
    pub fn from_rows(params: IndicatorParams, rows: Vec<IndicatorRow>) -> Self {
        Self { params, rows }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(timestamp_ms, value)` pairs for the defined part of one indicator.
    pub fn defined(&self, kind: IndicatorKind) -> Vec<(i64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.get(kind).map(|v| (row.timestamp_ms, v)))
            .collect()
    }
}

pub fn compute_indicators(series: &PriceSeries, params: &IndicatorParams) -> IndicatorSeries {
    let prices = series.prices();
    let sma_fast = sma_series(&prices, params.sma_fast);
    let sma_slow = sma_series(&prices, params.sma_slow);
    let ema = ema_series(&prices, params.ema_span);
    let rsi = rsi_series(&prices, params.rsi_period);

    let rows = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorRow {
            timestamp_ms: point.timestamp_ms,
            price: point.price,
            sma_fast: sma_fast[i],
            sma_slow: sma_slow[i],
            ema: ema[i],
            rsi: rsi[i],
        })
        .collect();

    IndicatorSeries::from_rows(*params, rows)
}
