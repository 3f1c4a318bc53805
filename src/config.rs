use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::indicator::IndicatorParams;
use crate::strategy::ma_crossover::BacktestConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub market: MarketConfig,
    pub chart: ChartConfig,
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub backtest: BacktestSettings,
    pub trade_log: TradeLogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    pub base_url: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    pub coins: Vec<CoinConfig>,
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoinConfig {
    /// Display name, also written to the trade log.
    pub label: String,
    /// Provider asset id.
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    pub default_days: u32,
    pub min_days: u32,
    pub max_days: u32,
    #[serde(default = "default_true")]
    pub show_indicators: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub starting_cash: f64,
    pub warmup: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeLogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_cache_ttl_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl Default for BacktestSettings {
    fn default() -> Self {
        let d = BacktestConfig::default();
        Self {
            starting_cash: d.starting_cash,
            warmup: d.warmup,
        }
    }
}

impl BacktestSettings {
    pub fn to_backtest_config(self) -> BacktestConfig {
        BacktestConfig {
            starting_cash: self.starting_cash,
            warmup: self.warmup,
        }
    }
}

impl MarketConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

impl ChartConfig {
    pub fn clamp_days(&self, days: i64) -> u32 {
        days.clamp(self.min_days as i64, self.max_days as i64) as u32
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("SD_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        config.market.api_key = std::env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(config)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.market.base_url)
            .with_context(|| format!("market.base_url '{}' is not a URL", self.market.base_url))?;
        if self.market.vs_currency.trim().is_empty() {
            bail!("market.vs_currency must not be empty");
        }
        if self.market.coins.is_empty() {
            bail!("market.coins must list at least one coin");
        }
        for coin in &self.market.coins {
            if coin.id.trim().is_empty() || coin.label.trim().is_empty() {
                bail!("market.coins entries need a non-empty label and id");
            }
        }

        let chart = &self.chart;
        if chart.min_days == 0 || chart.min_days > chart.max_days {
            bail!(
                "chart days range invalid: min_days {} max_days {}",
                chart.min_days,
                chart.max_days
            );
        }
        if !(chart.min_days..=chart.max_days).contains(&chart.default_days) {
            bail!(
                "chart.default_days {} outside [{}, {}]",
                chart.default_days,
                chart.min_days,
                chart.max_days
            );
        }

        let ind = &self.indicators;
        if ind.sma_fast == 0 || ind.sma_slow == 0 || ind.ema_span == 0 || ind.rsi_period == 0 {
            bail!("indicator periods must be > 0");
        }
        if ind.sma_fast >= ind.sma_slow {
            bail!(
                "indicators.sma_fast ({}) must be less than sma_slow ({})",
                ind.sma_fast,
                ind.sma_slow
            );
        }

        if !(self.backtest.starting_cash.is_finite() && self.backtest.starting_cash > 0.0) {
            bail!("backtest.starting_cash must be > 0");
        }
        Ok(())
    }

    pub fn coin_by_id(&self, id: &str) -> Option<&CoinConfig> {
        self.market.coins.iter().find(|c| c.id == id)
    }
}
