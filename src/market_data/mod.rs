pub mod cache;
pub mod coingecko;

use crate::error::MarketDataError;
use crate::model::price::PriceSeries;

/// Read side of a market-data provider.
pub trait MarketDataSource {
    /// Latest spot price for `coin_id` in the provider's quote currency.
    fn spot_price(&self, coin_id: &str) -> Result<f64, MarketDataError>;

    /// Price history for `coin_id` over the last `days` days, oldest first.
    fn price_history(&self, coin_id: &str, days: u32) -> Result<PriceSeries, MarketDataError>;
}

pub use cache::CachedMarketData;
pub use coingecko::CoinGeckoClient;
