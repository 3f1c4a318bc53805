#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// Historical prices for one asset over one lookback window, ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    coin_id: String,
    days: u32,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(coin_id: &str, days: u32, points: Vec<PricePoint>) -> Self {
        Self {
            coin_id: coin_id.to_string(),
            days,
            points,
        }
    }

    /// Build a series from bare prices with synthetic one-minute timestamps.
    pub fn from_prices(coin_id: &str, prices: &[f64]) -> Self {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(i as i64 * 60_000, price))
            .collect();
        Self::new(coin_id, 0, points)
    }

    pub fn coin_id(&self) -> &str {
        &self.coin_id
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
