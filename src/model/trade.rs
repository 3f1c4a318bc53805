use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A manually logged trade. Stored flat as `{coin, type, amount, price}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub coin: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub amount: f64,
    pub price: f64,
}

impl Trade {
    pub fn new(coin: &str, side: TradeSide, amount: f64, price: f64) -> Self {
        Self {
            coin: coin.to_string(),
            side,
            amount,
            price,
        }
    }
}
