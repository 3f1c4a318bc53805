use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data API error (status {status}): {msg}")]
    Api { status: u16, msg: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint URL: {0}")]
    Url(String),

    #[error("no {vs_currency} quote for '{coin_id}'")]
    MissingQuote { coin_id: String, vs_currency: String },

    #[error("empty price history for '{coin_id}' ({days} days)")]
    EmptySeries { coin_id: String, days: u32 },
}
