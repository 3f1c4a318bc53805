use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use super::MarketDataSource;
use crate::error::MarketDataError;
use crate::model::price::{PricePoint, PriceSeries};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoClient {
    http: Client,
    base_url: Url,
    vs_currency: String,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoClient {
    pub fn new(
        base_url: &str,
        vs_currency: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let base_url =
            Url::parse(base_url).map_err(|e| MarketDataError::Url(format!("{}: {}", base_url, e)))?;
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            let value = HeaderValue::from_str(key.trim())
                .map_err(|_| MarketDataError::Url("API key is not a valid header value".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            vs_currency: vs_currency.to_ascii_lowercase(),
        })
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketDataError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    fn get_text(&self, url: Url) -> Result<String, MarketDataError> {
        tracing::debug!(url = %url, "GET market data");
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(MarketDataError::Api {
                status: status.as_u16(),
                msg: body.chars().take(200).collect(),
            });
        }
        Ok(body)
    }
}

impl MarketDataSource for CoinGeckoClient {
    fn spot_price(&self, coin_id: &str) -> Result<f64, MarketDataError> {
        let url = self.endpoint(
            &["simple", "price"],
            &[("ids", coin_id), ("vs_currencies", self.vs_currency.as_str())],
        )?;
        let body = self.get_text(url)?;
        parse_simple_price(&body, coin_id, &self.vs_currency)
    }

    fn price_history(&self, coin_id: &str, days: u32) -> Result<PriceSeries, MarketDataError> {
        let days_str = days.to_string();
        let url = self.endpoint(
            &["coins", coin_id, "market_chart"],
            &[("vs_currency", self.vs_currency.as_str()), ("days", days_str.as_str())],
        )?;
        let body = self.get_text(url)?;
        parse_market_chart(&body, coin_id, days)
    }
}

/// Parse a `/simple/price` payload shaped like `{"bitcoin": {"usd": 64000.1}}`.
pub fn parse_simple_price(
    body: &str,
    coin_id: &str,
    vs_currency: &str,
) -> Result<f64, MarketDataError> {
    let quotes: HashMap<String, HashMap<String, f64>> = serde_json::from_str(body)?;
    quotes
        .get(coin_id)
        .and_then(|q| q.get(vs_currency))
        .copied()
        .ok_or_else(|| MarketDataError::MissingQuote {
            coin_id: coin_id.to_string(),
            vs_currency: vs_currency.to_string(),
        })
}

/// Parse a `/coins/{id}/market_chart` payload into a [`PriceSeries`].
///
/// Only the `prices` array of `[timestamp_ms, price]` pairs is used. Points
/// with a non-finite price are dropped.
pub fn parse_market_chart(body: &str, coin_id: &str, days: u32) -> Result<PriceSeries, MarketDataError> {
    let chart: MarketChartResponse = serde_json::from_str(body)?;
    let points: Vec<PricePoint> = chart
        .prices
        .into_iter()
        .filter(|(_, price)| price.is_finite())
        .map(|(ts, price)| PricePoint::new(ts as i64, price))
        .collect();
    if points.is_empty() {
        return Err(MarketDataError::EmptySeries {
            coin_id: coin_id.to_string(),
            days,
        });
    }
    Ok(PriceSeries::new(coin_id, days, points))
}
