use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::MarketDataSource;
use crate::error::MarketDataError;
use crate::model::price::PriceSeries;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Key/value map whose entries expire a fixed time after insertion.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.retain(|k, _| keep(k));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caching wrapper around a [`MarketDataSource`]. Only successful responses are
/// cached; failures always go back to the source on the next call.
pub struct CachedMarketData<S> {
    source: S,
    spot: Mutex<TtlCache<String, f64>>,
    history: Mutex<TtlCache<(String, u32), PriceSeries>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S: MarketDataSource> CachedMarketData<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            spot: Mutex::new(TtlCache::new(ttl)),
            history: Mutex::new(TtlCache::new(ttl)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop every cached response for `coin_id`.
    pub fn invalidate(&self, coin_id: &str) {
        lock(&self.spot).retain(|k| k != coin_id);
        lock(&self.history).retain(|(id, _)| id != coin_id);
        tracing::debug!(coin_id, "Market data cache invalidated");
    }
}

impl<S: MarketDataSource> MarketDataSource for CachedMarketData<S> {
    fn spot_price(&self, coin_id: &str) -> Result<f64, MarketDataError> {
        let key = coin_id.to_string();
        if let Some(price) = lock(&self.spot).get(&key) {
            tracing::debug!(coin_id, "Spot price cache hit");
            return Ok(price);
        }
        let price = self.source.spot_price(coin_id)?;
        lock(&self.spot).insert(key, price);
        Ok(price)
    }

    fn price_history(&self, coin_id: &str, days: u32) -> Result<PriceSeries, MarketDataError> {
        let key = (coin_id.to_string(), days);
        if let Some(series) = lock(&self.history).get(&key) {
            tracing::debug!(coin_id, days, "Price history cache hit");
            return Ok(series);
        }
        let series = self.source.price_history(coin_id, days)?;
        lock(&self.history).insert(key, series.clone());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_expires_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(120));
        let t0 = Instant::now();
        cache.insert_at("bitcoin", 1.0, t0);
        assert_eq!(cache.get_at(&"bitcoin", t0 + Duration::from_secs(119)), Some(1.0));
        assert_eq!(cache.get_at(&"bitcoin", t0 + Duration::from_secs(120)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at(("bitcoin", 7u32), 1.0, t0);
        cache.insert_at(("bitcoin", 30u32), 2.0, t0);
        assert_eq!(cache.get_at(&("bitcoin", 7), t0), Some(1.0));
        assert_eq!(cache.get_at(&("bitcoin", 30), t0), Some(2.0));
        assert_eq!(cache.get_at(&("ethereum", 7), t0), None);
        assert_eq!(cache.len(), 2);
    }
}
