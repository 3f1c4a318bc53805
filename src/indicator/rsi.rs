use super::sma::Sma;

/// Relative strength index from simple rolling means of gains and losses.
#[derive(Debug, Clone)]
pub struct Rsi {
    prev_price: Option<f64>,
    avg_gain: Sma,
    avg_loss: Sma,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            prev_price: None,
            avg_gain: Sma::new(period),
            avg_loss: Sma::new(period),
        }
    }

    /// Push a price; returns RSI once `period` deltas have been seen.
    pub fn push(&mut self, price: f64) -> Option<f64> {
        let prev = self.prev_price.replace(price)?;
        let delta = price - prev;
        let gain = self.avg_gain.push(delta.max(0.0));
        let loss = self.avg_loss.push((-delta).max(0.0));
        match (gain, loss) {
            (Some(g), Some(l)) => Some(rsi_from_averages(g, l)),
            _ => None,
        }
    }
}

/// `avg_loss == 0` means RS is infinite, which maps to 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // Rolling sums can leave tiny negative residue.
    let avg_gain = avg_gain.max(0.0);
    let avg_loss = avg_loss.max(0.0);
    if avg_loss <= f64::EPSILON {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// RSI aligned with `prices`: `None` for indices below `period`.
pub fn rsi_series(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = Rsi::new(period);
    prices.iter().map(|&p| rsi.push(p)).collect()
}
