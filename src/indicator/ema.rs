/// Exponential moving average with span-based smoothing (`alpha = 2 / (span + 1)`).
///
/// Uses the bias-adjusted form: each output is the weighted mean of every value
/// seen so far with weights `(1 - alpha)^k`, normalised by the weight sum. The
/// first value is therefore the first price itself and there is no warm-up gap.
#[derive(Debug, Clone)]
pub struct Ema {
    decay: f64,
    weighted_sum: f64,
    weight_total: f64,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be > 0");
        let alpha = 2.0 / (span as f64 + 1.0);
        Self {
            decay: 1.0 - alpha,
            weighted_sum: 0.0,
            weight_total: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        self.weighted_sum = value + self.decay * self.weighted_sum;
        self.weight_total = 1.0 + self.decay * self.weight_total;
        self.weighted_sum / self.weight_total
    }

    pub fn value(&self) -> Option<f64> {
        if self.weight_total > 0.0 {
            Some(self.weighted_sum / self.weight_total)
        } else {
            None
        }
    }
}

/// EMA aligned with `prices`; defined from index 0.
pub fn ema_series(prices: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut ema = Ema::new(span);
    prices.iter().map(|&p| Some(ema.push(p))).collect()
}
