use std::collections::VecDeque;

/// Rolling simple moving average over a fixed window.
#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "SMA window must be > 0");
        Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    /// Push a value and return the mean once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.values.len() == self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        self.values.push_back(value);
        self.sum += value;
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.is_ready() {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.values.len() == self.window
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// SMA aligned with `prices`: `None` until index `window - 1`.
pub fn sma_series(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(window);
    prices.iter().map(|&p| sma.push(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_trailing_window() {
        let mut sma = Sma::new(3);
        assert_eq!(sma.push(1.0), None);
        assert_eq!(sma.push(2.0), None);
        assert!(!sma.is_ready());
        assert!((sma.push(3.0).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((sma.push(4.0).unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((sma.push(5.0).unwrap() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn series_leading_region_is_undefined() {
        let out = sma_series(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((out[3].unwrap() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rolling_sum_does_not_drift() {
        let prices: Vec<f64> = (0..5_000).map(|i| (i as f64) * 0.1 + 0.01).collect();
        let out = sma_series(&prices, 10);
        for i in 9..prices.len() {
            let naive = prices[i + 1 - 10..=i].iter().sum::<f64>() / 10.0;
            let got = out[i].unwrap();
            assert!((got - naive).abs() < 1e-8, "drift at {}: {} vs {}", i, got, naive);
        }
    }

    #[test]
    #[should_panic(expected = "SMA window must be > 0")]
    fn zero_window_panics() {
        Sma::new(0);
    }
}
