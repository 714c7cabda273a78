use super::SignalFilter;
use crate::{Error, Result};

/// Exponential moving average over a single scalar signal
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    alpha: f64,
    last: Option<f64>,
}

impl ExponentialSmoother {
    /// Create a smoother with blending factor `alpha`
    ///
    /// # Errors
    ///
    /// Returns an error if alpha is not in the range (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
        }
        Ok(Self { alpha, last: None })
    }

    /// Whether at least one sample has been seen since creation or reset
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.last.is_some()
    }

    /// Latest smoothed value, `None` before the first sample
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.last
    }

    /// Blend `raw` into the running value; the first sample passes through
    pub fn update(&mut self, raw: f64) -> f64 {
        let smoothed = match self.last {
            Some(last) => self.alpha.mul_add(raw - last, last),
            None => raw,
        };
        self.last = Some(smoothed);
        smoothed
    }
}

impl SignalFilter for ExponentialSmoother {
    fn apply(&mut self, value: f64) -> f64 {
        self.update(value)
    }

    fn reset(&mut self) {
        self.last = None;
    }
}
