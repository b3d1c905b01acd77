// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Exponential moving average filter
//!
//! `EMA(t) = alpha * x(t) + (1 - alpha) * EMA(t-1)`, O(1) time and space

use crate::config::EmaConfig;
use crate::error::Result;

/// Exponential moving average
#[derive(Debug, Clone)]
pub struct EmaFilter {
    alpha: f64,
    value: f64,
    initialized: bool,
}

impl EmaFilter {
    /// Create a filter; `alpha` must be in (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        Self::with_config(EmaConfig { alpha })
    }

    pub fn with_config(config: EmaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alpha: config.alpha,
            value: 0.0,
            initialized: false,
        })
    }

    /// Blend `value` into the average and return the smoothed value
    pub fn update(&mut self, value: f64) -> f64 {
        if self.initialized {
            self.value = self.alpha * value + (1.0 - self.alpha) * self.value;
        } else {
            self.value = value;
            self.initialized = true;
        }
        self.value
    }

    /// Current smoothed value (0 before the first update)
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Window of a simple moving average with comparable lag: `2/alpha - 1`
    pub fn equivalent_window(&self) -> f64 {
        2.0 / self.alpha - 1.0
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.initialized = false;
    }
}

impl Default for EmaFilter {
    fn default() -> Self {
        Self {
            alpha: EmaConfig::default().alpha,
            value: 0.0,
            initialized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_alpha_validation() {
        assert!(EmaFilter::new(0.0).is_err());
        assert!(EmaFilter::new(1.2).is_err());
        assert!(EmaFilter::new(f64::NAN).is_err());
        assert!(EmaFilter::new(1.0).is_ok());

        let err = EmaFilter::new(0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("alpha"));
    }

    #[test]
    fn test_first_update_seeds() {
        let mut ema = EmaFilter::new(0.1).unwrap();
        assert_eq!(ema.update(42.0), 42.0);
    }

    #[test]
    fn test_recurrence() {
        let mut ema = EmaFilter::new(0.2).unwrap();
        ema.update(10.0);
        assert_relative_eq!(ema.update(20.0), 12.0, epsilon = 1e-12);
        assert_relative_eq!(ema.update(20.0), 13.6, epsilon = 1e-12);
    }

    #[test]
    fn test_alpha_one_passes_through() {
        let mut ema = EmaFilter::new(1.0).unwrap();
        for v in [3.5, -1.25, 1e9, 0.0] {
            assert_eq!(ema.update(v), v);
        }
    }

    #[test]
    fn test_equivalent_window() {
        assert_relative_eq!(EmaFilter::new(0.2).unwrap().equivalent_window(), 9.0);
        assert_relative_eq!(EmaFilter::new(1.0).unwrap().equivalent_window(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut ema = EmaFilter::default();
        ema.update(5.0);
        ema.reset();
        assert!(!ema.is_initialized());
        assert_eq!(ema.update(7.0), 7.0);
    }
}
