// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Adaptive Z-score detection over a sliding window
//!
//! Sum and sum of squares are maintained incrementally over the last
//! `window_size` values. Older data is forgotten, so the detector follows
//! drift in the signal at the cost of the long-run stability of Welford.

use std::collections::VecDeque;

use crate::config::AdaptiveZScoreConfig;
use crate::error::Result;
use crate::STDDEV_EPSILON;

/// Sliding-window Z-score detector
#[derive(Debug, Clone)]
pub struct AdaptiveZScoreDetector {
    config: AdaptiveZScoreConfig,
    window: VecDeque<f64>,
    sum: f64,
    sum_sq: f64,
    anomalies_detected: u64,
}

impl AdaptiveZScoreDetector {
    pub fn new(window_size: usize, threshold: f64) -> Result<Self> {
        Self::with_config(AdaptiveZScoreConfig {
            window_size,
            threshold,
        })
    }

    pub fn with_config(config: AdaptiveZScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            window: VecDeque::with_capacity(config.window_size),
            config,
            sum: 0.0,
            sum_sq: 0.0,
            anomalies_detected: 0,
        })
    }

    /// Push `value` into the window and classify it against the window's
    /// current (post-insertion) mean.
    pub fn update(&mut self, value: f64) -> (bool, f64) {
        if self.window.len() == self.config.window_size {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
                self.sum_sq -= old * old;
            }
        }

        self.window.push_back(value);
        self.sum += value;
        self.sum_sq += value * value;

        if self.window.len() < self.config.window_size / 2 {
            return (false, 0.0);
        }

        let (mean, stddev) = self.moments();
        if stddev < STDDEV_EPSILON {
            return (false, 0.0);
        }

        let zscore = (value - mean).abs() / stddev;
        let is_anomaly = zscore > self.config.threshold;
        if is_anomaly {
            self.anomalies_detected += 1;
            log::trace!("adaptive anomaly: value={} z={:.3}", value, zscore);
        }

        (is_anomaly, zscore)
    }

    // Round-off can push sum_sq/n - mean^2 slightly negative.
    fn moments(&self) -> (f64, f64) {
        if self.window.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.window.len() as f64;
        let mean = self.sum / n;
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        (mean, variance.sqrt())
    }

    /// Mean of the values currently in the window
    pub fn mean(&self) -> f64 {
        self.moments().0
    }

    /// Population standard deviation of the current window
    pub fn stddev(&self) -> f64 {
        self.moments().1
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn anomalies_detected(&self) -> u64 {
        self.anomalies_detected
    }

    pub fn config(&self) -> &AdaptiveZScoreConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
        self.sum_sq = 0.0;
        self.anomalies_detected = 0;
    }
}
