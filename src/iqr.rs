// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Interquartile-range outlier detection
//!
//! Quartiles are exact at recompute time: the window is copied, sorted and
//! indexed at `n/4` and `3n/4`. In steady state the sort runs once every
//! `recompute_interval` updates, so the cached fences are at most that many
//! updates stale. While the window is still filling, the distribution
//! changes with every sample and the quartiles are refreshed on each update.
//! The first `window_size` updates therefore cost one sort each, about
//! O(W² log W) in total for a window of W; a 10 000-sample window sorts
//! 10 000 times before reaching the periodic schedule.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::IqrConfig;
use crate::error::Result;

/// Minimum number of buffered values before quartiles exist
pub const MIN_QUARTILE_SAMPLES: usize = 4;

/// Fences computed for one classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl IqrBounds {
    fn from_quartiles(q1: f64, q3: f64, k: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower_bound: q1 - k * iqr,
            upper_bound: q3 + k * iqr,
        }
    }

    /// True if `value` lies outside the fences
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }

    /// Distance from `value` to the nearest fence (0 inside the fences)
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.lower_bound {
            self.lower_bound - value
        } else if value > self.upper_bound {
            value - self.upper_bound
        } else {
            0.0
        }
    }
}

/// Sliding-window IQR detector
#[derive(Debug, Clone)]
pub struct IqrDetector {
    config: IqrConfig,
    window: VecDeque<f64>,
    /// Scratch buffer reused for sorting
    sorted: Vec<f64>,
    /// Cached (q1, q3); None until first computable
    quartiles: Option<(f64, f64)>,
    recompute_interval: usize,
    updates_since_recompute: usize,
    anomalies_detected: u64,
}

impl IqrDetector {
    pub fn new(window_size: usize, k: f64) -> Result<Self> {
        Self::with_config(IqrConfig { window_size, k })
    }

    pub fn with_config(config: IqrConfig) -> Result<Self> {
        config.validate()?;
        let window_size = config.window_size;
        Ok(Self {
            config,
            window: VecDeque::with_capacity(window_size),
            sorted: Vec::with_capacity(window_size),
            quartiles: None,
            recompute_interval: (window_size / 10).max(10),
            updates_since_recompute: 0,
            anomalies_detected: 0,
        })
    }

    /// Push `value` and test it against the current fences
    ///
    /// Returns `(false, None)` during warm-up (fewer than `window_size / 2`
    /// values) or while fewer than 4 values are buffered.
    pub fn update(&mut self, value: f64) -> (bool, Option<IqrBounds>) {
        let was_full = self.window.len() == self.config.window_size;
        if was_full {
            self.window.pop_front();
        }
        self.window.push_back(value);
        self.updates_since_recompute += 1;

        if !was_full || self.updates_since_recompute >= self.recompute_interval {
            self.recompute();
            self.updates_since_recompute = 0;
        }

        if self.window.len() < self.config.window_size / 2 {
            return (false, None);
        }

        // Filling refreshes the cache each update; None means < 4 samples
        let Some((q1, q3)) = self.quartiles else {
            return (false, None);
        };

        let bounds = IqrBounds::from_quartiles(q1, q3, self.config.k);
        let is_anomaly = bounds.is_outlier(value);
        if is_anomaly {
            self.anomalies_detected += 1;
            log::trace!(
                "iqr anomaly: value={} bounds=[{:.3}, {:.3}]",
                value,
                bounds.lower_bound,
                bounds.upper_bound
            );
        }

        (is_anomaly, Some(bounds))
    }

    fn recompute(&mut self) {
        let n = self.window.len();
        if n < MIN_QUARTILE_SAMPLES {
            return;
        }

        self.sorted.clear();
        self.sorted.extend(self.window.iter().copied());
        self.sorted.sort_unstable_by(f64::total_cmp);

        let q1 = self.sorted[n / 4];
        let q3 = self.sorted[3 * n / 4];
        self.quartiles = Some((q1, q3));
        log::debug!("quartiles recomputed over {} samples: q1={} q3={}", n, q1, q3);
    }

    /// Cached `(q1, q3)`, if any
    pub fn quartiles(&self) -> Option<(f64, f64)> {
        self.quartiles
    }

    /// Fences derived from the cached quartiles
    pub fn bounds(&self) -> Option<IqrBounds> {
        self.quartiles
            .map(|(q1, q3)| IqrBounds::from_quartiles(q1, q3, self.config.k))
    }

    pub fn recompute_interval(&self) -> usize {
        self.recompute_interval
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

    pub fn config(&self) -> &IqrConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.sorted.clear();
        self.quartiles = None;
        self.updates_since_recompute = 0;
        self.anomalies_detected = 0;
    }
}
