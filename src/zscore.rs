// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Global Z-score anomaly detection
//!
//! Running mean and variance are maintained with Welford's recurrence, so a
//! stream of any length is handled in O(1) time and space without the
//! cancellation error of a `sum / sum_sq` formulation.

use crate::config::ZScoreConfig;
use crate::error::Result;
use crate::STDDEV_EPSILON;

/// Z-score detector over the whole history of a stream
#[derive(Debug, Clone)]
pub struct ZScoreDetector {
    config: ZScoreConfig,
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean (M2)
    m2: f64,
    anomalies_detected: u64,
    last_zscore: f64,
}

impl ZScoreDetector {
    /// Create a detector flagging values beyond `threshold` standard
    /// deviations once `warmup_samples` values have been seen
    pub fn new(threshold: f64, warmup_samples: usize) -> Result<Self> {
        Self::with_config(ZScoreConfig {
            threshold,
            warmup_samples,
        })
    }

    /// Create a detector from configuration
    pub fn with_config(config: ZScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            count: 0,
            mean: 0.0,
            m2: 0.0,
            anomalies_detected: 0,
            last_zscore: 0.0,
        })
    }

    /// Fold `value` into the statistics and classify it
    ///
    /// The z-score is measured against the mean *before* `value` was
    /// absorbed, i.e. how surprising the value was given prior history.
    /// Returns `(false, 0.0)` during warm-up and while the stream is
    /// constant.
    pub fn update(&mut self, value: f64) -> (bool, f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if self.count < self.config.warmup_samples as u64 {
            return (false, 0.0);
        }

        let stddev = (self.m2 / self.count as f64).sqrt();
        if stddev < STDDEV_EPSILON {
            return (false, 0.0);
        }

        let zscore = delta.abs() / stddev;
        self.last_zscore = zscore;

        let is_anomaly = zscore > self.config.threshold;
        if is_anomaly {
            self.anomalies_detected += 1;
            log::trace!(
                "z-score anomaly: value={} z={:.3} mean={:.3}",
                value,
                zscore,
                self.mean
            );
        }

        (is_anomaly, zscore)
    }

    /// Running mean of every value seen
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (0 before two samples)
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / self.count as f64
        } else {
            0.0
        }
    }

    /// Population standard deviation (0 before two samples)
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn anomalies_detected(&self) -> u64 {
        self.anomalies_detected
    }

    /// Last z-score computed outside warm-up
    pub fn last_zscore(&self) -> f64 {
        self.last_zscore
    }

    /// True once warm-up is over
    pub fn is_warmed_up(&self) -> bool {
        self.count >= self.config.warmup_samples as u64
    }

    pub fn config(&self) -> &ZScoreConfig {
        &self.config
    }

    /// Return to the post-construction state
    pub fn reset(&mut self) {
        self.count = 0;
        self.mean = 0.0;
        self.m2 = 0.0;
        self.anomalies_detected = 0;
        self.last_zscore = 0.0;
    }
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self {
            config: ZScoreConfig::default(),
            count: 0,
            mean: 0.0,
            m2: 0.0,
            anomalies_detected: 0,
            last_zscore: 0.0,
        }
    }
}
