// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! One-dimensional Kalman filter
//!
//! Static-process model: the true value is assumed constant plus process
//! noise `Q`, observed through measurements with noise `R`. Each update runs
//! the PREDICT then UPDATE half of the cycle.

use crate::config::KalmanConfig;
use crate::error::Result;

/// Estimate variance before the first measurement
pub const INITIAL_ESTIMATE_VARIANCE: f64 = 1.0;

/// Scalar Kalman filter
#[derive(Debug, Clone)]
pub struct KalmanFilter1D {
    config: KalmanConfig,
    estimate: f64,
    estimate_variance: f64,
    initialized: bool,
}

impl KalmanFilter1D {
    /// Create a filter with process noise `Q` and measurement noise `R`
    pub fn new(process_noise: f64, measurement_noise: f64) -> Result<Self> {
        Self::with_config(KalmanConfig {
            process_noise,
            measurement_noise,
        })
    }

    pub fn with_config(config: KalmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            estimate: 0.0,
            estimate_variance: INITIAL_ESTIMATE_VARIANCE,
            initialized: false,
        })
    }

    /// Feed a measurement and return the filtered estimate
    ///
    /// The first measurement seeds the estimate as-is
    pub fn update(&mut self, measurement: f64) -> f64 {
        if !self.initialized {
            self.estimate = measurement;
            self.initialized = true;
            return self.estimate;
        }

        // PREDICT: x stays, uncertainty grows by Q
        let predicted_estimate = self.estimate;
        let predicted_variance = self.estimate_variance + self.config.process_noise;

        // UPDATE
        let gain = Self::gain(predicted_variance, self.config.measurement_noise);
        self.estimate = predicted_estimate + gain * (measurement - predicted_estimate);
        self.estimate_variance = (1.0 - gain) * predicted_variance;

        self.estimate
    }

    // 0/0 (no uncertainty on either side) trusts the measurement.
    fn gain(predicted_variance: f64, measurement_noise: f64) -> f64 {
        let denominator = predicted_variance + measurement_noise;
        if denominator <= 0.0 {
            1.0
        } else {
            predicted_variance / denominator
        }
    }

    /// Gain the next update would apply
    pub fn kalman_gain(&self) -> f64 {
        Self::gain(
            self.estimate_variance + self.config.process_noise,
            self.config.measurement_noise,
        )
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn estimate_variance(&self) -> f64 {
        self.estimate_variance
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &KalmanConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.estimate = 0.0;
        self.estimate_variance = INITIAL_ESTIMATE_VARIANCE;
        self.initialized = false;
    }
}

impl Default for KalmanFilter1D {
    fn default() -> Self {
        Self {
            config: KalmanConfig::default(),
            estimate: 0.0,
            estimate_variance: INITIAL_ESTIMATE_VARIANCE,
            initialized: false,
        }
    }
}
