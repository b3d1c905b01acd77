// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Step-change (spike) detection between consecutive readings

use crate::config::SpikeConfig;
use crate::error::Result;
use crate::STDDEV_EPSILON;

/// Flags jumps larger than `max_delta_ratio` times a reference level
///
/// The reference (typically the running mean from a Z-score detector) is
/// supplied by the caller on every update.
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    max_delta_ratio: f64,
    last_value: Option<f64>,
    spikes_detected: u64,
}

impl SpikeDetector {
    pub fn new(max_delta_ratio: f64) -> Result<Self> {
        Self::with_config(SpikeConfig { max_delta_ratio })
    }

    pub fn with_config(config: SpikeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_delta_ratio: config.max_delta_ratio,
            last_value: None,
            spikes_detected: 0,
        })
    }

    /// Compare `value` with the previous reading
    ///
    /// Returns the spike flag and the absolute jump. A reference level that
    /// is (near) zero disables detection for that reading.
    pub fn update(&mut self, value: f64, reference: f64) -> (bool, f64) {
        let Some(last) = self.last_value.replace(value) else {
            return (false, 0.0);
        };

        let delta = (value - last).abs();
        if reference <= STDDEV_EPSILON {
            return (false, delta);
        }

        let is_spike = delta > self.max_delta_ratio * reference;
        if is_spike {
            self.spikes_detected += 1;
            log::trace!("spike: {} -> {} (delta {:.3})", last, value, delta);
        }
        (is_spike, delta)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn spikes_detected(&self) -> u64 {
        self.spikes_detected
    }

    pub fn reset(&mut self) {
        self.last_value = None;
        self.spikes_detected = 0;
    }
}
