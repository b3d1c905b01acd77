// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Tumbling (non-overlapping) time window aggregation
//!
//! Windows are aligned on multiples of `window_ms`. A window is emitted when
//! the first sample belonging to a later window arrives.

use serde::{Deserialize, Serialize};

use crate::config::TumblingConfig;
use crate::error::Result;

/// Summary of one closed window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub window_start: u64,
    pub window_end: u64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (0 for a single sample)
    pub stddev: f64,
    pub sample_count: u64,
}

/// Aggregates samples into consecutive fixed-length windows
#[derive(Debug, Clone)]
pub struct TumblingWindow {
    window_ms: u64,
    window_start: Option<u64>,
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
    windows_completed: u64,
}

impl TumblingWindow {
    pub fn new(window_ms: u64) -> Result<Self> {
        Self::with_config(TumblingConfig { window_ms })
    }

    pub fn with_config(config: TumblingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            window_ms: config.window_ms,
            window_start: None,
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
            windows_completed: 0,
        })
    }

    /// Add a sample; returns the previous window's stats if it just closed
    pub fn add(&mut self, value: f64, timestamp_ms: u64) -> Option<WindowStats> {
        let aligned = timestamp_ms - timestamp_ms % self.window_ms;

        let closed = match self.window_start {
            None => {
                self.window_start = Some(aligned);
                None
            }
            Some(start) if timestamp_ms >= start.saturating_add(self.window_ms) => {
                let stats = self.close();
                self.window_start = Some(aligned);
                stats
            }
            Some(_) => None,
        };

        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);

        closed
    }

    /// Close the current window early, e.g. at end of stream
    pub fn flush(&mut self) -> Option<WindowStats> {
        let stats = self.close();
        self.window_start = None;
        stats
    }

    fn close(&mut self) -> Option<WindowStats> {
        let start = self.window_start?;
        if self.count == 0 {
            return None;
        }

        let stats = WindowStats {
            window_start: start,
            window_end: start.saturating_add(self.window_ms),
            avg: self.sum / self.count as f64,
            min: self.min,
            max: self.max,
            stddev: if self.count > 1 {
                (self.m2 / self.count as f64).sqrt()
            } else {
                0.0
            },
            sample_count: self.count,
        };

        self.windows_completed += 1;
        log::debug!(
            "window [{}, {}) closed: {} samples, avg {:.3}",
            stats.window_start,
            stats.window_end,
            stats.sample_count,
            stats.avg
        );

        self.clear_accumulators();
        Some(stats)
    }

    fn clear_accumulators(&mut self) {
        self.count = 0;
        self.sum = 0.0;
        self.min = f64::INFINITY;
        self.max = f64::NEG_INFINITY;
        self.mean = 0.0;
        self.m2 = 0.0;
    }

    /// Start of the window currently accumulating
    pub fn window_start(&self) -> Option<u64> {
        self.window_start
    }

    /// Samples in the open window
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn windows_completed(&self) -> u64 {
        self.windows_completed
    }

    pub fn reset(&mut self) {
        self.clear_accumulators();
        self.window_start = None;
        self.windows_completed = 0;
    }
}
