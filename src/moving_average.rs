// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Simple moving average over a circular buffer

use crate::config::MovingAverageConfig;
use crate::error::Result;

/// Moving average with O(1) update and fixed memory
#[derive(Debug, Clone)]
pub struct MovingAverage {
    buffer: Box<[f64]>,
    head: usize,
    count: usize,
    sum: f64,
}

impl MovingAverage {
    pub fn new(window_size: usize) -> Result<Self> {
        Self::with_config(MovingAverageConfig { window_size })
    }

    pub fn with_config(config: MovingAverageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buffer: vec![0.0; config.window_size].into_boxed_slice(),
            head: 0,
            count: 0,
            sum: 0.0,
        })
    }

    /// Add `value` and return the average of the valid slots
    pub fn update(&mut self, value: f64) -> f64 {
        if self.is_full() {
            self.sum -= self.buffer[self.head];
        } else {
            self.count += 1;
        }

        self.buffer[self.head] = value;
        self.sum += value;
        self.head = (self.head + 1) % self.buffer.len();

        self.sum / self.count as f64
    }

    /// Current average, None before the first update
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    pub fn window_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.buffer.len()
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
        self.count = 0;
        self.sum = 0.0;
    }
}
