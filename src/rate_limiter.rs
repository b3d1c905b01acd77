// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Alert rate limiting
//!
//! Sliding-window limiter keeping the exact timestamps of admitted events:
//! at most `max_events` admissions in any rolling `window_seconds`, in
//! `O(max_events)` memory.
//!
//! An optional cooldown silences the limiter for a fixed period after the
//! window overflows.

use std::collections::VecDeque;

use crate::config::RateLimiterConfig;
use crate::error::Result;

/// Sliding-time-window rate limiter for alerts
#[derive(Debug, Clone)]
pub struct AlertRateLimiter {
    config: RateLimiterConfig,
    /// Admitted timestamps (seconds), oldest first
    timestamps: VecDeque<f64>,
    /// Denials until this instant, when cooldown is enabled
    cooldown_until: Option<f64>,
    suppressed_count: u64,
}

impl AlertRateLimiter {
    /// Create a limiter admitting `max_events` per `window_seconds`
    pub fn new(max_events: usize, window_seconds: f64) -> Result<Self> {
        Self::with_config(RateLimiterConfig {
            max_events,
            window_seconds,
            cooldown_seconds: 0.0,
        })
    }

    pub fn with_config(config: RateLimiterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            timestamps: VecDeque::with_capacity(config.max_events),
            config,
            cooldown_until: None,
            suppressed_count: 0,
        })
    }

    /// Enable a cooldown period entered whenever the window overflows
    pub fn with_cooldown(mut self, cooldown_seconds: f64) -> Result<Self> {
        self.config.cooldown_seconds = cooldown_seconds;
        self.config.validate()?;
        Ok(self)
    }

    /// Decide whether an event at `now` (seconds, monotonic) may be emitted
    ///
    /// Admitted events are recorded; denied ones only bump the suppressed
    /// counter.
    pub fn allow(&mut self, now: f64) -> bool {
        if self.in_cooldown(now) {
            self.suppressed_count += 1;
            return false;
        }
        self.cooldown_until = None;

        self.evict_expired(now);

        if self.timestamps.len() >= self.config.max_events {
            self.suppressed_count += 1;
            if self.config.cooldown_seconds > 0.0 {
                let until = now + self.config.cooldown_seconds;
                self.cooldown_until = Some(until);
                log::debug!("alert window full at t={}, cooling down until t={}", now, until);
            } else {
                log::debug!(
                    "alert suppressed at t={} ({} suppressed so far)",
                    now,
                    self.suppressed_count
                );
            }
            return false;
        }

        self.timestamps.push_back(now);
        true
    }

    fn evict_expired(&mut self, now: f64) {
        while let Some(&oldest) = self.timestamps.front() {
            if now - oldest > self.config.window_seconds {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// True while a cooldown started by an overflow is still running
    pub fn in_cooldown(&self, now: f64) -> bool {
        matches!(self.cooldown_until, Some(until) if now < until)
    }

    /// Events denied since construction or the last reset
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed_count
    }

    /// Admitted events currently inside the window
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.timestamps.clear();
        self.cooldown_until = None;
        self.suppressed_count = 0;
    }
}

impl Default for AlertRateLimiter {
    fn default() -> Self {
        let config = RateLimiterConfig::default();
        Self {
            timestamps: VecDeque::with_capacity(config.max_events),
            config,
            cooldown_until: None,
            suppressed_count: 0,
        }
    }
}
