//! # ALEC Stream - Online estimators for sensor streams
//!
//! Single-pass anomaly detectors and smoothing filters for IoT sensor data.
//! Every component consumes one reading at a time, runs in bounded memory
//! fixed at construction, and returns a well-defined result from the very
//! first sample (warm-up periods report "not anomalous").
//!
//! ## Components
//!
//! | Type | Purpose | Cost per update |
//! |------|---------|-----------------|
//! | [`ZScoreDetector`] | Global Z-score (Welford mean/variance) | O(1) |
//! | [`AdaptiveZScoreDetector`] | Z-score over a sliding window | O(1) |
//! | [`IqrDetector`] | Quartile fences over a sliding window | O(1) amortized + periodic sort |
//! | [`KalmanFilter1D`] | Static-process Kalman smoothing | O(1) |
//! | [`EmaFilter`] | Exponential moving average | O(1) |
//! | [`MovingAverage`] | Circular-buffer moving average | O(1) |
//! | [`AlertRateLimiter`] | At most N alerts per rolling window | O(N) worst case |
//! | [`SpikeDetector`] | Step changes between readings | O(1) |
//! | [`TumblingWindow`] | Aligned per-window min/max/avg/stddev | O(1) |
//!
//! Components never call each other: wiring a detector's flag into the rate
//! limiter, or a filter's output into [`ThresholdBands`], is up to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use alec_stream::{AlertRateLimiter, EmaFilter, ZScoreDetector};
//!
//! let mut filter = EmaFilter::new(0.2).unwrap();
//! let mut detector = ZScoreDetector::new(3.0, 10).unwrap();
//! let mut limiter = AlertRateLimiter::new(5, 60.0).unwrap();
//!
//! for (t, reading) in [21.0, 21.4, 20.8, 21.1, 21.3, 20.9, 21.2, 21.0, 20.7, 21.5, 35.0]
//!     .into_iter()
//!     .enumerate()
//! {
//!     let smoothed = filter.update(reading);
//!     let (is_anomaly, z) = detector.update(reading);
//!     if is_anomaly && limiter.allow(t as f64) {
//!         assert!(z > 3.0);
//!         assert!(smoothed < reading);
//!     }
//! }
//! assert_eq!(detector.anomalies_detected(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`zscore`], [`adaptive`], [`iqr`], [`spike`]: anomaly detectors
//! - [`kalman`], [`ema`], [`moving_average`]: smoothing filters
//! - [`rate_limiter`]: alert rate limiting
//! - [`tumbling`]: tumbling window aggregation
//! - [`threshold`]: absolute threshold bands
//! - [`config`]: serializable configuration for every component
//! - [`error`]: configuration errors

// Modules
pub mod adaptive;
pub mod config;
pub mod ema;
pub mod error;
pub mod iqr;
pub mod kalman;
pub mod moving_average;
pub mod rate_limiter;
pub mod spike;
pub mod threshold;
pub mod tumbling;
pub mod zscore;

// Re-exports for convenient access
pub use adaptive::AdaptiveZScoreDetector;
pub use config::{
    AdaptiveZScoreConfig, EmaConfig, IqrConfig, KalmanConfig, MovingAverageConfig,
    RateLimiterConfig, SpikeConfig, StreamConfig, TumblingConfig, ZScoreConfig,
};
pub use ema::EmaFilter;
pub use error::{Result, StreamError};
pub use iqr::{IqrBounds, IqrDetector};
pub use kalman::KalmanFilter1D;
pub use moving_average::MovingAverage;
pub use rate_limiter::AlertRateLimiter;
pub use spike::SpikeDetector;
pub use threshold::{AlertLevel, ThresholdBands};
pub use tumbling::{TumblingWindow, WindowStats};
pub use zscore::ZScoreDetector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Standard deviations below this are treated as a constant signal
pub const STDDEV_EPSILON: f64 = 1e-10;
