// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Component configuration
//!
//! Every estimator has a serializable config struct whose `Default` matches
//! the values used on the reference sensor deployments. Components validate
//! their config on construction, so an invalid value is reported once, with
//! the parameter name and its valid range.

use crate::error::{reject, require_min, require_non_negative, require_positive, Result};
use crate::threshold::ThresholdBands;
use serde::{Deserialize, Serialize};

/// Master configuration bundling every component's settings
///
/// Missing sections fall back to their defaults when deserializing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub zscore: ZScoreConfig,
    pub adaptive: AdaptiveZScoreConfig,
    pub iqr: IqrConfig,
    pub kalman: KalmanConfig,
    pub ema: EmaConfig,
    pub moving_average: MovingAverageConfig,
    pub rate_limiter: RateLimiterConfig,
    pub spike: SpikeConfig,
    pub tumbling: TumblingConfig,
    pub bands: ThresholdBands,
}

impl StreamConfig {
    /// Parse from JSON and validate every section
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.zscore.validate()?;
        self.adaptive.validate()?;
        self.iqr.validate()?;
        self.kalman.validate()?;
        self.ema.validate()?;
        self.moving_average.validate()?;
        self.rate_limiter.validate()?;
        self.spike.validate()?;
        self.tumbling.validate()?;
        self.bands.validate()
    }
}

/// Global Z-score detector (Welford) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreConfig {
    /// Z-score above which a value is anomalous (typically 2.5 - 3.0)
    pub threshold: f64,
    /// Samples to absorb before any detection
    pub warmup_samples: usize,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            warmup_samples: 30,
        }
    }
}

impl ZScoreConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("threshold", self.threshold)?;
        require_min("warmup_samples", self.warmup_samples, 1)
    }
}

/// Sliding-window Z-score detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveZScoreConfig {
    pub window_size: usize,
    pub threshold: f64,
}

impl Default for AdaptiveZScoreConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            threshold: 2.5,
        }
    }
}

impl AdaptiveZScoreConfig {
    pub fn validate(&self) -> Result<()> {
        require_min("window_size", self.window_size, 4)?;
        require_positive("threshold", self.threshold)
    }
}

/// Interquartile-range detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrConfig {
    pub window_size: usize,
    /// IQR multiplier for the fences (1.5 standard, 3.0 extreme)
    pub k: f64,
}

impl Default for IqrConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            k: 1.5,
        }
    }
}

impl IqrConfig {
    pub fn validate(&self) -> Result<()> {
        require_min("window_size", self.window_size, 4)?;
        require_positive("k", self.k)
    }
}

/// 1-D Kalman filter noise model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalmanConfig {
    /// Process noise Q
    pub process_noise: f64,
    /// Measurement noise R
    pub measurement_noise: f64,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.01,
            measurement_noise: 0.1,
        }
    }
}

impl KalmanConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("process_noise", self.process_noise)?;
        require_non_negative("measurement_noise", self.measurement_noise)
    }
}

/// Exponential moving average settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaConfig {
    /// Smoothing factor in (0, 1]. Higher reacts faster.
    pub alpha: f64,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self { alpha: 0.2 }
    }
}

impl EmaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.alpha.is_nan() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(reject("alpha", self.alpha, "in (0, 1]"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    pub window_size: usize,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self { window_size: 10 }
    }
}

impl MovingAverageConfig {
    pub fn validate(&self) -> Result<()> {
        require_min("window_size", self.window_size, 1)
    }
}

/// Alert rate limiting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum admitted events per rolling window
    pub max_events: usize,
    /// Rolling window length in seconds
    pub window_seconds: f64,
    /// Quiet period entered after a denial (0 disables)
    #[serde(default)]
    pub cooldown_seconds: f64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_events: 5,
            window_seconds: 60.0,
            cooldown_seconds: 0.0,
        }
    }
}

impl RateLimiterConfig {
    pub fn validate(&self) -> Result<()> {
        require_min("max_events", self.max_events, 1)?;
        require_positive("window_seconds", self.window_seconds)?;
        require_non_negative("cooldown_seconds", self.cooldown_seconds)
    }
}

/// Step-change (spike) detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeConfig {
    /// Largest accepted jump as a fraction of the reference level
    pub max_delta_ratio: f64,
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self {
            max_delta_ratio: 0.3,
        }
    }
}

impl SpikeConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("max_delta_ratio", self.max_delta_ratio)
    }
}

/// Tumbling window aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TumblingConfig {
    pub window_ms: u64,
}

impl Default for TumblingConfig {
    fn default() -> Self {
        Self {
            window_ms: 300_000, // 5 minutes
        }
    }
}

impl TumblingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            log::debug!("rejected window_ms = 0 (minimum 1)");
            return Err(crate::StreamError::WindowTooSmall {
                name: "window_ms",
                value: 0,
                min: 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;

    #[test]
    fn test_default_config_is_valid() {
        let config = StreamConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zscore.warmup_samples, 30);
        assert_eq!(config.iqr.window_size, 100);
        assert_eq!(config.rate_limiter.max_events, 5);
    }

    #[test]
    fn test_config_serialization() {
        let config = StreamConfig::default();
        let json = config.to_json().unwrap();
        let parsed = StreamConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "ema": { "alpha": 0.5 }, "moving_average": { "window_size": 4 } }"#;
        let config = StreamConfig::from_json(json).unwrap();
        assert_eq!(config.ema.alpha, 0.5);
        assert_eq!(config.moving_average.window_size, 4);
        assert_eq!(config.kalman, KalmanConfig::default());
    }

    #[test]
    fn test_invalid_json_section_rejected() {
        let json = r#"{ "ema": { "alpha": 1.5 } }"#;
        let err = StreamConfig::from_json(json).unwrap_err();
        assert_eq!(err.parameter(), Some("alpha"));
    }

    #[test]
    fn test_malformed_json() {
        let err = StreamConfig::from_json("{ zscore: ").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn test_ema_alpha_range() {
        assert!(EmaConfig { alpha: 1.0 }.validate().is_ok());
        assert!(EmaConfig { alpha: 0.0 }.validate().is_err());
        assert!(EmaConfig { alpha: -0.2 }.validate().is_err());
        assert!(EmaConfig { alpha: 1.01 }.validate().is_err());
        assert!(EmaConfig { alpha: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_window_minimums() {
        let adaptive = AdaptiveZScoreConfig {
            window_size: 3,
            ..Default::default()
        };
        assert!(matches!(
            adaptive.validate(),
            Err(StreamError::WindowTooSmall { min: 4, .. })
        ));

        let iqr = IqrConfig {
            window_size: 4,
            k: 1.5,
        };
        assert!(iqr.validate().is_ok());

        assert!(MovingAverageConfig { window_size: 0 }.validate().is_err());
        assert!(TumblingConfig { window_ms: 0 }.validate().is_err());
    }

    #[test]
    fn test_rate_limiter_cooldown_optional_in_json() {
        let json = r#"{ "max_events": 3, "window_seconds": 10.0 }"#;
        let config: RateLimiterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cooldown_seconds, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kalman_zero_noise_allowed() {
        let config = KalmanConfig {
            process_noise: 0.0,
            measurement_noise: 0.0,
        };
        assert!(config.validate().is_ok());
        let bad = KalmanConfig {
            process_noise: -1.0,
            ..Default::default()
        };
        assert_eq!(bad.validate().unwrap_err().parameter(), Some("process_noise"));
    }
}
