// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Absolute threshold bands and alert levels

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{reject, Result};

/// Alert level for a filtered reading
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AlertLevel {
    #[default]
    None,
    Warning,
    Critical,
    /// Statistical anomaly inside the critical band
    Anomaly,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Anomaly => "ANOMALY",
        }
    }

    pub fn is_alert(&self) -> bool {
        *self != Self::None
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comfort and critical bands, nested:
/// `critical_low <= comfort_low <= comfort_high <= critical_high`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBands {
    pub comfort_low: f64,
    pub comfort_high: f64,
    pub critical_low: f64,
    pub critical_high: f64,
}

impl Default for ThresholdBands {
    /// Indoor temperature bands (°C)
    fn default() -> Self {
        Self {
            comfort_low: 18.0,
            comfort_high: 26.0,
            critical_low: 15.0,
            critical_high: 30.0,
        }
    }
}

impl ThresholdBands {
    pub fn new(
        comfort_low: f64,
        comfort_high: f64,
        critical_low: f64,
        critical_high: f64,
    ) -> Result<Self> {
        let bands = Self {
            comfort_low,
            comfort_high,
            critical_low,
            critical_high,
        };
        bands.validate()?;
        Ok(bands)
    }

    pub fn validate(&self) -> Result<()> {
        if self.critical_low.is_nan() {
            return Err(reject("critical_low", self.critical_low, "a number"));
        }
        if self.comfort_low.is_nan() || self.comfort_low < self.critical_low {
            return Err(reject("comfort_low", self.comfort_low, ">= critical_low"));
        }
        if self.comfort_high.is_nan() || self.comfort_high < self.comfort_low {
            return Err(reject("comfort_high", self.comfort_high, ">= comfort_low"));
        }
        if self.critical_high.is_nan() || self.critical_high < self.comfort_high {
            return Err(reject("critical_high", self.critical_high, ">= comfort_high"));
        }
        Ok(())
    }

    /// Classify a reading. Critical bands win over the anomaly flag, which
    /// wins over the comfort band.
    pub fn classify(&self, value: f64, is_anomaly: bool) -> AlertLevel {
        if value < self.critical_low || value > self.critical_high {
            AlertLevel::Critical
        } else if is_anomaly {
            AlertLevel::Anomaly
        } else if value < self.comfort_low || value > self.comfort_high {
            AlertLevel::Warning
        } else {
            AlertLevel::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let bands = ThresholdBands::default();
        assert_eq!(bands.classify(22.0, false), AlertLevel::None);
        assert_eq!(bands.classify(27.0, false), AlertLevel::Warning);
        assert_eq!(bands.classify(17.0, false), AlertLevel::Warning);
        assert_eq!(bands.classify(22.0, true), AlertLevel::Anomaly);
        assert_eq!(bands.classify(27.0, true), AlertLevel::Anomaly);
        assert_eq!(bands.classify(31.0, true), AlertLevel::Critical);
        assert_eq!(bands.classify(14.9, false), AlertLevel::Critical);
    }

    #[test]
    fn test_band_edges_inclusive() {
        let bands = ThresholdBands::default();
        assert_eq!(bands.classify(18.0, false), AlertLevel::None);
        assert_eq!(bands.classify(30.0, false), AlertLevel::Warning);
    }

    #[test]
    fn test_validation() {
        assert!(ThresholdBands::new(18.0, 26.0, 15.0, 30.0).is_ok());
        assert!(ThresholdBands::new(14.0, 26.0, 15.0, 30.0).is_err());
        assert!(ThresholdBands::new(27.0, 26.0, 15.0, 30.0).is_err());
        let err = ThresholdBands::new(18.0, 26.0, 15.0, 25.0).unwrap_err();
        assert_eq!(err.parameter(), Some("critical_high"));
    }

    #[test]
    fn test_alert_level_display() {
        assert_eq!(AlertLevel::None.to_string(), "OK");
        assert_eq!(AlertLevel::Critical.to_string(), "CRITICAL");
        assert!(AlertLevel::Anomaly.is_alert());
        assert!(!AlertLevel::None.is_alert());
    }
}
