// ALEC Stream - Online estimators for sensor streams
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for ALEC Stream
//!
//! Only construction can fail. Once a component exists, every `update`
//! returns a well-defined result.

use thiserror::Error;

/// Result type alias for ALEC Stream operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Main error type for ALEC Stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A floating-point parameter is outside its valid range
    #[error("Invalid parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// A window or capacity parameter is below its minimum
    #[error("Invalid parameter {name}: {value} (expected >= {min})")]
    WindowTooSmall {
        name: &'static str,
        value: usize,
        min: usize,
    },

    /// Serialized configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StreamError {
    /// Name of the offending parameter, if any
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } | Self::WindowTooSmall { name, .. } => Some(*name),
            Self::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Reject anything that is not strictly positive (NaN included)
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(reject(name, value, "> 0"));
    }
    Ok(())
}

/// Reject negative values and NaN
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(reject(name, value, ">= 0"));
    }
    Ok(())
}

pub(crate) fn require_min(name: &'static str, value: usize, min: usize) -> Result<()> {
    if value < min {
        log::debug!("rejected {} = {} (minimum {})", name, value, min);
        return Err(StreamError::WindowTooSmall { name, value, min });
    }
    Ok(())
}

pub(crate) fn reject(name: &'static str, value: f64, expected: &'static str) -> StreamError {
    log::debug!("rejected {} = {} (expected {})", name, value, expected);
    StreamError::InvalidParameter {
        name,
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamError::InvalidParameter {
            name: "alpha",
            value: 1.5,
            expected: "in (0, 1]",
        };
        let msg = format!("{}", err);
        assert!(msg.contains("alpha"));
        assert!(msg.contains("1.5"));
        assert!(msg.contains("(0, 1]"));
    }

    #[test]
    fn test_window_error_display() {
        let err = StreamError::WindowTooSmall {
            name: "window_size",
            value: 2,
            min: 4,
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter window_size: 2 (expected >= 4)"
        );
        assert_eq!(err.parameter(), Some("window_size"));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("threshold", 2.5).is_ok());
        assert!(require_positive("threshold", 0.0).is_err());
        assert!(require_positive("threshold", -1.0).is_err());
        assert!(require_positive("threshold", f64::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("process_noise", 0.0).is_ok());
        assert!(require_non_negative("process_noise", -0.1).is_err());
        assert!(require_non_negative("process_noise", f64::NAN).is_err());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: StreamError = parse.unwrap_err().into();
        assert!(matches!(err, StreamError::Config(_)));
        assert_eq!(err.parameter(), None);
    }
}
