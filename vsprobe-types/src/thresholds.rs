//! Warning/critical threshold pairs.

use core::fmt;

use crate::StatusLevel;

/// A warning/critical threshold pair for "higher is worse" metrics.
///
/// The pair is only constructible when `critical > warning`, so code that
/// holds a `ThresholdPair` never has to re-check the ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThresholdPair {
    warning: f64,
    critical: f64,
}

impl ThresholdPair {
    /// Create a threshold pair, rejecting `critical <= warning` and
    /// non-finite bounds.
    pub fn new(warning: f64, critical: f64) -> Result<Self, InvalidThresholds> {
        if !warning.is_finite() || !critical.is_finite() || critical <= warning {
            return Err(InvalidThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    /// Value at or above which an entity is in warning state.
    pub fn warning(&self) -> f64 {
        self.warning
    }

    /// Value at or above which an entity is in critical state.
    pub fn critical(&self) -> f64 {
        self.critical
    }

    /// Classify a value against the pair. Both bounds are inclusive.
    pub fn classify(&self, value: f64) -> StatusLevel {
        if value >= self.critical {
            StatusLevel::Critical
        } else if value >= self.warning {
            StatusLevel::Warning
        } else {
            StatusLevel::Ok
        }
    }
}

/// Returned when a threshold pair would violate `critical > warning`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl fmt::Display for InvalidThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning threshold ({}) must be lower than critical threshold ({})",
            self.warning, self.critical
        )
    }
}

impl std::error::Error for InvalidThresholds {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_pair() {
        assert!(ThresholdPair::new(95.0, 85.0).is_err());
        assert!(ThresholdPair::new(90.0, 90.0).is_err());
        assert!(ThresholdPair::new(f64::NAN, 90.0).is_err());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let t = ThresholdPair::new(85.0, 95.0).unwrap();
        assert_eq!(t.classify(95.0), StatusLevel::Critical);
        assert_eq!(t.classify(85.0), StatusLevel::Warning);
        assert_eq!(t.classify(84.0), StatusLevel::Ok);
        assert_eq!(t.classify(94.99), StatusLevel::Warning);
    }

    #[test]
    fn test_error_message() {
        let err = ThresholdPair::new(90.0, 80.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Warning threshold (90) must be lower than critical threshold (80)"
        );
    }
}
