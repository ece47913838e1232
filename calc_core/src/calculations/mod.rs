//! # Calculators
//!
//! Each calculator follows the pattern:
//!
//! - `*Input` - Input record in base English units (JSON-serializable)
//! - `*Output` / `*Result` - Output record (JSON-serializable)
//! - `validate(input) -> Validation` - Every precondition, no short-circuit
//! - `calculate(input) -> *Output` - Pure closed-form formulas
//!
//! ## Available Calculations
//!
//! - [`beam`] - Simply supported beam with a single point load
//! - [`bolt_shear`] - Bolt shear at a lifting support (two bolt groups)
//! - [`gasket`] - Gasket stress and stud torque (Reeves method)

pub mod beam;
pub mod bolt_shear;
pub mod gasket;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use beam::{BeamInput, BeamOutput};
pub use bolt_shear::{BoltGroupResult, BoltGroupSpec, BoltShearInput, BoltShearOutput};
pub use gasket::{ConnectionId, GasketCalcParams, GasketRowInput, GasketRowResult, RowOutcome};

/// Utilization below this percentage is OK
pub const WARN_THRESHOLD_PERCENT: f64 = 80.0;

/// Utilization above this percentage fails
pub const FAIL_THRESHOLD_PERCENT: f64 = 100.0;

/// Pass/warn/fail classification of a utilization percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UtilizationStatus {
    Ok,
    Warn,
    Fail,
}

impl UtilizationStatus {
    /// Classify a utilization percentage.
    ///
    /// `< 80` is OK, `80..=100` is WARN, anything above 100 or non-finite is FAIL.
    ///
    /// ```rust
    /// use calc_core::calculations::UtilizationStatus;
    ///
    /// assert_eq!(UtilizationStatus::from_utilization(79.999), UtilizationStatus::Ok);
    /// assert_eq!(UtilizationStatus::from_utilization(100.0), UtilizationStatus::Warn);
    /// assert_eq!(UtilizationStatus::from_utilization(f64::NAN), UtilizationStatus::Fail);
    /// ```
    pub fn from_utilization(percent: f64) -> Self {
        if !percent.is_finite() {
            UtilizationStatus::Fail
        } else if percent < WARN_THRESHOLD_PERCENT {
            UtilizationStatus::Ok
        } else if percent <= FAIL_THRESHOLD_PERCENT {
            UtilizationStatus::Warn
        } else {
            UtilizationStatus::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UtilizationStatus::Ok => "OK",
            UtilizationStatus::Warn => "WARN",
            UtilizationStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for UtilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(UtilizationStatus::from_utilization(0.0), UtilizationStatus::Ok);
        assert_eq!(UtilizationStatus::from_utilization(79.999), UtilizationStatus::Ok);
        assert_eq!(UtilizationStatus::from_utilization(80.0), UtilizationStatus::Warn);
        assert_eq!(UtilizationStatus::from_utilization(100.0), UtilizationStatus::Warn);
        assert_eq!(UtilizationStatus::from_utilization(100.001), UtilizationStatus::Fail);
    }

    #[test]
    fn test_non_finite_fails() {
        assert_eq!(UtilizationStatus::from_utilization(f64::NAN), UtilizationStatus::Fail);
        assert_eq!(UtilizationStatus::from_utilization(f64::INFINITY), UtilizationStatus::Fail);
        assert_eq!(UtilizationStatus::from_utilization(f64::NEG_INFINITY), UtilizationStatus::Fail);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&UtilizationStatus::Warn).unwrap(), "\"WARN\"");
        let s: UtilizationStatus = serde_json::from_str("\"FAIL\"").unwrap();
        assert_eq!(s, UtilizationStatus::Fail);
        assert_eq!(UtilizationStatus::Ok.to_string(), "OK");
    }
}
