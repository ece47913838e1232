//! # Input Validation Reports
//!
//! Every calculator has a `validate` function that runs all of its checks
//! (no short-circuit) and returns a [`Validation`]: pass/fail plus the
//! human-readable reasons, in check order. Validation never errors; the
//! caller decides whether to calculate.

use serde::{Deserialize, Serialize};

/// Outcome of a precondition check.
///
/// ## JSON Example
///
/// ```json
/// { "ok": false, "errors": ["X must be > 0", "D must be > 0"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validation {
    /// True when `errors` is empty
    pub ok: bool,
    /// Violated rules, in the order they were checked
    pub errors: Vec<String>,
}

impl Validation {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Validation {
            ok: errors.is_empty(),
            errors,
        }
    }

    pub fn passed() -> Self {
        Validation::from_errors(Vec::new())
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

/// Collects messages for failed checks.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<String>,
}

impl Checks {
    /// Record `message` unless `condition` holds.
    pub(crate) fn require(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.errors.push(message.into());
        }
    }

    pub(crate) fn finish(self) -> Validation {
        Validation::from_errors(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_keep_order() {
        let mut checks = Checks::default();
        checks.require(false, "first");
        checks.require(true, "skipped");
        checks.require(false, "second");
        let v = checks.finish();
        assert!(!v.ok);
        assert_eq!(v.errors, vec!["first", "second"]);
    }

    #[test]
    fn test_passed() {
        let v = Validation::passed();
        assert!(v.is_ok());
        assert!(v.errors.is_empty());
    }

    #[test]
    fn test_serialization() {
        let v = Validation::from_errors(vec!["X must be > 0".to_string()]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"ok":false,"errors":["X must be > 0"]}"#);
    }
}
