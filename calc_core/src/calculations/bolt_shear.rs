//! # Bolt Shear at a Lifting Support
//!
//! An inclined load `F` at angle θ is resolved into a vertical component
//! `Fv = F·cos θ` and an axial component `Fa = F·sin θ`. The vertical component
//! is split between the tie-in (TLR) bolt group and the support bolt group by
//! the lever ratio of the two arms `X` and `D`:
//!
//! - `R_tlr = Fv · X / D`
//! - `R_support = Fv − R_tlr`
//!
//! `R_support` is signed; a negative value means the support reaction reverses
//! direction and is reported as such.
//!
//! Each group is then checked in shear, using the tensile stress area as a
//! simplified (conservative) shear area and an allowable of
//! `0.5 · Sy / SF`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bolt_shear::{calculate, validate, BoltShearInput};
//!
//! let input = BoltShearInput {
//!     applied_force_lbf: 20_000.0,
//!     x_ft: 10.0,
//!     d_ft: 5.0,
//!     ..BoltShearInput::default()
//! };
//!
//! assert!(validate(&input).ok);
//! let out = calculate(&input);
//! assert_eq!(out.tlr.reaction_lbf, 40_000.0);
//! assert_eq!(out.support.reaction_lbf, -20_000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::UtilizationStatus;
use crate::materials;
use crate::units::{Ksi, Psi};
use crate::validation::{Checks, Validation};

/// Fraction of yield used as the shear allowable before the safety factor
pub const SHEAR_YIELD_RATIO: f64 = 0.5;

/// Default safety factor for a fresh input
pub const DEFAULT_SAFETY_FACTOR: f64 = 2.0;

/// One bolt group, referencing the reference tables by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltGroupSpec {
    /// Group name used in validation messages (e.g., "Support")
    pub name: String,
    /// Key into the bolt size table
    pub bolt_key: String,
    /// Key into the material table
    pub material_key: String,
    /// Number of bolts sharing the reaction
    pub bolt_count: u32,
}

impl BoltGroupSpec {
    pub fn new(
        name: impl Into<String>,
        bolt_key: impl Into<String>,
        material_key: impl Into<String>,
        bolt_count: u32,
    ) -> Self {
        BoltGroupSpec {
            name: name.into(),
            bolt_key: bolt_key.into(),
            material_key: material_key.into(),
            bolt_count,
        }
    }

    fn check(&self, checks: &mut Checks) {
        checks.require(self.bolt_count > 0, format!("{}: bolt count must be > 0", self.name));
        checks.require(
            materials::bolt_size(&self.bolt_key).is_some(),
            format!("{}: unknown bolt size", self.name),
        );
        checks.require(
            materials::material(&self.material_key).is_some(),
            format!("{}: unknown material", self.name),
        );
    }
}

/// Input parameters for the bolt shear calculator (base units: lbf, ft).
///
/// ## JSON Example
///
/// ```json
/// {
///   "applied_force_lbf": 20000.0,
///   "load_angle_deg": 0.0,
///   "x_ft": 10.0,
///   "d_ft": 5.0,
///   "safety_factor": 2.0,
///   "support": { "name": "Support", "bolt_key": "1\"-8UN", "material_key": "SA-193-B16", "bolt_count": 2 },
///   "tlr": { "name": "TLR Tie-in", "bolt_key": "1-1/8\"-8UN", "material_key": "SA-193-B16", "bolt_count": 2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltShearInput {
    /// Applied load F (lbf)
    pub applied_force_lbf: f64,

    /// Beam angle from horizontal θ (degrees)
    pub load_angle_deg: f64,

    /// Lever arm X (ft)
    pub x_ft: f64,

    /// Lever arm D (ft)
    pub d_ft: f64,

    /// Safety factor on the shear allowable
    pub safety_factor: f64,

    /// Primary support bolt group
    pub support: BoltGroupSpec,

    /// Tie-in (TLR) bolt group
    pub tlr: BoltGroupSpec,
}

impl Default for BoltShearInput {
    fn default() -> Self {
        BoltShearInput {
            applied_force_lbf: 0.0,
            load_angle_deg: 0.0,
            x_ft: 0.0,
            d_ft: 0.0,
            safety_factor: DEFAULT_SAFETY_FACTOR,
            support: BoltGroupSpec::new("Support", "1\"-8UN", "SA-193-B16", 2),
            tlr: BoltGroupSpec::new("TLR Tie-in", "1-1/8\"-8UN", "SA-193-B16", 2),
        }
    }
}

/// Shear check of one bolt group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltGroupResult {
    /// Signed group reaction (lbf)
    pub reaction_lbf: f64,
    /// |reaction| (lbf)
    pub reaction_abs_lbf: f64,
    /// Shear carried by each bolt (lbf)
    pub per_bolt_shear_lbf: f64,
    /// Per-bolt shear over tensile stress area (psi)
    pub shear_stress_psi: f64,
    /// 0.5·Sy/SF (psi)
    pub allowable_shear_psi: f64,
    /// Shear stress / allowable × 100
    pub utilization_percent: f64,
    pub status: UtilizationStatus,
}

/// Results from the bolt shear calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltShearOutput {
    /// Vertical component Fv (lbf)
    pub vertical_force_lbf: f64,
    /// Axial component Fa (lbf)
    pub axial_force_lbf: f64,
    /// X − D (ft)
    pub x_minus_d_ft: f64,
    pub support: BoltGroupResult,
    pub tlr: BoltGroupResult,
}

impl BoltShearOutput {
    /// The worse of the two group classifications
    pub fn governing_status(&self) -> UtilizationStatus {
        match (self.support.status, self.tlr.status) {
            (UtilizationStatus::Fail, _) | (_, UtilizationStatus::Fail) => UtilizationStatus::Fail,
            (UtilizationStatus::Warn, _) | (_, UtilizationStatus::Warn) => UtilizationStatus::Warn,
            _ => UtilizationStatus::Ok,
        }
    }
}

/// Check every precondition of [`calculate`].
///
/// All rules are evaluated; the X > D rule is only reported when both arms
/// are individually positive.
pub fn validate(input: &BoltShearInput) -> Validation {
    let mut checks = Checks::default();
    checks.require(input.applied_force_lbf > 0.0, "Applied load F must be > 0");
    checks.require(input.x_ft > 0.0, "X must be > 0");
    checks.require(input.d_ft > 0.0, "D must be > 0");
    if input.x_ft > 0.0 && input.d_ft > 0.0 {
        checks.require(input.x_ft > input.d_ft, "X must be > D (so X − D is positive)");
    }
    checks.require(input.safety_factor > 0.0, "Safety factor must be > 0");
    input.support.check(&mut checks);
    input.tlr.check(&mut checks);
    checks.finish()
}

fn solve_group(reaction_lbf: f64, group: &BoltGroupSpec, safety_factor: f64) -> BoltGroupResult {
    // Unresolved keys propagate as NaN and classify as FAIL
    let tensile_area_in2 = match materials::bolt_size(&group.bolt_key) {
        Some(bolt) => bolt.tensile_area_in2,
        None => {
            warn!(group = %group.name, key = %group.bolt_key, "unknown bolt size at calculation time");
            f64::NAN
        }
    };
    let yield_strength_ksi = match materials::material(&group.material_key) {
        Some(mat) => mat.yield_strength_ksi,
        None => {
            warn!(group = %group.name, key = %group.material_key, "unknown material at calculation time");
            f64::NAN
        }
    };

    let reaction_abs_lbf = reaction_lbf.abs();
    let per_bolt_shear_lbf = reaction_abs_lbf / f64::from(group.bolt_count);
    let shear_stress_psi = per_bolt_shear_lbf / tensile_area_in2;
    let allowable_shear_psi = (Psi::from(Ksi(yield_strength_ksi)) * SHEAR_YIELD_RATIO / safety_factor).value();
    let utilization_percent = shear_stress_psi / allowable_shear_psi * 100.0;

    BoltGroupResult {
        reaction_lbf,
        reaction_abs_lbf,
        per_bolt_shear_lbf,
        shear_stress_psi,
        allowable_shear_psi,
        utilization_percent,
        status: UtilizationStatus::from_utilization(utilization_percent),
    }
}

/// Resolve the load, split it by lever ratio, and check both bolt groups.
///
/// Call after [`validate`] passes. This function never panics: a zero bolt
/// count or unresolved key produces a non-finite utilization and a `FAIL`
/// status for that group.
pub fn calculate(input: &BoltShearInput) -> BoltShearOutput {
    let theta = input.load_angle_deg.to_radians();
    let vertical_force_lbf = input.applied_force_lbf * theta.cos();
    let axial_force_lbf = input.applied_force_lbf * theta.sin();

    let x_minus_d_ft = input.x_ft - input.d_ft;

    let tlr_reaction = vertical_force_lbf * (input.x_ft / input.d_ft);
    let support_reaction = vertical_force_lbf - tlr_reaction;

    let support = solve_group(support_reaction, &input.support, input.safety_factor);
    let tlr = solve_group(tlr_reaction, &input.tlr, input.safety_factor);

    debug!(
        vertical_force_lbf,
        axial_force_lbf,
        support_reaction,
        tlr_reaction,
        support_status = %support.status,
        tlr_status = %tlr.status,
        "bolt shear calculated"
    );

    BoltShearOutput {
        vertical_force_lbf,
        axial_force_lbf,
        x_minus_d_ft,
        support,
        tlr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input() -> BoltShearInput {
        BoltShearInput {
            applied_force_lbf: 20_000.0,
            load_angle_deg: 0.0,
            x_ft: 10.0,
            d_ft: 5.0,
            ..BoltShearInput::default()
        }
    }

    #[test]
    fn test_worked_example() {
        let out = calculate(&test_input());

        assert_relative_eq!(out.vertical_force_lbf, 20_000.0);
        assert_eq!(out.axial_force_lbf, 0.0);
        assert_relative_eq!(out.x_minus_d_ft, 5.0);
        assert_relative_eq!(out.tlr.reaction_lbf, 40_000.0);
        assert_relative_eq!(out.support.reaction_lbf, -20_000.0);
        assert_relative_eq!(out.support.reaction_abs_lbf, 20_000.0);
    }

    #[test]
    fn test_group_stresses() {
        let out = calculate(&test_input());

        // Support: 20000 / 2 bolts / 0.606 in²
        assert_relative_eq!(out.support.per_bolt_shear_lbf, 10_000.0);
        assert_relative_eq!(out.support.shear_stress_psi, 10_000.0 / 0.606, max_relative = 1e-12);
        // 0.5 × 105 ksi / 2
        assert_relative_eq!(out.support.allowable_shear_psi, 26_250.0);
        assert_relative_eq!(
            out.support.utilization_percent,
            10_000.0 / 0.606 / 26_250.0 * 100.0,
            max_relative = 1e-12
        );
        assert_eq!(out.support.status, UtilizationStatus::Ok);

        // TLR: 40000 / 2 bolts / 0.790 in² = 25316 psi → 96.4%
        assert_relative_eq!(out.tlr.shear_stress_psi, 20_000.0 / 0.790, max_relative = 1e-12);
        assert_eq!(out.tlr.status, UtilizationStatus::Warn);
        assert_eq!(out.governing_status(), UtilizationStatus::Warn);
    }

    #[test]
    fn test_split_sums_to_vertical_load() {
        for (x, d) in [(10.0, 5.0), (3.0, 2.9), (100.0, 0.5), (7.5, 1.25)] {
            for angle in [0.0, 15.0, 45.0, 80.0] {
                let input = BoltShearInput {
                    x_ft: x,
                    d_ft: d,
                    load_angle_deg: angle,
                    ..test_input()
                };
                let out = calculate(&input);
                assert_relative_eq!(
                    out.support.reaction_lbf + out.tlr.reaction_lbf,
                    out.vertical_force_lbf,
                    epsilon = 1e-9,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_inclined_load_components() {
        let out = calculate(&BoltShearInput { load_angle_deg: 30.0, ..test_input() });
        assert_relative_eq!(out.vertical_force_lbf, 20_000.0 * 30f64.to_radians().cos());
        assert_relative_eq!(out.axial_force_lbf, 10_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_bolt_count_fails_without_panic() {
        let mut input = test_input();
        input.support.bolt_count = 0;
        let out = calculate(&input);
        assert!(!out.support.utilization_percent.is_finite());
        assert_eq!(out.support.status, UtilizationStatus::Fail);
        assert_eq!(out.governing_status(), UtilizationStatus::Fail);
    }

    #[test]
    fn test_unknown_key_fails_without_panic() {
        let mut input = test_input();
        input.tlr.bolt_key = "2\"-4UNC".to_string();
        let out = calculate(&input);
        assert!(out.tlr.utilization_percent.is_nan());
        assert_eq!(out.tlr.status, UtilizationStatus::Fail);
    }

    #[test]
    fn test_validate_passes() {
        let v = validate(&test_input());
        assert!(v.ok, "{:?}", v.errors);
    }

    #[test]
    fn test_validate_default_input() {
        // Default groups resolve; only the zeroed scalars fail
        let v = validate(&BoltShearInput::default());
        assert!(!v.ok);
        assert_eq!(
            v.errors,
            vec!["Applied load F must be > 0", "X must be > 0", "D must be > 0"]
        );
    }

    #[test]
    fn test_validate_all_zero() {
        let blank = BoltGroupSpec::new("Support", "", "", 0);
        let input = BoltShearInput {
            applied_force_lbf: 0.0,
            load_angle_deg: 0.0,
            x_ft: 0.0,
            d_ft: 0.0,
            safety_factor: 0.0,
            support: blank.clone(),
            tlr: BoltGroupSpec { name: "TLR Tie-in".to_string(), ..blank },
        };
        let v = validate(&input);
        assert!(!v.ok);
        assert_eq!(
            v.errors,
            vec![
                "Applied load F must be > 0",
                "X must be > 0",
                "D must be > 0",
                "Safety factor must be > 0",
                "Support: bolt count must be > 0",
                "Support: unknown bolt size",
                "Support: unknown material",
                "TLR Tie-in: bolt count must be > 0",
                "TLR Tie-in: unknown bolt size",
                "TLR Tie-in: unknown material",
            ]
        );
        assert!(!v.errors.iter().any(|e| e.starts_with("X must be > D")));
    }

    #[test]
    fn test_validate_equal_arms() {
        let v = validate(&BoltShearInput { x_ft: 5.0, d_ft: 5.0, ..test_input() });
        assert_eq!(v.errors, vec!["X must be > D (so X − D is positive)"]);
    }

    #[test]
    fn test_validate_reports_every_failure() {
        let mut input = BoltShearInput { x_ft: 2.0, d_ft: 3.0, safety_factor: -1.0, ..test_input() };
        input.tlr.material_key = "A36".to_string();
        let v = validate(&input);
        assert_eq!(
            v.errors,
            vec![
                "X must be > D (so X − D is positive)",
                "Safety factor must be > 0",
                "TLR Tie-in: unknown material",
            ]
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let out = calculate(&test_input());
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"status\":\"WARN\""));
        let roundtrip: BoltShearOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.tlr.status, UtilizationStatus::Warn);
        assert_relative_eq!(roundtrip.support.reaction_lbf, -20_000.0);
        assert_relative_eq!(
            roundtrip.tlr.utilization_percent,
            out.tlr.utilization_percent,
            max_relative = 1e-12
        );
    }
}
