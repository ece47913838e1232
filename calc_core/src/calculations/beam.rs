//! # Simply Supported Beam, Single Point Load
//!
//! Statics, bending stress and deflection for a simply supported beam of span
//! `L` carrying one point load `F` at distance `a` from the left support
//! (`b = L − a`). The load is applied through a lever of radius `R`, which
//! also produces a torque at the lock ring.
//!
//! ## Formulas
//!
//! - Torque: `T = F·R/12` (ft·lbf)
//! - Reactions: `RA = F·b/L`, `RB = F·a/L`
//! - Max moment (under the load): `M = F·a·b/L` (in·lbf)
//! - Bending stress: `σ = M/S`
//! - Utilization: `σ/Fb_allow × 100`
//! - Deflection at the load: `δ = F·a·b·(L² − a² − b²) / (6·E·I·L)`
//!
//! ## Degenerate inputs
//!
//! [`calculate`] never fails. A non-positive span, section modulus, inertia,
//! modulus or allowable stress is replaced by [`EPSILON`] before dividing, so
//! unvalidated input yields huge but finite numbers. Run [`validate`] first.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::beam::{calculate, validate, BeamInput};
//!
//! let input = BeamInput {
//!     lever_radius_in: 6.0,
//!     support_span_in: 40.0,
//!     load_position_in: 20.0,
//!     applied_force_lbf: 10_000.0,
//!     elastic_modulus_psi: 29_000_000.0,
//!     section_modulus_in3: 50.0,
//!     moment_of_inertia_in4: 400.0,
//!     allowable_bending_stress_psi: 20_000.0,
//! };
//!
//! assert!(validate(&input).ok);
//! let out = calculate(&input);
//! assert_eq!(out.torque_ftlbf, 5000.0);
//! assert_eq!(out.bending_stress_psi, 2000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::UtilizationStatus;
use crate::units::{FtLbf, InLbf};
use crate::validation::{Checks, Validation};

/// Stand-in for a non-positive denominator input
pub const EPSILON: f64 = 1e-9;

/// Input parameters for the beam calculator (base units: in, lbf, psi).
///
/// ## JSON Example
///
/// ```json
/// {
///   "lever_radius_in": 6.0,
///   "support_span_in": 40.0,
///   "load_position_in": 20.0,
///   "applied_force_lbf": 10000.0,
///   "elastic_modulus_psi": 29000000.0,
///   "section_modulus_in3": 50.0,
///   "moment_of_inertia_in4": 400.0,
///   "allowable_bending_stress_psi": 20000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamInput {
    /// Lever radius R, center to load point (in)
    pub lever_radius_in: f64,

    /// Support span L, left to right support (in)
    pub support_span_in: f64,

    /// Load position a, measured from the left support (in)
    pub load_position_in: f64,

    /// Applied force F (lbf)
    pub applied_force_lbf: f64,

    /// Young's modulus E (psi)
    pub elastic_modulus_psi: f64,

    /// Section modulus S (in³)
    pub section_modulus_in3: f64,

    /// Moment of inertia I (in⁴)
    pub moment_of_inertia_in4: f64,

    /// Allowable bending stress (psi)
    pub allowable_bending_stress_psi: f64,
}

/// Results from the beam calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamOutput {
    /// Torque at the lock ring (ft·lbf)
    pub torque_ftlbf: f64,

    /// Left support reaction RA (lbf)
    pub reaction_a_lbf: f64,

    /// Right support reaction RB (lbf)
    pub reaction_b_lbf: f64,

    /// Maximum moment, under the load (ft·lbf)
    pub max_moment_ftlbf: f64,

    /// Bending stress σ = M/S (psi)
    pub bending_stress_psi: f64,

    /// σ / allowable × 100
    pub utilization_percent: f64,

    /// Deflection at the load point (in)
    pub deflection_in: f64,
}

impl BeamOutput {
    pub fn status(&self) -> UtilizationStatus {
        UtilizationStatus::from_utilization(self.utilization_percent)
    }

    /// Maximum moment in in·lbf
    pub fn max_moment_inlbf(&self) -> f64 {
        InLbf::from(FtLbf(self.max_moment_ftlbf)).value()
    }
}

fn positive_or_epsilon(field: &str, value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        warn!(field, value, "non-positive beam input replaced by epsilon");
        EPSILON
    }
}

/// Check every precondition of [`calculate`].
pub fn validate(input: &BeamInput) -> Validation {
    let mut checks = Checks::default();
    checks.require(input.lever_radius_in > 0.0, "Lever radius R must be > 0");
    checks.require(input.support_span_in > 0.0, "Support span L must be > 0");
    checks.require(input.load_position_in >= 0.0, "Load position a must be >= 0");
    checks.require(
        input.load_position_in <= input.support_span_in,
        "Load position a must be <= support span L",
    );
    checks.require(input.applied_force_lbf > 0.0, "Applied force F must be > 0");
    checks.require(input.elastic_modulus_psi > 0.0, "Young's modulus E must be > 0");
    checks.require(input.section_modulus_in3 > 0.0, "Section modulus S must be > 0");
    checks.require(input.moment_of_inertia_in4 > 0.0, "Moment of inertia I must be > 0");
    checks.require(
        input.allowable_bending_stress_psi > 0.0,
        "Allowable bending stress must be > 0",
    );
    checks.finish()
}

/// Calculate reactions, moment, stress, utilization and deflection.
///
/// This is a pure function; it never fails (see the module docs on
/// degenerate inputs).
pub fn calculate(input: &BeamInput) -> BeamOutput {
    let f = input.applied_force_lbf;
    let a = input.load_position_in;
    let r = input.lever_radius_in;
    let b = input.support_span_in - a;

    let l = positive_or_epsilon("support_span_in", input.support_span_in);
    let s = positive_or_epsilon("section_modulus_in3", input.section_modulus_in3);
    let i = positive_or_epsilon("moment_of_inertia_in4", input.moment_of_inertia_in4);
    let e = positive_or_epsilon("elastic_modulus_psi", input.elastic_modulus_psi);
    let allowable = positive_or_epsilon(
        "allowable_bending_stress_psi",
        input.allowable_bending_stress_psi,
    );

    // F in lbf, R in inches
    let torque_ftlbf = f * (r / 12.0);

    let reaction_a_lbf = f * (b / l);
    let reaction_b_lbf = f * (a / l);

    let max_moment_inlbf = f * a * b / l;
    let max_moment_ftlbf = FtLbf::from(InLbf(max_moment_inlbf)).value();

    let bending_stress_psi = max_moment_inlbf / s;
    let utilization_percent = bending_stress_psi / allowable * 100.0;

    let deflection_in = f * a * b * (l * l - a * a - b * b) / (6.0 * e * i * l);

    debug!(
        reaction_a_lbf,
        reaction_b_lbf,
        max_moment_ftlbf,
        bending_stress_psi,
        utilization_percent,
        deflection_in,
        "beam calculated"
    );

    BeamOutput {
        torque_ftlbf,
        reaction_a_lbf,
        reaction_b_lbf,
        max_moment_ftlbf,
        bending_stress_psi,
        utilization_percent,
        deflection_in,
    }
}
