//! # Unit Types
//!
//! Dual-unit (English/SI) conversions for the calculators.
//!
//! Every calculator works in one fixed base system (English: in, ft, lbf, psi,
//! ft·lbf). SI values only exist at the display boundary: a field holds a single
//! base value and shows it in both systems, and an edit in either system is
//! converted back to the base value. [`Quantity`] captures that rule.
//!
//! Three layers are provided:
//!
//! - scalar converters (`in_to_mm`, `psi_to_mpa`, ...), each the exact inverse
//!   of its pair;
//! - `f64` newtypes with `From` impls in both directions, which the display
//!   layer and the calculators convert through;
//! - [`UnitSystem`] + [`Quantity`] for display conversion.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Inches, Millimeters, Quantity, UnitSystem};
//!
//! let bore = Inches(2.0);
//! let mm: Millimeters = bore.into();
//! assert_eq!(mm.0, 50.8);
//!
//! let shown = Quantity::Length.to_display(2.0, UnitSystem::Si);
//! assert_eq!(shown, 50.8);
//! assert_eq!(Quantity::Length.unit_label(UnitSystem::Si), "mm");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Millimeters per inch
pub const MM_PER_IN: f64 = 25.4;

/// Meters per foot
pub const M_PER_FT: f64 = 0.3048;

/// psi per MPa
pub const PSI_PER_MPA: f64 = 145.037738;

/// kN per lbf
pub const KN_PER_LBF: f64 = 0.004448221615;

/// N·m per ft·lbf
pub const NM_PER_FTLBF: f64 = 1.355817948;

const MM3_PER_IN3: f64 = MM_PER_IN * MM_PER_IN * MM_PER_IN;
const MM4_PER_IN4: f64 = MM3_PER_IN3 * MM_PER_IN;

// ============================================================================
// Scalar Converters
// ============================================================================

pub fn in_to_mm(x: f64) -> f64 {
    x * MM_PER_IN
}

pub fn mm_to_in(x: f64) -> f64 {
    x / MM_PER_IN
}

pub fn ft_to_m(x: f64) -> f64 {
    x * M_PER_FT
}

pub fn m_to_ft(x: f64) -> f64 {
    x / M_PER_FT
}

pub fn psi_to_mpa(x: f64) -> f64 {
    x / PSI_PER_MPA
}

pub fn mpa_to_psi(x: f64) -> f64 {
    x * PSI_PER_MPA
}

pub fn lbf_to_kn(x: f64) -> f64 {
    x * KN_PER_LBF
}

pub fn kn_to_lbf(x: f64) -> f64 {
    x / KN_PER_LBF
}

pub fn ftlbf_to_nm(x: f64) -> f64 {
    x * NM_PER_FTLBF
}

pub fn nm_to_ftlbf(x: f64) -> f64 {
    x / NM_PER_FTLBF
}

/// Section modulus in³ → mm³
pub fn in3_to_mm3(x: f64) -> f64 {
    x * MM3_PER_IN3
}

/// Section modulus mm³ → in³
pub fn mm3_to_in3(x: f64) -> f64 {
    x / MM3_PER_IN3
}

/// Moment of inertia in⁴ → mm⁴
pub fn in4_to_mm4(x: f64) -> f64 {
    x * MM4_PER_IN4
}

/// Moment of inertia mm⁴ → in⁴
pub fn mm4_to_in4(x: f64) -> f64 {
    x / MM4_PER_IN4
}

// ============================================================================
// Newtype Wrappers
// ============================================================================

macro_rules! unit_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

macro_rules! unit_pair {
    ($en:ident, $si:ident, $fwd:ident, $back:ident) => {
        impl From<$en> for $si {
            fn from(v: $en) -> Self {
                $si($fwd(v.0))
            }
        }

        impl From<$si> for $en {
            fn from(v: $si) -> Self {
                $en($back(v.0))
            }
        }
    };
}

unit_newtype!(/// Length in inches
    Inches);
unit_newtype!(/// Length in millimeters
    Millimeters);
unit_newtype!(/// Length in feet
    Feet);
unit_newtype!(/// Length in meters
    Meters);
unit_newtype!(/// Force in pounds-force
    PoundsForce);
unit_newtype!(/// Force in kilonewtons
    KiloNewtons);
unit_newtype!(/// Stress or pressure in psi
    Psi);
unit_newtype!(/// Stress in ksi (1 ksi = 1000 psi)
    Ksi);
unit_newtype!(/// Stress or pressure in MPa
    MegaPascals);
unit_newtype!(/// Torque or moment in foot-pounds
    FtLbf);
unit_newtype!(/// Torque or moment in inch-pounds
    InLbf);
unit_newtype!(/// Torque in newton-meters
    NewtonMeters);
unit_newtype!(/// Section modulus in in³
    In3);
unit_newtype!(/// Section modulus in mm³
    Mm3);
unit_newtype!(/// Moment of inertia in in⁴
    In4);
unit_newtype!(/// Moment of inertia in mm⁴
    Mm4);

unit_pair!(Inches, Millimeters, in_to_mm, mm_to_in);
unit_pair!(Feet, Meters, ft_to_m, m_to_ft);
unit_pair!(PoundsForce, KiloNewtons, lbf_to_kn, kn_to_lbf);
unit_pair!(Psi, MegaPascals, psi_to_mpa, mpa_to_psi);
unit_pair!(FtLbf, NewtonMeters, ftlbf_to_nm, nm_to_ftlbf);
unit_pair!(In3, Mm3, in3_to_mm3, mm3_to_in3);
unit_pair!(In4, Mm4, in4_to_mm4, mm4_to_in4);

impl From<Ksi> for Psi {
    fn from(ksi: Ksi) -> Self {
        Psi(ksi.0 * 1000.0)
    }
}

impl From<InLbf> for FtLbf {
    fn from(inlbf: InLbf) -> Self {
        FtLbf(inlbf.0 / 12.0)
    }
}

impl From<FtLbf> for InLbf {
    fn from(ftlbf: FtLbf) -> Self {
        InLbf(ftlbf.0 * 12.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(Psi);

// ============================================================================
// Display Systems
// ============================================================================

/// Unit system a value is displayed (and entered) in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// in, ft, lbf, psi, ft·lbf
    #[default]
    #[serde(rename = "EN")]
    English,
    /// mm, m, kN, MPa, N·m
    #[serde(rename = "SI")]
    Si,
}

impl UnitSystem {
    /// Short code used in files and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::English => "EN",
            UnitSystem::Si => "SI",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::English => "English (in, psi, ft·lbf)",
            UnitSystem::Si => "Metric (mm, MPa, N·m)",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Physical quantity of a dual-unit field.
///
/// The base unit is always the English one; SI is a display representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// in ↔ mm
    Length,
    /// ft ↔ m
    LongLength,
    /// lbf ↔ kN
    Force,
    /// psi ↔ MPa
    Stress,
    /// ft·lbf ↔ N·m
    Torque,
    /// in³ ↔ mm³
    SectionModulus,
    /// in⁴ ↔ mm⁴
    Inertia,
    /// degrees in both systems
    Angle,
    /// counts, ratios, factors
    Dimensionless,
}

impl Quantity {
    pub fn unit_label(&self, system: UnitSystem) -> &'static str {
        match (self, system) {
            (Quantity::Length, UnitSystem::English) => "in",
            (Quantity::Length, UnitSystem::Si) => "mm",
            (Quantity::LongLength, UnitSystem::English) => "ft",
            (Quantity::LongLength, UnitSystem::Si) => "m",
            (Quantity::Force, UnitSystem::English) => "lbf",
            (Quantity::Force, UnitSystem::Si) => "kN",
            (Quantity::Stress, UnitSystem::English) => "psi",
            (Quantity::Stress, UnitSystem::Si) => "MPa",
            (Quantity::Torque, UnitSystem::English) => "ft·lbf",
            (Quantity::Torque, UnitSystem::Si) => "N·m",
            (Quantity::SectionModulus, UnitSystem::English) => "in³",
            (Quantity::SectionModulus, UnitSystem::Si) => "mm³",
            (Quantity::Inertia, UnitSystem::English) => "in⁴",
            (Quantity::Inertia, UnitSystem::Si) => "mm⁴",
            (Quantity::Angle, _) => "deg",
            (Quantity::Dimensionless, _) => "",
        }
    }

    /// Convert a base (English) value into `system` for display.
    pub fn to_display(&self, base: f64, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::English => base,
            UnitSystem::Si => match self {
                Quantity::Length => Millimeters::from(Inches(base)).value(),
                Quantity::LongLength => Meters::from(Feet(base)).value(),
                Quantity::Force => KiloNewtons::from(PoundsForce(base)).value(),
                Quantity::Stress => MegaPascals::from(Psi(base)).value(),
                Quantity::Torque => NewtonMeters::from(FtLbf(base)).value(),
                Quantity::SectionModulus => Mm3::from(In3(base)).value(),
                Quantity::Inertia => Mm4::from(In4(base)).value(),
                Quantity::Angle | Quantity::Dimensionless => base,
            },
        }
    }

    /// Convert a value entered in `system` back to the base (English) value.
    pub fn from_display(&self, value: f64, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::English => value,
            UnitSystem::Si => match self {
                Quantity::Length => Inches::from(Millimeters(value)).value(),
                Quantity::LongLength => Feet::from(Meters(value)).value(),
                Quantity::Force => PoundsForce::from(KiloNewtons(value)).value(),
                Quantity::Stress => Psi::from(MegaPascals(value)).value(),
                Quantity::Torque => FtLbf::from(NewtonMeters(value)).value(),
                Quantity::SectionModulus => In3::from(Mm3(value)).value(),
                Quantity::Inertia => In4::from(Mm4(value)).value(),
                Quantity::Angle | Quantity::Dimensionless => value,
            },
        }
    }

    /// Format a base value in `system` with its unit label.
    pub fn format(&self, base: f64, system: UnitSystem, decimals: usize) -> String {
        let shown = self.to_display(base, system);
        if !shown.is_finite() {
            return "—".to_string();
        }
        match self.unit_label(system) {
            "" => format!("{:.*}", decimals, shown),
            label => format!("{:.*} {}", decimals, shown, label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type Pair = (fn(f64) -> f64, fn(f64) -> f64);

    const PAIRS: [Pair; 7] = [
        (in_to_mm, mm_to_in),
        (ft_to_m, m_to_ft),
        (psi_to_mpa, mpa_to_psi),
        (lbf_to_kn, kn_to_lbf),
        (ftlbf_to_nm, nm_to_ftlbf),
        (in3_to_mm3, mm3_to_in3),
        (in4_to_mm4, mm4_to_in4),
    ];

    #[test]
    fn test_scalar_round_trips() {
        let samples = [0.0, 1.0, -1.0, 0.001, 12.5, -3_750.25, 29_000_000.0, 1e-9];
        for (fwd, back) in PAIRS {
            for x in samples {
                assert_relative_eq!(back(fwd(x)), x, max_relative = 1e-12, epsilon = 1e-15);
                assert_relative_eq!(fwd(back(x)), x, max_relative = 1e-12, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_sign_preserved() {
        for (fwd, back) in PAIRS {
            assert!(fwd(-2.0) < 0.0);
            assert!(back(-2.0) < 0.0);
            assert_eq!(fwd(0.0), 0.0);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(in_to_mm(1.0), 25.4);
        assert_relative_eq!(psi_to_mpa(145.037738), 1.0);
        assert_relative_eq!(lbf_to_kn(1000.0), 4.448221615, max_relative = 1e-12);
        assert_relative_eq!(ftlbf_to_nm(100.0), 135.5817948, max_relative = 1e-12);
        assert_relative_eq!(in3_to_mm3(1.0), 16_387.064, max_relative = 1e-12);
        assert_relative_eq!(in4_to_mm4(1.0), 416_231.4256, max_relative = 1e-12);
    }

    #[test]
    fn test_newtype_conversions() {
        let mm: Millimeters = Inches(2.0).into();
        assert_eq!(mm.0, 50.8);

        let m: Meters = Feet(10.0).into();
        assert_relative_eq!(m.0, 3.048, max_relative = 1e-12);

        let psi: Psi = Ksi(105.0).into();
        assert_eq!(psi.0, 105_000.0);

        let ftlbf: FtLbf = InLbf(120.0).into();
        assert_eq!(ftlbf.0, 10.0);
        let inlbf: InLbf = FtLbf(10.0).into();
        assert_eq!(inlbf.value(), 120.0);

        let back: Inches = Millimeters(50.8).into();
        assert_relative_eq!(back.0, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Psi(10.0);
        let b = Psi(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).value(), 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn test_quantity_display_round_trip() {
        let quantities = [
            Quantity::Length,
            Quantity::LongLength,
            Quantity::Force,
            Quantity::Stress,
            Quantity::Torque,
            Quantity::SectionModulus,
            Quantity::Inertia,
            Quantity::Angle,
            Quantity::Dimensionless,
        ];
        for q in quantities {
            for system in [UnitSystem::English, UnitSystem::Si] {
                let base = 123.456;
                let shown = q.to_display(base, system);
                assert_relative_eq!(q.from_display(shown, system), base, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_english_is_identity() {
        assert_eq!(Quantity::Stress.to_display(2000.0, UnitSystem::English), 2000.0);
        assert_eq!(Quantity::Force.from_display(5.0, UnitSystem::English), 5.0);
        assert_eq!(Quantity::Angle.to_display(30.0, UnitSystem::Si), 30.0);
    }

    #[test]
    fn test_format() {
        assert_eq!(Quantity::Length.format(1.0, UnitSystem::Si, 1), "25.4 mm");
        assert_eq!(Quantity::Force.format(5000.0, UnitSystem::English, 0), "5000 lbf");
        assert_eq!(Quantity::Dimensionless.format(2.0, UnitSystem::Si, 2), "2.00");
        assert_eq!(Quantity::Stress.format(f64::NAN, UnitSystem::English, 0), "—");
    }

    #[test]
    fn test_unit_system_serialization() {
        assert_eq!(serde_json::to_string(&UnitSystem::Si).unwrap(), "\"SI\"");
        let en: UnitSystem = serde_json::from_str("\"EN\"").unwrap();
        assert_eq!(en, UnitSystem::English);
        assert_eq!(UnitSystem::default(), UnitSystem::English);
    }

    #[test]
    fn test_newtype_serialization() {
        let json = serde_json::to_string(&Psi(2000.5)).unwrap();
        assert_eq!(json, "2000.5");
    }
}
