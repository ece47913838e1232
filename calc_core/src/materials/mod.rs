//! # Reference Data
//!
//! Process-wide, read-only lookup tables consumed by key:
//!
//! - **Bolt sizes**: key → tensile stress area (in²)
//! - **Materials**: key → yield strength (ksi)
//! - **Studs**: key → nominal diameter (in) and tensile stress area (in²)
//!
//! Tables are built once on first use and never mutated, so they can be read
//! from any number of threads. A lookup that misses returns `None`; there is
//! no fallback row.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{bolt_size, material, stud_spec};
//!
//! assert_eq!(bolt_size("1\"-8UN").unwrap().tensile_area_in2, 0.606);
//! assert_eq!(material("SA-193-B16").unwrap().yield_strength_ksi, 105.0);
//! assert_eq!(stud_spec("5/8-11UNC").unwrap().diameter_in, 0.625);
//! assert!(stud_spec("").is_none());
//! ```

pub mod fasteners;

pub use fasteners::{BoltSizeSpec, MaterialSpec, StudSpec};

use fasteners::{BOLT_SIZES, MATERIALS, STUD_SPECS};

/// Look up a bolt size by exact key.
pub fn bolt_size(key: &str) -> Option<&'static BoltSizeSpec> {
    BOLT_SIZES.iter().find(|b| b.key == key)
}

/// Look up a bolting material by exact key.
pub fn material(key: &str) -> Option<&'static MaterialSpec> {
    MATERIALS.iter().find(|m| m.key == key)
}

/// Look up a gasket stud by exact key.
pub fn stud_spec(key: &str) -> Option<&'static StudSpec> {
    STUD_SPECS.iter().find(|s| s.key == key)
}

/// All bolt sizes, in table order
pub fn bolt_sizes() -> &'static [BoltSizeSpec] {
    &BOLT_SIZES
}

/// All bolting materials, in table order
pub fn materials() -> &'static [MaterialSpec] {
    &MATERIALS
}

/// All gasket studs, in table order
pub fn stud_specs() -> &'static [StudSpec] {
    &STUD_SPECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_size_lookup() {
        assert_eq!(bolt_size("1-1/8\"-8UN").unwrap().tensile_area_in2, 0.790);
        assert_eq!(bolt_size("1-1/2\"-8UN").unwrap().tensile_area_in2, 1.491);
        assert!(bolt_size("1-1/2-8UN").is_none(), "stud keys are a separate table");
    }

    #[test]
    fn test_material_lookup() {
        assert_eq!(material("SA-193-B7").unwrap().yield_strength_ksi, 105.0);
        assert!(material("sa-193-b7").is_none(), "keys are case sensitive");
    }

    #[test]
    fn test_stud_lookup() {
        let stud = stud_spec("1-1/2-8UN").unwrap();
        assert_eq!(stud.diameter_in, 1.5);
        assert_eq!(stud.tensile_area_in2, 1.491);
        assert!(stud_spec("7/8-9UNC").is_none());
    }

    #[test]
    fn test_table_order() {
        let keys: Vec<&str> = bolt_sizes().iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["1\"-8UN", "1-1/8\"-8UN", "1-1/2\"-8UN"]);
        assert_eq!(materials().len(), 2);
        assert_eq!(stud_specs()[1].key, "5/8-11UNC");
    }

    #[test]
    fn test_lookup_returns_same_row() {
        let a = stud_spec("5/8-11UNC").unwrap();
        let b = stud_spec("5/8-11UNC").unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
