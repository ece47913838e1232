//! Fastener reference tables.
//!
//! Hand-curated seed data for bolt tensile-stress areas, bolting material
//! yield strengths, and gasket stud dimensions. Adding rows here is the only
//! supported way to extend what the calculators accept.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Bolt size used in the bolt shear calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltSizeSpec {
    /// Thread designation (e.g., `1"-8UN`)
    pub key: String,
    /// Tensile stress area At (in²)
    pub tensile_area_in2: f64,
}

/// Bolting material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// ASME specification and grade (e.g., `SA-193-B16`)
    pub key: String,
    /// Minimum yield strength Sy (ksi)
    pub yield_strength_ksi: f64,
}

/// Stud used at a gasketed connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudSpec {
    /// Thread designation (e.g., `1-1/2-8UN`)
    pub key: String,
    /// Nominal diameter (in)
    pub diameter_in: f64,
    /// Tensile stress area At (in²)
    pub tensile_area_in2: f64,
}

pub(crate) static BOLT_SIZES: Lazy<Vec<BoltSizeSpec>> = Lazy::new(|| {
    [("1\"-8UN", 0.606), ("1-1/8\"-8UN", 0.790), ("1-1/2\"-8UN", 1.491)]
        .into_iter()
        .map(|(key, tensile_area_in2)| BoltSizeSpec {
            key: key.to_string(),
            tensile_area_in2,
        })
        .collect()
});

pub(crate) static MATERIALS: Lazy<Vec<MaterialSpec>> = Lazy::new(|| {
    [("SA-193-B7", 105.0), ("SA-193-B16", 105.0)]
        .into_iter()
        .map(|(key, yield_strength_ksi)| MaterialSpec {
            key: key.to_string(),
            yield_strength_ksi,
        })
        .collect()
});

// Values from the Reeves gasket spreadsheet.
pub(crate) static STUD_SPECS: Lazy<Vec<StudSpec>> = Lazy::new(|| {
    [("1-1/2-8UN", 1.5, 1.491), ("5/8-11UNC", 0.625, 0.226)]
        .into_iter()
        .map(|(key, diameter_in, tensile_area_in2)| StudSpec {
            key: key.to_string(),
            diameter_in,
            tensile_area_in2,
        })
        .collect()
});
