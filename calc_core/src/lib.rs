//! # calc_core - Heat Exchanger Hand-Calculation Engine
//!
//! `calc_core` provides the engineering hand-calculations used around heat exchanger
//! lifting and bolted connections: lifting-beam bending, bolt shear of the support and
//! TLR tie-in groups, and gasket seating stress with stud torque. All inputs and outputs
//! are JSON-serializable, and every quantity is stored in English base units.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Validate, then calculate**: Each calculator has a `validate` gate returning messages
//! - **Display-only SI**: Unit conversion happens at the edge, never in the math
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::beam::{self, BeamInput};
//!
//! let input = BeamInput {
//!     lever_radius_in: 12.0,
//!     support_span_in: 40.0,
//!     load_position_in: 20.0,
//!     applied_force_lbf: 1000.0,
//!     elastic_modulus_psi: 29_000_000.0,
//!     section_modulus_in3: 5.0,
//!     moment_of_inertia_in4: 10.0,
//!     allowable_bending_stress_psi: 20_000.0,
//! };
//!
//! assert!(beam::validate(&input).ok);
//! let out = beam::calculate(&input);
//! assert_eq!(out.reaction_a_lbf, 500.0);
//! ```
//!
//! ## Modules
//!
//! - [`worksheet`] - Worksheet container holding one sheet per calculator
//! - [`calculations`] - Beam, bolt shear and gasket calculators
//! - [`materials`] - Bolt size, material and stud reference tables
//! - [`units`] - Unit constants, wrappers and the EN/SI display layer
//! - [`validation`] - Validation records returned by the calculators
//! - [`errors`] - Structured error types
//! - [`file_io`] - Worksheet files with atomic saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod units;
pub mod validation;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::UtilizationStatus;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_input, load_worksheet, save_worksheet};
pub use units::{Quantity, UnitSystem};
pub use validation::Validation;
pub use worksheet::{Worksheet, WorksheetMetadata, WorksheetSettings};
