//! # Worksheets
//!
//! A [`Worksheet`] is the root container saved to `.hexc` files: job metadata,
//! display settings, and one [`Sheet`] per calculator.
//!
//! ## Sheet lifecycle
//!
//! A sheet pairs an input record with an optional output:
//!
//! - inputs start from their defaults and are edited field by field;
//! - an output exists only after an explicit `calculate()`;
//! - any edit discards the output, so a stale result is never shown next to
//!   inputs it was not computed from;
//! - `clear()` replaces the input wholesale and drops the output.
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMetadata (version, engineer, job info, timestamps)
//! ├── settings: WorksheetSettings (display unit system)
//! ├── beam: BeamSheet
//! ├── bolt_shear: BoltShearSheet
//! └── gasket: GasketSheet
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::worksheet::Worksheet;
//!
//! let mut ws = Worksheet::new("Jane Engineer", "25-042", "ACME Corp");
//! ws.beam.edit(|b| {
//!     b.lever_radius_in = 6.0;
//!     b.support_span_in = 40.0;
//!     b.load_position_in = 20.0;
//!     b.applied_force_lbf = 10_000.0;
//!     b.elastic_modulus_psi = 29_000_000.0;
//!     b.section_modulus_in3 = 50.0;
//!     b.moment_of_inertia_in4 = 400.0;
//!     b.allowable_bending_stress_psi = 20_000.0;
//! });
//! assert!(ws.beam.output().is_none());
//!
//! assert!(ws.beam.calculate().ok);
//! assert!(ws.beam.output().is_some());
//!
//! ws.beam.edit(|b| b.applied_force_lbf = 12_000.0);
//! assert!(ws.beam.output().is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::beam::{self, BeamInput, BeamOutput};
use crate::calculations::bolt_shear::{self, BoltShearInput, BoltShearOutput};
use crate::calculations::gasket::{self, GasketCalcParams, GasketRowInput, RowOutcome};
use crate::units::UnitSystem;
use crate::validation::Validation;

/// Current schema version for .hexc files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// An input record and the output last calculated from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet<I, O> {
    input: I,
    output: Option<O>,
}

impl<I, O> Sheet<I, O> {
    pub fn new(input: I) -> Self {
        Sheet { input, output: None }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// The last calculated output, if the input has not changed since.
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    pub fn is_calculated(&self) -> bool {
        self.output.is_some()
    }

    /// Apply an edit to the input. Discards any previous output.
    pub fn edit(&mut self, f: impl FnOnce(&mut I)) {
        f(&mut self.input);
        self.output = None;
    }

    /// Replace the whole input. Discards any previous output.
    pub fn replace(&mut self, input: I) {
        self.input = input;
        self.output = None;
    }

    /// Store an output computed from the current input.
    pub fn set_output(&mut self, output: O) {
        self.output = Some(output);
    }
}

impl<I: Default, O> Sheet<I, O> {
    /// Reset the input to its defaults and drop the output.
    pub fn clear(&mut self) {
        self.replace(I::default());
    }
}

impl<I: Default, O> Default for Sheet<I, O> {
    fn default() -> Self {
        Sheet::new(I::default())
    }
}

pub type BeamSheet = Sheet<BeamInput, BeamOutput>;
pub type BoltShearSheet = Sheet<BoltShearInput, BoltShearOutput>;
pub type GasketSheet = Sheet<GasketSheetInput, Vec<RowOutcome>>;

impl Sheet<BeamInput, BeamOutput> {
    /// Validate, and calculate only if validation passes.
    pub fn calculate(&mut self) -> Validation {
        let validation = beam::validate(&self.input);
        self.output = validation.ok.then(|| beam::calculate(&self.input));
        debug!(ok = validation.ok, "beam sheet calculated");
        validation
    }
}

impl Sheet<BoltShearInput, BoltShearOutput> {
    /// Validate, and calculate only if validation passes.
    pub fn calculate(&mut self) -> Validation {
        let validation = bolt_shear::validate(&self.input);
        self.output = validation.ok.then(|| bolt_shear::calculate(&self.input));
        debug!(ok = validation.ok, "bolt shear sheet calculated");
        validation
    }
}

/// Connection rows plus the parameters shared by all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasketSheetInput {
    pub params: GasketCalcParams,
    pub rows: Vec<GasketRowInput>,
}

impl Default for GasketSheetInput {
    fn default() -> Self {
        GasketSheetInput {
            params: GasketCalcParams::default(),
            rows: gasket::default_rows(),
        }
    }
}

impl Sheet<GasketSheetInput, Vec<RowOutcome>> {
    /// Calculate every row independently.
    ///
    /// Always stores per-row outcomes; the returned validation lists the
    /// errors of all invalid rows, each prefixed with the connection name.
    pub fn calculate(&mut self) -> Validation {
        let outcomes = gasket::calculate_rows(&self.input.rows, &self.input.params);
        let errors = outcomes
            .iter()
            .flat_map(|o| {
                o.validation
                    .errors
                    .iter()
                    .map(move |e| format!("{}: {}", o.id.display_name(), e))
            })
            .collect();
        self.output = Some(outcomes);
        Validation::from_errors(errors)
    }

    /// Reset every row to its zeroed default, keeping the nut factor.
    pub fn clear_rows(&mut self) {
        self.edit(|input| input.rows = gasket::default_rows());
    }
}

/// Validation of each sheet after [`Worksheet::calculate_all`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetValidation {
    pub beam: Validation,
    pub bolt_shear: Validation,
    pub gasket: Validation,
}

/// Root worksheet container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    /// Worksheet metadata (version, engineer, job info)
    pub meta: WorksheetMetadata,

    #[serde(default)]
    pub settings: WorksheetSettings,

    #[serde(default)]
    pub beam: BeamSheet,

    #[serde(default)]
    pub bolt_shear: BoltShearSheet,

    #[serde(default)]
    pub gasket: GasketSheet,
}

impl Worksheet {
    /// Create a new worksheet with default inputs and no outputs.
    ///
    /// ```rust
    /// use calc_core::worksheet::Worksheet;
    ///
    /// let ws = Worksheet::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(ws.meta.engineer, "John Doe");
    /// assert!(!ws.beam.is_calculated());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Worksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: WorksheetSettings::default(),
            beam: BeamSheet::default(),
            bolt_shear: BoltShearSheet::default(),
            gasket: GasketSheet::default(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run every sheet's calculate action.
    pub fn calculate_all(&mut self) -> WorksheetValidation {
        let result = WorksheetValidation {
            beam: self.beam.calculate(),
            bolt_shear: self.bolt_shear.calculate(),
            gasket: self.gasket.calculate(),
        };
        self.touch();
        result
    }

    /// Drop every output without touching inputs.
    pub fn invalidate_outputs(&mut self) {
        self.beam.output = None;
        self.bolt_shear.output = None;
        self.gasket.output = None;
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("", "", "")
    }
}

/// Worksheet metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Worksheet display settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorksheetSettings {
    /// System values are shown and entered in
    pub unit_system: UnitSystem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::gasket::ConnectionId;

    fn fill_beam(b: &mut BeamInput) {
        b.lever_radius_in = 6.0;
        b.support_span_in = 40.0;
        b.load_position_in = 20.0;
        b.applied_force_lbf = 10_000.0;
        b.elastic_modulus_psi = 29_000_000.0;
        b.section_modulus_in3 = 50.0;
        b.moment_of_inertia_in4 = 400.0;
        b.allowable_bending_stress_psi = 20_000.0;
    }

    #[test]
    fn test_worksheet_creation() {
        let ws = Worksheet::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(ws.meta.engineer, "John Doe");
        assert_eq!(ws.meta.job_id, "25-001");
        assert_eq!(ws.meta.version, SCHEMA_VERSION);
        assert_eq!(ws.settings.unit_system, UnitSystem::English);
        assert_eq!(ws.gasket.input().rows.len(), 4);
    }

    #[test]
    fn test_output_only_after_calculate() {
        let mut sheet = BeamSheet::default();
        sheet.edit(fill_beam);
        assert!(!sheet.is_calculated());

        let v = sheet.calculate();
        assert!(v.ok);
        assert_eq!(sheet.output().unwrap().utilization_percent, 10.0);
    }

    #[test]
    fn test_edit_invalidates_output() {
        let mut sheet = BeamSheet::default();
        sheet.edit(fill_beam);
        sheet.calculate();
        assert!(sheet.is_calculated());

        sheet.edit(|b| b.load_position_in = 10.0);
        assert!(!sheet.is_calculated());
        assert_eq!(sheet.input().load_position_in, 10.0);
    }

    #[test]
    fn test_clear_resets_input() {
        let mut sheet = BoltShearSheet::default();
        sheet.edit(|b| {
            b.applied_force_lbf = 20_000.0;
            b.x_ft = 10.0;
            b.d_ft = 5.0;
        });
        assert!(sheet.calculate().ok);

        sheet.clear();
        assert!(!sheet.is_calculated());
        assert_eq!(sheet.input(), &BoltShearInput::default());
    }

    #[test]
    fn test_invalid_input_stores_no_output() {
        let mut sheet = BoltShearSheet::default();
        let v = sheet.calculate();
        assert!(!v.ok);
        assert!(sheet.output().is_none());
    }

    #[test]
    fn test_gasket_sheet_partial_rows() {
        let mut sheet = GasketSheet::default();
        sheet.edit(|input| {
            let row = &mut input.rows[0];
            row.stud_stress_psi = 40_000.0;
            row.stud_count = 24;
            row.gasket_od_in = 30.0;
            row.gasket_id_in = 28.0;
            row.design_pressure_psi = 300.0;
        });

        let v = sheet.calculate();
        assert!(!v.ok);
        assert!(v.errors.iter().any(|e| e.starts_with("TLR Bolt: ")));

        let outcomes = sheet.output().unwrap();
        assert_eq!(outcomes[0].id, ConnectionId::InternalFlange);
        assert!(outcomes[0].result.is_some());
        assert!(outcomes[1..].iter().all(|o| o.result.is_none()));
    }

    #[test]
    fn test_gasket_sheet_fails_on_bad_nut_factor() {
        let mut sheet = GasketSheet::default();
        sheet.edit(|input| {
            input.params.nut_factor = 0.0;
            let row = &mut input.rows[0];
            row.stud_stress_psi = 40_000.0;
            row.stud_count = 24;
            row.gasket_od_in = 30.0;
            row.gasket_id_in = 28.0;
            row.design_pressure_psi = 300.0;
        });

        let v = sheet.calculate();
        assert!(!v.ok);
        assert!(v
            .errors
            .iter()
            .any(|e| e.starts_with("Internal Flange Bolt: ") && e.contains("nut_factor")));
        assert!(sheet.output().unwrap()[0].result.is_none());
    }

    #[test]
    fn test_gasket_clear_rows_keeps_nut_factor() {
        let mut sheet = GasketSheet::default();
        sheet.edit(|input| {
            input.params.nut_factor = 0.15;
            input.rows[0].stud_count = 12;
        });
        sheet.calculate();
        sheet.clear_rows();
        assert!(!sheet.is_calculated());
        assert_eq!(sheet.input().params.nut_factor, 0.15);
        assert_eq!(sheet.input().rows[0].stud_count, 0);
    }

    #[test]
    fn test_calculate_all_and_invalidate() {
        let mut ws = Worksheet::new("Engineer", "25-001", "Client");
        ws.beam.edit(fill_beam);
        let checks = ws.calculate_all();
        assert!(checks.beam.ok);
        assert!(!checks.bolt_shear.ok);
        assert!(ws.beam.is_calculated());
        assert!(ws.gasket.is_calculated());

        ws.invalidate_outputs();
        assert!(!ws.beam.is_calculated());
        assert!(!ws.gasket.is_calculated());
    }

    #[test]
    fn test_worksheet_serialization() {
        let mut ws = Worksheet::new("Jane Engineer", "25-042", "Test Client");
        ws.beam.edit(fill_beam);
        ws.beam.calculate();

        let json = serde_json::to_string_pretty(&ws).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"unit_system\": \"EN\""));

        let roundtrip: Worksheet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.beam.input(), ws.beam.input());
        assert!(roundtrip.beam.is_calculated());
        assert!(!roundtrip.bolt_shear.is_calculated());
    }

    #[test]
    fn test_sheet_without_output_field() {
        let sheet: BeamSheet = serde_json::from_str(r#"{ "input": { "support_span_in": 40.0 } }"#).unwrap();
        assert_eq!(sheet.input().support_span_in, 40.0);
        assert!(!sheet.is_calculated());

        let sheet: BoltShearSheet = serde_json::from_str(r#"{ "input": {}, "output": null }"#).unwrap();
        assert_eq!(sheet.input(), &BoltShearInput::default());
        assert!(sheet.output().is_none());
    }
}
