//! # Gasket Stress and Stud Torque (Reeves Method)
//!
//! Up to four named connections are checked independently. For each row:
//!
//! 1. Stud load: `load_per_stud = stud_stress × At`, `total = load_per_stud × n`
//! 2. Pressure load: `P × π/4 × d²`, where `d` is the TLR plug diameter on the
//!    TLR row and the gasket ID everywhere else
//! 3. Gasket contact area: `π/4 × (OD² − ID²)`
//! 4. Gasket stress: `(total − pressure_load) / gasket_area`
//! 5. Torque per stud: `K × load_per_stud × stud_diameter`
//!
//! A negative gasket stress means the bolt preload does not hold the working
//! pressure; it is reported unchanged.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::gasket::{calculate_row, validate_row, ConnectionId, GasketCalcParams, GasketRowInput};
//!
//! let row = GasketRowInput {
//!     stud_stress_psi: 40_000.0,
//!     stud_count: 24,
//!     gasket_od_in: 30.0,
//!     gasket_id_in: 28.0,
//!     design_pressure_psi: 300.0,
//!     ..GasketRowInput::new(ConnectionId::ChannelCover)
//! };
//!
//! assert!(validate_row(&row).ok);
//! let result = calculate_row(&row, &GasketCalcParams::default()).unwrap();
//! assert_eq!(result.load_per_stud_lbf, 40_000.0 * 1.491);
//! ```

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::materials;
use crate::units::{FtLbf, InLbf, NewtonMeters, UnitSystem};
use crate::validation::{Checks, Validation};

/// Nut factor choices offered to the user
pub const NUT_FACTOR_OPTIONS: [f64; 3] = [0.117, 0.15, 0.17];

/// Breech-lock / lock-ring studs
pub const DEFAULT_NUT_FACTOR: f64 = 0.117;

/// Identity of a gasketed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionId {
    InternalFlange,
    PartitionCover,
    Tlr,
    ChannelCover,
}

impl ConnectionId {
    /// All connections, in display order
    pub const ALL: [ConnectionId; 4] = [
        ConnectionId::InternalFlange,
        ConnectionId::PartitionCover,
        ConnectionId::Tlr,
        ConnectionId::ChannelCover,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionId::InternalFlange => "Internal Flange Bolt",
            ConnectionId::PartitionCover => "1/2 Circle Partition Cover Bolt",
            ConnectionId::Tlr => "TLR Bolt",
            ConnectionId::ChannelCover => "Channel Cover Bolt",
        }
    }

    /// Wire name (`internal_flange`, `tlr`, ...)
    pub fn code(&self) -> &'static str {
        match self {
            ConnectionId::InternalFlange => "internal_flange",
            ConnectionId::PartitionCover => "partition_cover",
            ConnectionId::Tlr => "tlr",
            ConnectionId::ChannelCover => "channel_cover",
        }
    }

    /// Only the TLR row bears pressure on the plug rather than the gasket bore
    pub fn is_tlr(&self) -> bool {
        matches!(self, ConnectionId::Tlr)
    }

    fn default_stud_key(&self) -> &'static str {
        match self {
            ConnectionId::PartitionCover => "5/8-11UNC",
            _ => "1-1/2-8UN",
        }
    }

    fn default_gasket_type(&self) -> &'static str {
        match self {
            ConnectionId::PartitionCover => "",
            _ => "KAG",
        }
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Input for one connection row (base units: in, psi).
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "tlr",
///   "stud_key": "1-1/2-8UN",
///   "stud_stress_psi": 45000.0,
///   "stud_count": 16,
///   "gasket_od_in": 20.0,
///   "gasket_id_in": 18.5,
///   "design_pressure_psi": 1500.0,
///   "tlr_od_in": 16.0,
///   "gasket_type": "KAG"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasketRowInput {
    pub id: ConnectionId,

    /// Key into the stud table; empty when nothing is selected
    #[serde(default)]
    pub stud_key: String,

    /// Target stud stress (psi)
    #[serde(default)]
    pub stud_stress_psi: f64,

    #[serde(default)]
    pub stud_count: u32,

    /// Gasket outer diameter (in)
    #[serde(default)]
    pub gasket_od_in: f64,

    /// Gasket inner diameter (in)
    #[serde(default)]
    pub gasket_id_in: f64,

    /// Design pressure (psi)
    #[serde(default)]
    pub design_pressure_psi: f64,

    /// TLR plug diameter (in); read only on the TLR row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlr_od_in: Option<f64>,

    /// Gasket type label (informational)
    #[serde(default)]
    pub gasket_type: String,
}

impl GasketRowInput {
    /// A zeroed row with the connection's default stud and gasket type.
    pub fn new(id: ConnectionId) -> Self {
        GasketRowInput {
            id,
            stud_key: id.default_stud_key().to_string(),
            stud_stress_psi: 0.0,
            stud_count: 0,
            gasket_od_in: 0.0,
            gasket_id_in: 0.0,
            design_pressure_psi: 0.0,
            tlr_od_in: None,
            gasket_type: id.default_gasket_type().to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Diameter the design pressure acts on (in)
    pub fn pressure_diameter_in(&self) -> f64 {
        if self.id.is_tlr() {
            self.tlr_od_in.unwrap_or(0.0)
        } else {
            self.gasket_id_in
        }
    }
}

/// The four connections with their default studs, numeric fields zeroed.
pub fn default_rows() -> Vec<GasketRowInput> {
    ConnectionId::ALL.into_iter().map(GasketRowInput::new).collect()
}

/// Parameters shared by every row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasketCalcParams {
    /// Nut factor K
    pub nut_factor: f64,

    /// Display system; calculations always run in English base units
    #[serde(default)]
    pub unit_system: UnitSystem,
}

impl Default for GasketCalcParams {
    fn default() -> Self {
        GasketCalcParams {
            nut_factor: DEFAULT_NUT_FACTOR,
            unit_system: UnitSystem::English,
        }
    }
}

/// Results for one connection row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasketRowResult {
    /// Stud tensile stress area At (in²)
    pub tensile_area_in2: f64,
    /// Nominal stud diameter (in)
    pub stud_diameter_in: f64,
    pub load_per_stud_lbf: f64,
    pub total_bolt_load_lbf: f64,
    /// Diameter the pressure acts on (in)
    pub pressure_diameter_in: f64,
    pub pressure_load_lbf: f64,
    /// Gasket contact area (in²)
    pub gasket_area_in2: f64,
    /// Net gasket contact stress (psi); negative when pressure exceeds preload
    pub gasket_stress_psi: f64,
    /// Torque per stud (ft·lbf)
    pub torque_ftlbf: f64,
    /// Torque per stud (N·m)
    pub torque_nm: f64,
}

/// Validation and (when valid) result for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub id: ConnectionId,
    pub validation: Validation,
    pub result: Option<GasketRowResult>,
}

/// Check every precondition of [`calculate_row`] for one row.
pub fn validate_row(row: &GasketRowInput) -> Validation {
    let mut checks = Checks::default();
    checks.require(!row.stud_key.is_empty(), "Select stud size");
    checks.require(row.stud_stress_psi > 0.0, "Stud stress must be > 0");
    checks.require(row.stud_count > 0, "Stud count must be > 0");

    let od = row.gasket_od_in;
    let id = row.gasket_id_in;
    checks.require(od > 0.0 && id > 0.0, "Gasket OD/ID must be > 0");
    if od > 0.0 && id > 0.0 {
        checks.require(od > id, "Gasket OD must be > gasket ID");
    }
    checks.require(row.design_pressure_psi > 0.0, "Design pressure must be > 0");

    if row.id.is_tlr() {
        let plug = row.tlr_od_in.unwrap_or(0.0);
        checks.require(plug > 0.0, "TLR OD (plug diameter) must be > 0");
        if plug > 0.0 && id > 0.0 {
            checks.require(plug < id, "TLR OD must be < gasket ID");
        }
    }

    checks.require(
        materials::stud_spec(&row.stud_key).is_some(),
        "Unknown stud spec (update studs list)",
    );
    checks.finish()
}

/// Calculate bolt load, pressure load, gasket stress and torque for one row.
///
/// Returns [`CalcError::UnknownReference`] if the stud key does not resolve;
/// [`validate_row`] reports that case to users first. A nut factor that is
/// not a positive number is rejected with [`CalcError::InvalidInput`].
pub fn calculate_row(row: &GasketRowInput, params: &GasketCalcParams) -> CalcResult<GasketRowResult> {
    if !(params.nut_factor.is_finite() && params.nut_factor > 0.0) {
        return Err(CalcError::invalid_input(
            "nut_factor",
            params.nut_factor.to_string(),
            "must be a positive number",
        ));
    }

    let spec = materials::stud_spec(&row.stud_key)
        .ok_or_else(|| CalcError::unknown_reference("Stud", row.stud_key.as_str()))?;

    let tensile_area_in2 = spec.tensile_area_in2;

    let load_per_stud_lbf = row.stud_stress_psi * tensile_area_in2;
    let total_bolt_load_lbf = load_per_stud_lbf * f64::from(row.stud_count);

    let pressure_diameter_in = row.pressure_diameter_in();
    let pressure_area_in2 = PI / 4.0 * pressure_diameter_in.powi(2);
    let pressure_load_lbf = row.design_pressure_psi * pressure_area_in2;

    let gasket_area_in2 = PI / 4.0 * (row.gasket_od_in.powi(2) - row.gasket_id_in.powi(2));

    let gasket_stress_psi = (total_bolt_load_lbf - pressure_load_lbf) / gasket_area_in2;

    // K·F·d is in·lbf
    let torque = FtLbf::from(InLbf(params.nut_factor * load_per_stud_lbf * spec.diameter_in));
    let torque_ftlbf = torque.value();
    let torque_nm = NewtonMeters::from(torque).value();

    debug!(
        connection = row.id.code(),
        total_bolt_load_lbf,
        pressure_load_lbf,
        gasket_stress_psi,
        torque_ftlbf,
        "gasket row calculated"
    );

    Ok(GasketRowResult {
        tensile_area_in2,
        stud_diameter_in: spec.diameter_in,
        load_per_stud_lbf,
        total_bolt_load_lbf,
        pressure_diameter_in,
        pressure_load_lbf,
        gasket_area_in2,
        gasket_stress_psi,
        torque_ftlbf,
        torque_nm,
    })
}

/// Validate and calculate every row independently.
///
/// An invalid row gets its validation messages and no result; it never
/// prevents the other rows from being calculated. A row that passes
/// validation but fails to calculate carries the error as its message.
pub fn calculate_rows(rows: &[GasketRowInput], params: &GasketCalcParams) -> Vec<RowOutcome> {
    rows.iter()
        .map(|row| {
            let mut validation = validate_row(row);
            let result = if validation.ok {
                match calculate_row(row, params) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        warn!(connection = row.id.code(), error = %e, "gasket row failed");
                        validation = Validation::from_errors(vec![e.to_string()]);
                        None
                    }
                }
            } else {
                debug!(connection = row.id.code(), errors = validation.errors.len(), "gasket row invalid");
                None
            };
            RowOutcome {
                id: row.id,
                validation,
                result,
            }
        })
        .collect()
}
