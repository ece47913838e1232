//! HEX Calc CLI - run the beam, bolt shear and gasket hand-calculations from the command line.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use calc_core::calculations::beam::{self, BeamInput, BeamOutput};
use calc_core::calculations::bolt_shear::{self, BoltGroupResult, BoltShearInput, BoltShearOutput};
use calc_core::calculations::gasket::{self, GasketCalcParams, GasketRowInput, RowOutcome, NUT_FACTOR_OPTIONS};
use calc_core::materials;
use calc_core::worksheet::Worksheet;
use calc_core::{load_input, load_worksheet, save_worksheet, Quantity, UnitSystem, Validation};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when inputs fail validation
const EXIT_INVALID: i32 = 2;

#[derive(Parser)]
#[command(name = "hexcalc")]
#[command(about = "Heat exchanger hand-calculations: lifting beam, bolt shear, gasket stress", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Unit system for flag values and the human report
    #[arg(short, long, value_enum, global = true)]
    units: Option<UnitsArg>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lifting beam bending check
    Beam(BeamArgs),

    /// Shear check of the support and TLR tie-in bolt groups
    BoltShear(BoltShearArgs),

    /// Gasket seating stress and stud torque for each connection
    Gasket {
        /// JSON array of connection rows; the four default rows when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Nut factor K
        #[arg(short = 'k', long, default_value_t = gasket::DEFAULT_NUT_FACTOR)]
        nut_factor: f64,
    },

    /// List the bolt size, material and stud reference tables
    Tables,

    /// Recalculate and print a saved .hexc worksheet
    Worksheet {
        /// Path to the worksheet file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the recalculated worksheet back to the file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args)]
struct BeamArgs {
    /// JSON file with a beam input record (base units); flags override its fields
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Lever radius R (in | mm)
    #[arg(long)]
    lever_radius: Option<f64>,

    /// Support span L (in | mm)
    #[arg(long)]
    span: Option<f64>,

    /// Load position a from support A (in | mm)
    #[arg(long)]
    position: Option<f64>,

    /// Applied force F (lbf | kN)
    #[arg(long)]
    force: Option<f64>,

    /// Young's modulus E (psi | MPa)
    #[arg(long)]
    modulus: Option<f64>,

    /// Section modulus S (in³ | mm³)
    #[arg(long)]
    section_modulus: Option<f64>,

    /// Moment of inertia I (in⁴ | mm⁴)
    #[arg(long)]
    inertia: Option<f64>,

    /// Allowable bending stress (psi | MPa)
    #[arg(long)]
    allowable: Option<f64>,
}

#[derive(Args)]
struct BoltShearArgs {
    /// JSON file with a bolt shear input record (base units); flags override its fields
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Applied load F (lbf | kN)
    #[arg(long)]
    force: Option<f64>,

    /// Beam angle from horizontal (deg)
    #[arg(long)]
    angle: Option<f64>,

    /// Lever arm X (ft | m)
    #[arg(long)]
    x: Option<f64>,

    /// Lever arm D (ft | m)
    #[arg(long)]
    d: Option<f64>,

    /// Safety factor on the shear allowable
    #[arg(long)]
    safety_factor: Option<f64>,

    /// Support group bolt size key
    #[arg(long)]
    support_bolt: Option<String>,

    /// Support group material key
    #[arg(long)]
    support_material: Option<String>,

    /// Support group bolt count
    #[arg(long)]
    support_count: Option<u32>,

    /// TLR group bolt size key
    #[arg(long)]
    tlr_bolt: Option<String>,

    /// TLR group material key
    #[arg(long)]
    tlr_material: Option<String>,

    /// TLR group bolt count
    #[arg(long)]
    tlr_count: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    /// English (in, lbf, psi, ft·lbf)
    En,
    /// SI (mm, kN, MPa, N·m)
    Si,
}

impl From<UnitsArg> for UnitSystem {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::En => UnitSystem::English,
            UnitsArg::Si => UnitSystem::Si,
        }
    }
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON of the base-unit records
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Beam(args) => handle_beam(args, system_or_default(cli.units), cli.format),
        Commands::BoltShear(args) => handle_bolt_shear(args, system_or_default(cli.units), cli.format),
        Commands::Gasket { input, nut_factor } => {
            handle_gasket(input.as_deref(), nut_factor, system_or_default(cli.units), cli.format)
        }
        Commands::Tables => handle_tables(cli.format),
        Commands::Worksheet { file, save } => handle_worksheet(&file, save, cli.units, cli.format),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn system_or_default(units: Option<UnitsArg>) -> UnitSystem {
    units.map(UnitSystem::from).unwrap_or_default()
}

fn read_input<T: serde::de::DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => load_input(path).with_context(|| format!("Failed to read input {}", path.display())),
        None => Ok(T::default()),
    }
}

/// Overwrite `field` with a flag value entered in `system`.
fn apply(field: &mut f64, flag: Option<f64>, quantity: Quantity, system: UnitSystem) {
    if let Some(value) = flag {
        *field = quantity.from_display(value, system);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

/// Report a failed validation; returns the exit status.
fn report_invalid(title: &str, validation: &Validation, format: OutputFormat) -> Result<i32> {
    match format {
        OutputFormat::Json => print_json(validation)?,
        OutputFormat::Human => {
            eprintln!("{title}: cannot calculate");
            for error in &validation.errors {
                eprintln!("  - {error}");
            }
        }
    }
    Ok(EXIT_INVALID)
}

fn heading(title: &str, system: UnitSystem) {
    println!("\n{title} [{}]", system.code());
    println!("{}", "─".repeat(60));
}

fn line(label: &str, value: String) {
    println!("  {label:<28} {value}");
}

// ============================================================================
// Beam
// ============================================================================

fn handle_beam(args: BeamArgs, system: UnitSystem, format: OutputFormat) -> Result<i32> {
    let mut input: BeamInput = read_input(args.input.as_deref())?;
    apply(&mut input.lever_radius_in, args.lever_radius, Quantity::Length, system);
    apply(&mut input.support_span_in, args.span, Quantity::Length, system);
    apply(&mut input.load_position_in, args.position, Quantity::Length, system);
    apply(&mut input.applied_force_lbf, args.force, Quantity::Force, system);
    apply(&mut input.elastic_modulus_psi, args.modulus, Quantity::Stress, system);
    apply(&mut input.section_modulus_in3, args.section_modulus, Quantity::SectionModulus, system);
    apply(&mut input.moment_of_inertia_in4, args.inertia, Quantity::Inertia, system);
    apply(&mut input.allowable_bending_stress_psi, args.allowable, Quantity::Stress, system);
    debug!(?input, "beam input resolved");

    let validation = beam::validate(&input);
    if !validation.ok {
        return report_invalid("Beam", &validation, format);
    }

    let output = beam::calculate(&input);
    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Human => print_beam(&output, system),
    }
    Ok(0)
}

fn print_beam(out: &BeamOutput, system: UnitSystem) {
    heading("LIFTING BEAM", system);
    line("Torque T", Quantity::Torque.format(out.torque_ftlbf, system, 1));
    line("Reaction RA", Quantity::Force.format(out.reaction_a_lbf, system, 1));
    line("Reaction RB", Quantity::Force.format(out.reaction_b_lbf, system, 1));
    line("Max moment M", Quantity::Torque.format(out.max_moment_ftlbf, system, 1));
    line("Bending stress σ", Quantity::Stress.format(out.bending_stress_psi, system, 1));
    line("Utilization", format!("{:.1} %", out.utilization_percent));
    line("Deflection δ", Quantity::Length.format(out.deflection_in, system, 4));
    line("Status", out.status().to_string());
}

// ============================================================================
// Bolt shear
// ============================================================================

fn handle_bolt_shear(args: BoltShearArgs, system: UnitSystem, format: OutputFormat) -> Result<i32> {
    let mut input: BoltShearInput = read_input(args.input.as_deref())?;
    apply(&mut input.applied_force_lbf, args.force, Quantity::Force, system);
    apply(&mut input.load_angle_deg, args.angle, Quantity::Angle, system);
    apply(&mut input.x_ft, args.x, Quantity::LongLength, system);
    apply(&mut input.d_ft, args.d, Quantity::LongLength, system);
    apply(&mut input.safety_factor, args.safety_factor, Quantity::Dimensionless, system);

    if let Some(key) = args.support_bolt {
        input.support.bolt_key = key;
    }
    if let Some(key) = args.support_material {
        input.support.material_key = key;
    }
    if let Some(count) = args.support_count {
        input.support.bolt_count = count;
    }
    if let Some(key) = args.tlr_bolt {
        input.tlr.bolt_key = key;
    }
    if let Some(key) = args.tlr_material {
        input.tlr.material_key = key;
    }
    if let Some(count) = args.tlr_count {
        input.tlr.bolt_count = count;
    }
    debug!(?input, "bolt shear input resolved");

    let validation = bolt_shear::validate(&input);
    if !validation.ok {
        return report_invalid("Bolt shear", &validation, format);
    }

    let output = bolt_shear::calculate(&input);
    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Human => print_bolt_shear(&input, &output, system),
    }
    Ok(0)
}

fn print_bolt_shear(input: &BoltShearInput, out: &BoltShearOutput, system: UnitSystem) {
    heading("BOLT SHEAR", system);
    line("Vertical force Fv", Quantity::Force.format(out.vertical_force_lbf, system, 1));
    line("Axial force Fa", Quantity::Force.format(out.axial_force_lbf, system, 1));
    line("X − D", Quantity::LongLength.format(out.x_minus_d_ft, system, 3));

    print_group(&input.support.name, &out.support, system);
    print_group(&input.tlr.name, &out.tlr, system);

    println!();
    line("Governing", out.governing_status().to_string());
}

fn print_group(name: &str, group: &BoltGroupResult, system: UnitSystem) {
    println!("\n  {name}");
    line("Reaction", Quantity::Force.format(group.reaction_lbf, system, 1));
    line("Shear per bolt", Quantity::Force.format(group.per_bolt_shear_lbf, system, 1));
    line("Shear stress τ", Quantity::Stress.format(group.shear_stress_psi, system, 1));
    line("Allowable τ", Quantity::Stress.format(group.allowable_shear_psi, system, 1));
    line("Utilization", format!("{:.1} %", group.utilization_percent));
    line("Status", group.status.to_string());
}

// ============================================================================
// Gasket
// ============================================================================

fn handle_gasket(input: Option<&Path>, nut_factor: f64, system: UnitSystem, format: OutputFormat) -> Result<i32> {
    if !(nut_factor.is_finite() && nut_factor > 0.0) {
        bail!("Nut factor must be > 0 (got {nut_factor})");
    }
    if !NUT_FACTOR_OPTIONS.contains(&nut_factor) {
        warn!(nut_factor, options = ?NUT_FACTOR_OPTIONS, "nut factor is not one of the standard options");
    }

    let rows: Vec<GasketRowInput> = match input {
        Some(path) => load_input(path).with_context(|| format!("Failed to read rows {}", path.display()))?,
        None => gasket::default_rows(),
    };
    let params = GasketCalcParams {
        nut_factor,
        unit_system: system,
    };

    let outcomes = gasket::calculate_rows(&rows, &params);
    match format {
        OutputFormat::Json => print_json(&outcomes)?,
        OutputFormat::Human => print_gasket(&outcomes, &params),
    }

    let all_valid = outcomes.iter().all(|o| o.validation.ok);
    Ok(if all_valid { 0 } else { EXIT_INVALID })
}

fn print_gasket(outcomes: &[RowOutcome], params: &GasketCalcParams) {
    let system = params.unit_system;
    heading(&format!("GASKET STRESS (K = {})", params.nut_factor), system);

    for outcome in outcomes {
        println!("\n  {}", outcome.id.display_name());
        match &outcome.result {
            Some(r) => {
                line("Load per stud", Quantity::Force.format(r.load_per_stud_lbf, system, 1));
                line("Total bolt load", Quantity::Force.format(r.total_bolt_load_lbf, system, 1));
                line("Pressure load", Quantity::Force.format(r.pressure_load_lbf, system, 1));
                line("Gasket stress", Quantity::Stress.format(r.gasket_stress_psi, system, 1));
                line("Torque per stud", Quantity::Torque.format(r.torque_ftlbf, system, 1));
            }
            None => {
                for error in &outcome.validation.errors {
                    println!("    - {error}");
                }
            }
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Serialize)]
struct Tables<'a> {
    bolt_sizes: &'a [materials::BoltSizeSpec],
    materials: &'a [materials::MaterialSpec],
    studs: &'a [materials::StudSpec],
    nut_factors: &'a [f64],
}

fn handle_tables(format: OutputFormat) -> Result<i32> {
    let tables = Tables {
        bolt_sizes: materials::bolt_sizes(),
        materials: materials::materials(),
        studs: materials::stud_specs(),
        nut_factors: &NUT_FACTOR_OPTIONS,
    };

    if format == OutputFormat::Json {
        print_json(&tables)?;
        return Ok(0);
    }

    println!("\nBolt sizes");
    for bolt in tables.bolt_sizes {
        println!("  {:<16} At = {:.3} in²", bolt.key, bolt.tensile_area_in2);
    }
    println!("\nMaterials");
    for mat in tables.materials {
        println!("  {:<16} Sy = {:.1} ksi", mat.key, mat.yield_strength_ksi);
    }
    println!("\nStuds");
    for stud in tables.studs {
        println!("  {:<16} d = {:.4} in   At = {:.4} in²", stud.key, stud.diameter_in, stud.tensile_area_in2);
    }
    println!("\nNut factors");
    for k in tables.nut_factors {
        println!("  {k}");
    }
    Ok(0)
}

// ============================================================================
// Worksheet
// ============================================================================

fn handle_worksheet(path: &Path, save: bool, units: Option<UnitsArg>, format: OutputFormat) -> Result<i32> {
    let mut worksheet: Worksheet =
        load_worksheet(path).with_context(|| format!("Failed to load worksheet {}", path.display()))?;
    let system = units.map(UnitSystem::from).unwrap_or(worksheet.settings.unit_system);

    let validation = worksheet.calculate_all();

    if save {
        save_worksheet(&worksheet, path).with_context(|| format!("Failed to save worksheet {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => print_json(&worksheet)?,
        OutputFormat::Human => {
            let meta = &worksheet.meta;
            println!("Job {} | {} | {}", meta.job_id, meta.client, meta.engineer);

            match worksheet.beam.output() {
                Some(out) => print_beam(out, system),
                None => print_messages("LIFTING BEAM", &validation.beam, system),
            }
            match worksheet.bolt_shear.output() {
                Some(out) => print_bolt_shear(worksheet.bolt_shear.input(), out, system),
                None => print_messages("BOLT SHEAR", &validation.bolt_shear, system),
            }
            if let Some(outcomes) = worksheet.gasket.output() {
                let params = GasketCalcParams {
                    unit_system: system,
                    ..worksheet.gasket.input().params
                };
                print_gasket(outcomes, &params);
            }
        }
    }

    let all_valid = validation.beam.ok && validation.bolt_shear.ok && validation.gasket.ok;
    Ok(if all_valid { 0 } else { EXIT_INVALID })
}

fn print_messages(title: &str, validation: &Validation, system: UnitSystem) {
    heading(title, system);
    for error in &validation.errors {
        println!("  - {error}");
    }
}
