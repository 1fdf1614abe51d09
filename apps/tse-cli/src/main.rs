//! tse-cli: a thin dev CLI over the engine. Not part of the core
//! simulation — `validate` schema-checks a catalog tree and `simulate`
//! drives the engine for a fixed number of observable ticks, emitting
//! one JSON snapshot per line to stdout and freezing any scorecards
//! produced along the way to the catalog's `.tse/scorecards` store.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tse_engine::{Engine, EngineConfig, EngineInputs, Experiment, PotZone};
use tse_equipment::EquipmentCatalog;
use tse_substances::SubstanceCatalog;

#[derive(Parser)]
#[command(name = "tse-cli")]
#[command(about = "Thermodynamic simulation engine dev CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schema-validate a catalog tree (substances/ and equipment/ under the given root).
    Validate {
        /// Root directory containing `substances/` and `equipment/`.
        catalog_root: PathBuf,
    },
    /// Run a scenario for a fixed number of observable ticks, emitting one snapshot per line.
    Simulate {
        /// Path to a scenario JSON file.
        #[arg(long)]
        scenario: PathBuf,
        /// Number of observable ticks to advance.
        #[arg(long)]
        ticks: u32,
    },
}

/// Exit codes per spec.md §6: 0 ok, 2 validation error, 3 runtime halt.
const EXIT_OK: u8 = 0;
const EXIT_VALIDATION_ERROR: u8 = 2;
const EXIT_RUNTIME_HALT: u8 = 3;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Validate { catalog_root } => cmd_validate(&catalog_root),
        Commands::Simulate { scenario, ticks } => cmd_simulate(&scenario, ticks),
    };
    ExitCode::from(code)
}

fn cmd_validate(catalog_root: &Path) -> u8 {
    let substances_root = catalog_root.join("substances");
    let equipment_root = catalog_root.join("equipment");

    match SubstanceCatalog::load_all(&substances_root) {
        Ok((catalog, warnings)) => {
            println!("substances: ok ({} loaded)", catalog.len());
            for warning in warnings {
                eprintln!("warning: {warning}");
            }
        }
        Err(err) => {
            eprintln!("substance catalog invalid: {err}");
            return EXIT_VALIDATION_ERROR;
        }
    }

    match EquipmentCatalog::load_all(&equipment_root) {
        Ok(_) => println!("equipment: ok"),
        Err(err) => {
            eprintln!("equipment catalog invalid: {err}");
            return EXIT_VALIDATION_ERROR;
        }
    }

    println!("\u{2713} catalog at {} is valid", catalog_root.display());
    EXIT_OK
}

/// The on-disk shape a scenario file loads into — distinct from
/// `EngineInputs` because `EngineInputs` carries no `Deserialize` impl
/// of its own (the engine's input surface is the `set_*` methods, not
/// a wire format).
#[derive(Debug, Clone, Deserialize)]
struct ScenarioFile {
    substances_root: PathBuf,
    equipment_root: PathBuf,
    burner_id: String,
    ac_unit_id: String,
    air_handler_id: String,
    #[serde(default)]
    experiments: Vec<Experiment>,
    #[serde(default = "default_tick_dt_s")]
    tick_dt_s: f64,
    /// One entry per tick; the last entry repeats if `ticks` exceeds
    /// the list length.
    #[serde(default)]
    inputs: Vec<ScenarioTickInput>,
}

fn default_tick_dt_s() -> f64 {
    0.1
}

#[derive(Debug, Clone, Deserialize)]
struct ScenarioTickInput {
    #[serde(default)]
    burner_step_index: usize,
    #[serde(default)]
    pot_zone: PotZone,
    #[serde(default)]
    substance_id: Option<String>,
    #[serde(default)]
    ac_enabled: bool,
    #[serde(default = "default_setpoint_c")]
    ac_setpoint_c: f64,
    #[serde(default)]
    air_handler_on: bool,
    #[serde(default = "default_speed_multiplier")]
    speed_multiplier: f64,
    #[serde(default)]
    paused: bool,
    #[serde(default)]
    altitude_m: f64,
}

fn default_setpoint_c() -> f64 {
    20.0
}

fn default_speed_multiplier() -> f64 {
    1.0
}

impl From<ScenarioTickInput> for EngineInputs {
    fn from(t: ScenarioTickInput) -> Self {
        EngineInputs {
            burner_step_index: t.burner_step_index,
            pot_zone: t.pot_zone,
            substance_id: t.substance_id.map(tse_core::ids::SubstanceId::new),
            ac_enabled: t.ac_enabled,
            ac_setpoint_c: t.ac_setpoint_c,
            air_handler_on: t.air_handler_on,
            speed_multiplier: t.speed_multiplier,
            paused: t.paused,
            altitude_m: t.altitude_m,
        }
    }
}

fn cmd_simulate(scenario_path: &Path, ticks: u32) -> u8 {
    let raw = match std::fs::read_to_string(scenario_path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read scenario {}: {err}", scenario_path.display());
            return EXIT_VALIDATION_ERROR;
        }
    };
    let scenario: ScenarioFile = match serde_json::from_str(&raw) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("scenario {} is malformed: {err}", scenario_path.display());
            return EXIT_VALIDATION_ERROR;
        }
    };

    let (substances, _warnings) = match SubstanceCatalog::load_all(&scenario.substances_root) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("substance catalog invalid: {err}");
            return EXIT_VALIDATION_ERROR;
        }
    };
    let equipment = match EquipmentCatalog::load_all(&scenario.equipment_root) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("equipment catalog invalid: {err}");
            return EXIT_VALIDATION_ERROR;
        }
    };

    let config = EngineConfig {
        burner_id: scenario.burner_id.clone(),
        ac_unit_id: scenario.ac_unit_id.clone(),
        air_handler_id: scenario.air_handler_id.clone(),
        experiments: scenario.experiments.clone(),
    };
    let mut engine = Engine::new(config);
    engine.load_catalogs(substances, equipment);

    if scenario.inputs.is_empty() {
        eprintln!("scenario has no `inputs`; nothing to drive the engine with");
        return EXIT_VALIDATION_ERROR;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    use std::io::Write;

    for tick in 0..ticks {
        let frame = scenario.inputs[(tick as usize).min(scenario.inputs.len() - 1)].clone();
        engine.apply_inputs(EngineInputs::from(frame));

        let snapshot = match engine.advance(scenario.tick_dt_s) {
            Ok(snap) => snap,
            Err(err) => {
                eprintln!("engine halted at tick {tick}: {err}");
                return EXIT_RUNTIME_HALT;
            }
        };

        let line = match serde_json::to_string(&snapshot) {
            Ok(line) => line,
            Err(err) => {
                eprintln!("failed to serialize snapshot: {err}");
                return EXIT_RUNTIME_HALT;
            }
        };
        if writeln!(out, "{line}").is_err() {
            break;
        }
    }

    let run_root = scenario_path.parent().unwrap_or_else(|| Path::new("."));
    persist_scorecards(run_root, engine.scorecards())
}

/// Freeze every scorecard the run produced to `<scenario's directory>/.tse/scorecards`
/// (spec.md §4.6: scorecards are the canonical export payload). Persistence
/// failures are reported but don't turn a successful simulation into a
/// runtime halt.
fn persist_scorecards(catalog_root: &Path, scorecards: &[tse_engine::Scorecard]) -> u8 {
    if scorecards.is_empty() {
        return EXIT_OK;
    }

    let store = match tse_results::for_catalog_root(catalog_root) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("warning: could not open scorecard store: {err}");
            return EXIT_OK;
        }
    };

    let timestamp = chrono::Utc::now().to_rfc3339();
    for scorecard in scorecards {
        match store.save_scorecard(&scorecard.experiment_id, scorecard, timestamp.clone()) {
            Ok(manifest) => eprintln!("scorecard saved: {}", manifest.run_id),
            Err(err) => eprintln!("warning: failed to save scorecard: {err}"),
        }
    }

    EXIT_OK
}
