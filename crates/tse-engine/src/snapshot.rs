//! Pure value objects published at observable-tick cadence (spec.md
//! §4.5, §6). Consumers never read live engine state — every field
//! here is a copy, not a reference into the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tse_pot::{BoilEvent, PotPhase};
use tse_room::Alert;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotSnapshot {
    pub substance_id: Option<String>,
    pub phase: PotPhase,
    pub total_mass_kg: f64,
    pub residue_mass_kg: f64,
    pub liquid_mass_kg: f64,
    pub temperature_c: f64,
    pub effective_boiling_point_c: f64,
    pub is_boiling: bool,
    pub time_on_flame_s: f64,
    pub time_elapsed_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub temperature_c: f64,
    pub pressure_pa: f64,
    pub composition: HashMap<String, f64>,
    pub ac_enabled: bool,
    pub ac_setpoint_c: f64,
    pub air_handler_on: bool,
}

/// Non-fatal extrapolation status, carried until conditions change
/// (spec.md §4.3 failure semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExtrapolationFlag {
    pub antoine_extrapolated: bool,
}

/// The engine's sole output (spec.md §6): one per observable tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sim_time_s: f64,
    pub pot: PotSnapshot,
    pub room: Option<RoomSnapshot>,
    pub alerts_new: Vec<Alert>,
    pub boil_event: Option<BoilEvent>,
    pub decomposition_halted: bool,
    pub extrapolation: ExtrapolationFlag,
}
