//! Per-tick engine inputs (spec.md §6), collected into one struct and
//! applied atomically at the start of each `advance` call (spec.md §5
//! "Ordering guarantees").

use serde::{Deserialize, Serialize};
use tse_core::ids::SubstanceId;

/// Where the pot currently sits (spec.md §6 `set_pot_position`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PotZone {
    #[default]
    OffBurner,
    OverBurner,
    UnderTap,
}

/// The full set of external inputs the engine reacts to. `set_*`
/// methods on [`crate::Engine`] mutate a pending copy of this struct;
/// `advance` copies it into the tick's applied inputs before
/// integrating, so every sub-step within one `advance` call observes
/// the same inputs (spec.md §5).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInputs {
    pub burner_step_index: usize,
    pub pot_zone: PotZone,
    pub substance_id: Option<SubstanceId>,
    pub ac_enabled: bool,
    pub ac_setpoint_c: f64,
    pub air_handler_on: bool,
    /// Non-negative speed multiplier; caller owns the speed ladder
    /// (spec.md §6: "0 = pause. Caller owns the speed ladder.").
    pub speed_multiplier: f64,
    /// Pause overrides `speed_multiplier` to 0 without clearing it
    /// (spec.md §4.5): un-pausing resumes at the previously-set speed.
    pub paused: bool,
    pub altitude_m: f64,
}

impl Default for EngineInputs {
    fn default() -> Self {
        EngineInputs {
            burner_step_index: 0,
            pot_zone: PotZone::OffBurner,
            substance_id: None,
            ac_enabled: false,
            ac_setpoint_c: 20.0,
            air_handler_on: false,
            speed_multiplier: 1.0,
            paused: false,
            altitude_m: 0.0,
        }
    }
}

impl EngineInputs {
    /// Speed actually applied to this tick's integration: 0 while
    /// paused, regardless of the stored `speed_multiplier` (spec.md
    /// §4.5: "Pause flags ... override speed to 0 without clearing
    /// it").
    pub fn effective_speed(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            self.speed_multiplier
        }
    }
}
