//! Interface-only types for the external adapters spec.md §1 and §9
//! place outside the engine: altitude-from-location lookup and the
//! scene I/O contract. The engine never performs network or rendering
//! I/O — it only defines the shapes already-resolved values must take
//! before `Engine::set_altitude`/equivalent inputs can consume them
//! (spec.md §5: "the engine receives already-resolved values").

use serde::{Deserialize, Serialize};

/// The result of an external altitude-from-location lookup, already
/// resolved by the caller before being handed to
/// [`crate::Engine::set_altitude`]. The engine performs no geocoding
/// or network I/O itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub altitude_m: f64,
}

/// A command the external scene issues to the engine — the
/// value-object side of the "drag-and-drop scene" boundary (spec.md
/// §1). Carried here purely as a stable shape for adapters to target;
/// [`crate::Engine::apply_scene_command`] maps each variant onto the
/// matching `set_*` method one to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneCommand {
    SetBurnerStep(u32),
    SetPotPosition(crate::inputs::PotZone),
    SetSubstance(String),
    SetAltitude(f64),
    SetAc { enabled: bool, setpoint_c: f64 },
    SetAirHandler(bool),
    SetSpeed(f64),
}
