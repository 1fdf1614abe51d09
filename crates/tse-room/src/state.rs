use crate::alert::{Alert, AlertSeverity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tse_formulas::PidState;

/// One entry in the room's rolling heat log (spec.md §3 `heat_log`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatLogEntry {
    pub time_elapsed_s: f64,
    pub net_heat_w: f64,
    pub temperature_c: f64,
}

/// One entry in the room's rolling composition log (spec.md §3
/// `composition_log`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionLogEntry {
    pub time_elapsed_s: f64,
    pub composition: HashMap<String, f64>,
}

/// Mutable room state (spec.md §3). Created when an experiment enters
/// room-controls scope and persists until experiment change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub temperature_c: f64,
    pub pressure_pa: f64,
    pub composition: HashMap<String, f64>,
    /// Total moles implied by `composition`, the reference count fixed
    /// at room initialization and mutated only by vapor ingress and
    /// scrubber exchange (spec.md §3 invariant).
    pub total_moles: f64,
    pub ac_enabled: bool,
    pub ac_setpoint_c: f64,
    pub ac_pid_state: PidState,
    pub air_handler_on: bool,
    pub air_handler_mode: String,
    /// Once true, pressure is computed from `total_moles`/temperature
    /// rather than tracked from ISA(altitude) directly — set the first
    /// time vapor enters the room or the air handler runs (spec.md
    /// §4.4 item 3's "simpler mode"; see DESIGN.md).
    pub pressure_dynamic: bool,
    pub heat_log: Vec<HeatLogEntry>,
    pub composition_log: Vec<CompositionLogEntry>,
    pub alerts: Vec<Alert>,
    pub time_elapsed_s: f64,
    /// Previously-active O2 alert band (none/warn/critical), tracked so
    /// `room_step` emits one alert per threshold crossing rather than
    /// one per tick the condition holds (spec.md §4.4 item 4).
    pub o2_alert_band: Option<AlertSeverity>,
    pub co2_alert_active: bool,
    pub nh3_alert_active: bool,
}

impl RoomState {
    pub fn new(
        temperature_c: f64,
        pressure_pa: f64,
        composition: HashMap<String, f64>,
        total_moles: f64,
    ) -> Self {
        RoomState {
            temperature_c,
            pressure_pa,
            composition,
            total_moles,
            ac_enabled: false,
            ac_setpoint_c: temperature_c,
            ac_pid_state: PidState::default(),
            air_handler_on: false,
            air_handler_mode: "off".to_string(),
            pressure_dynamic: false,
            heat_log: Vec::new(),
            composition_log: Vec::new(),
            alerts: Vec::new(),
            time_elapsed_s: 0.0,
            o2_alert_band: None,
            co2_alert_active: false,
            nh3_alert_active: false,
        }
    }

    pub fn composition_sum(&self) -> f64 {
        self.composition.values().sum()
    }
}
