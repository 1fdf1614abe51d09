use serde::{Deserialize, Serialize};

/// Alert severity (spec.md §4.4 item 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warn,
    Critical,
}

/// Kinds of threshold crossing the room process watches for. Pressure
/// thresholds are referenced in spec.md §4.4 but no concrete band is
/// given anywhere in the source material, so only the composition
/// thresholds that ARE specified are implemented here (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    OxygenLow,
    CarbonDioxideHigh,
    AmmoniaHigh,
    Decomposition,
}

/// One alert, append-only within an experiment (spec.md §3, §4.4).
/// `time_elapsed_s` is simulated time, not wall-clock — alerts must be
/// reproducible from identical input sequences (spec.md invariant 8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub time_elapsed_s: f64,
    pub severity: AlertSeverity,
    pub kind: AlertKind,
    pub message: String,
}
