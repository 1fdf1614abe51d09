use crate::error::{EquipmentError, EquipmentResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// How room pressure is computed (spec.md §3, §9 Open Questions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureMode {
    Sealevel,
    Location,
    Custom,
}

/// A room config record (spec.md §3): the static shell the room
/// process integrates within.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    pub volume_m3: f64,
    pub initial_temp_c: f64,
    pub heat_capacity_j_per_c: f64,
    pub initial_composition: HashMap<String, f64>,
    pub pressure_mode: PressureMode,
}

impl RoomConfig {
    pub fn validate(&self, path: &Path) -> EquipmentResult<()> {
        if self.volume_m3 <= 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "volume_m3 must be positive".to_string(),
            });
        }
        if self.heat_capacity_j_per_c <= 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "heat_capacity_j_per_c must be positive".to_string(),
            });
        }
        let total: f64 = self.initial_composition.values().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: format!("initial_composition must sum to 1, got {total}"),
            });
        }
        Ok(())
    }
}
