use crate::error::{EquipmentError, EquipmentResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The fallback key used when a species has no dedicated filtration
/// efficiency entry (spec.md §4.4: "unknown species use the record's
/// `toxic_generic` efficiency").
pub const TOXIC_GENERIC_KEY: &str = "toxic_generic";

/// An air handler record (spec.md §3): scrubs room atmosphere toward a
/// target composition at a mode-selected flow rate.
#[derive(Debug, Clone, Deserialize)]
pub struct AirHandler {
    pub id: String,
    pub max_flow_m3_per_h: f64,
    pub filtration_efficiency: HashMap<String, f64>,
    pub target_composition: HashMap<String, f64>,
    pub modes: HashMap<String, f64>,
}

impl AirHandler {
    pub fn validate(&self, path: &Path) -> EquipmentResult<()> {
        if self.max_flow_m3_per_h <= 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "max_flow_m3_per_h must be positive".to_string(),
            });
        }
        for (species, eff) in &self.filtration_efficiency {
            if !(0.0..=1.0).contains(eff) {
                return Err(EquipmentError::Invalid {
                    path: path.to_path_buf(),
                    reason: format!(
                        "filtration_efficiency[{species}] must be in [0,1], got {eff}"
                    ),
                });
            }
        }
        let total: f64 = self.target_composition.values().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: format!("target_composition must sum to 1, got {total}"),
            });
        }
        if self.modes.is_empty() {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "modes must declare at least one flow setting".to_string(),
            });
        }
        for (mode, flow_percent) in &self.modes {
            if !(0.0..=100.0).contains(flow_percent) {
                return Err(EquipmentError::Invalid {
                    path: path.to_path_buf(),
                    reason: format!("modes[{mode}] flow_percent must be in [0,100], got {flow_percent}"),
                });
            }
        }
        Ok(())
    }

    /// Filtration efficiency for `species_id`, falling back to
    /// `toxic_generic` and finally to 0 if neither is declared.
    pub fn efficiency_for(&self, species_id: &str) -> f64 {
        self.filtration_efficiency
            .get(species_id)
            .or_else(|| self.filtration_efficiency.get(TOXIC_GENERIC_KEY))
            .copied()
            .unwrap_or(0.0)
    }

    /// Volumetric flow rate for `mode` in m^3/s, or 0 if the mode is
    /// unknown or the handler is off.
    pub fn flow_m3_per_s(&self, mode: &str) -> f64 {
        let percent = self.modes.get(mode).copied().unwrap_or(0.0);
        self.max_flow_m3_per_h * (percent / 100.0) / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> AirHandler {
        AirHandler {
            id: "hvac-1".to_string(),
            max_flow_m3_per_h: 360.0,
            filtration_efficiency: HashMap::from([
                ("co2".to_string(), 0.3),
                (TOXIC_GENERIC_KEY.to_string(), 0.8),
            ]),
            target_composition: HashMap::from([
                ("n2".to_string(), 0.78),
                ("o2".to_string(), 0.21),
                ("co2".to_string(), 0.01),
            ]),
            modes: HashMap::from([("off".to_string(), 0.0), ("high".to_string(), 100.0)]),
        }
    }

    #[test]
    fn valid_air_handler_passes() {
        assert!(sample().validate(&PathBuf::new()).is_ok());
    }

    #[test]
    fn rejects_target_composition_not_summing_to_one() {
        let mut h = sample();
        h.target_composition.insert("ar".to_string(), 0.5);
        assert!(h.validate(&PathBuf::new()).is_err());
    }

    #[test]
    fn unknown_species_falls_back_to_toxic_generic() {
        let h = sample();
        assert!((h.efficiency_for("nh3") - 0.8).abs() < 1e-9);
        assert!((h.efficiency_for("co2") - 0.3).abs() < 1e-9);
    }

    #[test]
    fn flow_scales_with_mode_percent() {
        let h = sample();
        assert_eq!(h.flow_m3_per_s("off"), 0.0);
        assert!((h.flow_m3_per_s("high") - 0.1).abs() < 1e-9);
    }
}
