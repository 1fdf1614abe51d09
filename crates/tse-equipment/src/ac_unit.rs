use crate::error::{EquipmentError, EquipmentResult};
use serde::Deserialize;
use std::path::Path;
use tse_formulas::PidGains;

/// An AC unit record (spec.md §3): climate control for a room, driven
/// by a PID loop in `tse-room`.
#[derive(Debug, Clone, Deserialize)]
pub struct AcUnit {
    pub id: String,
    pub cooling_max_w: f64,
    pub heating_max_w: f64,
    pub deadband_c: f64,
    pub pid: PidGains,
    pub integral_windup_limit: f64,
    pub min_setpoint_c: f64,
    pub max_setpoint_c: f64,
    pub max_rate_of_change_c_per_s: f64,
}

impl AcUnit {
    pub fn validate(&self, path: &Path) -> EquipmentResult<()> {
        if self.cooling_max_w < 0.0 || self.heating_max_w < 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "cooling_max_w and heating_max_w must be non-negative".to_string(),
            });
        }
        if self.deadband_c < 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "deadband_c must be non-negative".to_string(),
            });
        }
        if self.min_setpoint_c >= self.max_setpoint_c {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "min_setpoint_c must be < max_setpoint_c".to_string(),
            });
        }
        if self.max_rate_of_change_c_per_s <= 0.0 {
            return Err(EquipmentError::Invalid {
                path: path.to_path_buf(),
                reason: "max_rate_of_change_c_per_s must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn clamp_setpoint(&self, setpoint_c: f64) -> f64 {
        setpoint_c.clamp(self.min_setpoint_c, self.max_setpoint_c)
    }

    /// Map a PID output (already in watts — the AC unit's gains are
    /// tuned in W/°C) linearly into `[-cooling_max_w, +heating_max_w]`
    /// (spec.md §4.4 item 1): positive output heats, negative cools.
    pub fn output_to_watts(&self, pid_output: f64) -> f64 {
        pid_output.clamp(-self.cooling_max_w, self.heating_max_w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> AcUnit {
        AcUnit {
            id: "standard".to_string(),
            cooling_max_w: 1500.0,
            heating_max_w: 1000.0,
            deadband_c: 0.5,
            pid: PidGains {
                kp: 200.0,
                ki: 10.0,
                kd: 5.0,
            },
            integral_windup_limit: 50.0,
            min_setpoint_c: 16.0,
            max_setpoint_c: 28.0,
            max_rate_of_change_c_per_s: 0.05,
        }
    }

    #[test]
    fn valid_ac_unit_passes() {
        assert!(sample().validate(&PathBuf::new()).is_ok());
    }

    #[test]
    fn rejects_inverted_setpoint_range() {
        let mut ac = sample();
        ac.min_setpoint_c = 30.0;
        assert!(ac.validate(&PathBuf::new()).is_err());
    }

    #[test]
    fn clamp_setpoint_respects_range() {
        let ac = sample();
        assert_eq!(ac.clamp_setpoint(10.0), 16.0);
        assert_eq!(ac.clamp_setpoint(40.0), 28.0);
        assert_eq!(ac.clamp_setpoint(22.0), 22.0);
    }

    #[test]
    fn output_to_watts_maps_positive_to_heating_and_negative_to_cooling() {
        let ac = sample();
        assert!((ac.output_to_watts(5000.0) - 1000.0).abs() < 1e-9);
        assert!((ac.output_to_watts(-5000.0) - (-1500.0)).abs() < 1e-9);
        assert_eq!(ac.output_to_watts(0.0), 0.0);
    }
}
