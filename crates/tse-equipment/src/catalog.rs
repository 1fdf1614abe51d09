use crate::ac_unit::AcUnit;
use crate::air_handler::AirHandler;
use crate::burner::Burner;
use crate::error::{EquipmentError, EquipmentResult};
use crate::room_config::RoomConfig;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Burners, AC units, air handlers, and the room shell, loaded from
/// `room.json`, `burners/*.json`, `ac-units/*.json`, `air-handlers/*.json`
/// (spec.md §6). Read-only and cheap to clone after load, same pattern
/// as `tse_substances::SubstanceCatalog`.
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    inner: Arc<EquipmentCatalogInner>,
}

#[derive(Debug)]
struct EquipmentCatalogInner {
    room: RoomConfig,
    burners: HashMap<String, Burner>,
    ac_units: HashMap<String, AcUnit>,
    air_handlers: HashMap<String, AirHandler>,
}

impl EquipmentCatalog {
    pub fn load_all(root: &Path) -> EquipmentResult<Self> {
        if !root.is_dir() {
            return Err(EquipmentError::Missing {
                path: root.to_path_buf(),
            });
        }

        let room_path = root.join("room.json");
        let room: RoomConfig = read_json(&room_path)?;
        room.validate(&room_path)?;

        let burners = load_dir(&root.join("burners"), |b: &Burner, p| b.validate(p))?;
        let ac_units = load_dir(&root.join("ac-units"), |a: &AcUnit, p| a.validate(p))?;
        let air_handlers = load_dir(&root.join("air-handlers"), |h: &AirHandler, p| {
            h.validate(p)
        })?;

        Ok(Self {
            inner: Arc::new(EquipmentCatalogInner {
                room,
                burners,
                ac_units,
                air_handlers,
            }),
        })
    }

    pub fn room(&self) -> &RoomConfig {
        &self.inner.room
    }

    pub fn burner(&self, id: &str) -> EquipmentResult<&Burner> {
        self.inner
            .burners
            .get(id)
            .ok_or_else(|| EquipmentError::Invalid {
                path: PathBuf::from("burners"),
                reason: format!("unknown burner id '{id}'"),
            })
    }

    pub fn ac_unit(&self, id: &str) -> EquipmentResult<&AcUnit> {
        self.inner
            .ac_units
            .get(id)
            .ok_or_else(|| EquipmentError::Invalid {
                path: PathBuf::from("ac-units"),
                reason: format!("unknown AC unit id '{id}'"),
            })
    }

    pub fn air_handler(&self, id: &str) -> EquipmentResult<&AirHandler> {
        self.inner
            .air_handlers
            .get(id)
            .ok_or_else(|| EquipmentError::Invalid {
                path: PathBuf::from("air-handlers"),
                reason: format!("unknown air handler id '{id}'"),
            })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> EquipmentResult<T> {
    let raw = fs::read_to_string(path).map_err(|source| EquipmentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| EquipmentError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn load_dir<T, V>(dir: &Path, validate: V) -> EquipmentResult<HashMap<String, T>>
where
    T: serde::de::DeserializeOwned + HasId,
    V: Fn(&T, &Path) -> EquipmentResult<()>,
{
    let mut out = HashMap::new();
    if !dir.is_dir() {
        return Ok(out);
    }
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| EquipmentError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    entries.sort();

    for entry in entries {
        let record: T = read_json(&entry)?;
        validate(&record, &entry)?;
        out.insert(record.id().to_string(), record);
    }
    Ok(out)
}

trait HasId {
    fn id(&self) -> &str;
}

impl HasId for Burner {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for AcUnit {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for AirHandler {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn loads_full_equipment_tree() {
        let dir = std::env::temp_dir().join(format!(
            "tse_equipment_test_{}",
            std::process::id()
        ));

        write_file(
            &dir.join("room.json"),
            r#"{
                "volume_m3": 30.0,
                "initial_temp_c": 20.0,
                "heat_capacity_j_per_c": 36000.0,
                "initial_composition": {"n2": 0.78, "o2": 0.21, "co2": 0.01},
                "pressure_mode": "sealevel"
            }"#,
        );
        write_file(
            &dir.join("burners/range-top.json"),
            r#"{
                "id": "range-top",
                "max_watts": 3000.0,
                "min_watts": 0.0,
                "efficiency": 0.85,
                "wattage_steps": [0.0, 500.0, 1000.0, 2000.0, 3000.0]
            }"#,
        );
        write_file(
            &dir.join("ac-units/standard.json"),
            r#"{
                "id": "standard",
                "cooling_max_w": 1500.0,
                "heating_max_w": 1000.0,
                "deadband_c": 0.5,
                "pid": {"kp": 200.0, "ki": 10.0, "kd": 5.0},
                "integral_windup_limit": 50.0,
                "min_setpoint_c": 16.0,
                "max_setpoint_c": 28.0,
                "max_rate_of_change_c_per_s": 0.05
            }"#,
        );
        write_file(
            &dir.join("air-handlers/hvac-1.json"),
            r#"{
                "id": "hvac-1",
                "max_flow_m3_per_h": 360.0,
                "filtration_efficiency": {"toxic_generic": 0.8},
                "target_composition": {"n2": 0.78, "o2": 0.21, "co2": 0.01},
                "modes": {"off": 0.0, "high": 100.0}
            }"#,
        );

        let catalog = EquipmentCatalog::load_all(&dir).unwrap();
        assert_eq!(catalog.room().volume_m3, 30.0);
        assert!(catalog.burner("range-top").is_ok());
        assert!(catalog.ac_unit("standard").is_ok());
        assert!(catalog.air_handler("hvac-1").is_ok());
        assert!(catalog.burner("nonexistent").is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_room_json_errors() {
        let dir = std::env::temp_dir().join(format!(
            "tse_equipment_test_missing_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let err = EquipmentCatalog::load_all(&dir).unwrap_err();
        assert!(matches!(err, EquipmentError::Io { .. }));
        fs::remove_dir_all(&dir).ok();
    }
}
