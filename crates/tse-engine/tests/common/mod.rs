//! Shared scenario fixtures for the crate's integration tests
//! (spec.md §8 scenarios S2, S4, S5, S6). Each helper writes a
//! throwaway catalog tree to a temp dir, loads it, and removes the
//! tree again — the same pattern `tse-engine`'s own inline tests use.

use tse_engine::{Engine, EngineConfig, Experiment, PotZone};
use tse_equipment::EquipmentCatalog;
use tse_substances::SubstanceCatalog;

#[allow(dead_code)]
pub fn equipment_catalog(pressure_mode: &str) -> EquipmentCatalog {
    let dir = std::env::temp_dir().join(format!(
        "tse_engine_itest_equipment_{}_{}",
        std::process::id(),
        pressure_mode
    ));
    std::fs::create_dir_all(dir.join("burners")).unwrap();
    std::fs::create_dir_all(dir.join("ac-units")).unwrap();
    std::fs::create_dir_all(dir.join("air-handlers")).unwrap();
    std::fs::write(
        dir.join("room.json"),
        format!(
            r#"{{"volume_m3":30.0,"initial_temp_c":20.0,"heat_capacity_j_per_c":36000.0,
               "initial_composition":{{"n2":0.78,"o2":0.21,"co2":0.01}},"pressure_mode":"{pressure_mode}"}}"#
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join("burners/range-top.json"),
        r#"{"id":"range-top","max_watts":3000.0,"min_watts":0.0,"efficiency":1.0,
           "wattage_steps":[0.0,500.0,1000.0,2000.0,3000.0]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("ac-units/standard.json"),
        r#"{"id":"standard","cooling_max_w":1500.0,"heating_max_w":1000.0,"deadband_c":0.5,
           "pid":{"kp":200.0,"ki":10.0,"kd":5.0},"integral_windup_limit":50.0,
           "min_setpoint_c":16.0,"max_setpoint_c":28.0,"max_rate_of_change_c_per_s":0.05}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("air-handlers/hvac-1.json"),
        r#"{"id":"hvac-1","max_flow_m3_per_h":360.0,
           "filtration_efficiency":{"toxic_generic":0.8,"co2":0.3},
           "target_composition":{"n2":0.78,"o2":0.21,"co2":0.01},
           "modes":{"off":0.0,"high":100.0}}"#,
    )
    .unwrap();

    let catalog = EquipmentCatalog::load_all(&dir).unwrap();
    std::fs::remove_dir_all(&dir).ok();
    catalog
}

#[allow(dead_code)]
pub fn substance_catalog_with(kind_dir: &str, filename: &str, body: &str) -> SubstanceCatalog {
    let dir = std::env::temp_dir().join(format!(
        "tse_engine_itest_substances_{}_{}",
        std::process::id(),
        filename
    ));
    std::fs::create_dir_all(dir.join(kind_dir)).unwrap();
    std::fs::write(dir.join(kind_dir).join(filename), body).unwrap();
    let (catalog, _) = SubstanceCatalog::load_all(&dir).unwrap();
    std::fs::remove_dir_all(&dir).ok();
    catalog
}

#[allow(dead_code)]
pub fn water_catalog() -> SubstanceCatalog {
    substance_catalog_with(
        "compounds",
        "water.json",
        r#"{"id":"water","name":"Water","molar_mass_kg_per_mol":0.018015,
           "phase_at_ambient":"liquid",
           "specific_heat_j_per_g_c":{"liquid":4.186,"gas":1.996,"solid":2.05},
           "latent_heat_vap_kj_per_kg":2257.0,"latent_heat_fus_kj_per_kg":334.0,
           "antoine":{"A":8.07131,"B":1730.63,"C":233.426,"t_min_c":1.0,"t_max_c":100.0},
           "melting_point_c":0.0,"boiling_point_sea_level_c":100.0}"#,
    )
}

#[allow(dead_code)]
pub fn ethanol_catalog() -> SubstanceCatalog {
    substance_catalog_with(
        "compounds",
        "ethanol.json",
        r#"{"id":"ethanol","name":"Ethanol","molar_mass_kg_per_mol":0.04607,
           "phase_at_ambient":"liquid",
           "specific_heat_j_per_g_c":{"liquid":2.44,"gas":1.43,"solid":1.4},
           "latent_heat_vap_kj_per_kg":841.0,"latent_heat_fus_kj_per_kg":108.0,
           "antoine":{"A":8.20417,"B":1642.89,"C":230.3,"t_min_c":-20.0,"t_max_c":93.0},
           "melting_point_c":-114.1,"boiling_point_sea_level_c":78.37}"#,
    )
}

#[allow(dead_code)]
pub fn glycerin_catalog() -> SubstanceCatalog {
    substance_catalog_with(
        "compounds",
        "glycerin.json",
        r#"{"id":"glycerin","name":"Glycerin","molar_mass_kg_per_mol":0.09209,
           "phase_at_ambient":"liquid",
           "specific_heat_j_per_g_c":{"liquid":2.4,"gas":1.5,"solid":2.0},
           "latent_heat_vap_kj_per_kg":974.0,"latent_heat_fus_kj_per_kg":200.6,
           "antoine":{"A":8.0,"B":3000.0,"C":200.0,"t_min_c":50.0,"t_max_c":400.0},
           "melting_point_c":17.8,"boiling_point_sea_level_c":290.0,
           "decomposition_point_c":150.0,
           "decomposition_products":[{"species_id":"acrolein_vapor","moles_per_kg":5.0}]}"#,
    )
}

#[allow(dead_code)]
pub fn boil_goal_experiment() -> Experiment {
    Experiment {
        id: tse_core::ids::ExperimentId::new("l1e1"),
        level: 1,
        requires_location: false,
        unlocks_room_controls: false,
        required_substance_ids: None,
        boil_goal: true,
    }
}

#[allow(dead_code)]
pub fn room_controls_experiment() -> Experiment {
    Experiment {
        id: tse_core::ids::ExperimentId::new("l4e1"),
        level: 4,
        requires_location: false,
        unlocks_room_controls: true,
        required_substance_ids: None,
        boil_goal: true,
    }
}

#[allow(dead_code)]
pub fn engine_with(experiments: Vec<Experiment>, substances: SubstanceCatalog, pressure_mode: &str) -> Engine {
    let config = EngineConfig {
        burner_id: "range-top".to_string(),
        ac_unit_id: "standard".to_string(),
        air_handler_id: "hvac-1".to_string(),
        experiments,
    };
    let mut engine = Engine::new(config);
    engine.load_catalogs(substances, equipment_catalog(pressure_mode));
    engine
}

/// Fills the pot with `substance_id` under the tap, then moves it over
/// the burner at the given step — the same two-tick setup
/// `tse-engine`'s own `s1_sea_level_water_boils_around_167_seconds`
/// test uses.
#[allow(dead_code)]
pub fn fill_and_place_over_burner(engine: &mut Engine, substance_id: &str, burner_step: u32) {
    engine.set_substance(substance_id);
    engine.set_pot_position(PotZone::UnderTap);
    engine.advance(0.1).unwrap();
    engine.set_pot_position(PotZone::OverBurner);
    engine.set_burner_step(burner_step);
}
