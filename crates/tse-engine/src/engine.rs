//! The simulation driver (C6): a single synchronous `advance` entry
//! point over an internal fixed-step sub-integration loop (spec.md
//! §4.5, §5). `Engine` owns `PotState`, `RoomState`, and the two
//! read-only catalogs; it never spawns threads or blocks on I/O.

use crate::adapters::{ResolvedLocation, SceneCommand};
use crate::error::{EngineError, EngineResult};
use crate::inputs::{EngineInputs, PotZone};
use crate::progression::{Experiment, ProgressionTracker, Scorecard};
use crate::snapshot::{ExtrapolationFlag, PotSnapshot, RoomSnapshot, Snapshot};
use tse_core::constants::{
    DEFAULT_BURNER_SPILLOVER_FRACTION, DEFAULT_POT_FILL_MASS_KG, GAS_CONSTANT_J_PER_MOL_K,
    MAX_SUBSTEP_S, REFILL_THRESHOLD_FRACTION,
};
use tse_core::ids::SubstanceId;
use tse_core::units::c_to_k;
use tse_equipment::{AirHandler, EquipmentCatalog, PressureMode};
use tse_formulas::isa::pressure_isa;
use tse_pot::{pot_step, BoilEvent, PotPhase, PotState, PotStepInput};
use tse_room::{room_step, Alert, RoomState, RoomStepInput, VaporInflow};
use tse_substances::{Substance, SubstanceCatalog};
use tracing::{debug, warn};

/// Static configuration fixed at construction: which equipment
/// records this engine instance's burner/AC/air-handler inputs refer
/// to. Spec.md's `set_*` inputs select burner *step* and AC/air
/// handler *on-off*, not which physical unit is installed — that's a
/// property of the room/workshop, chosen once per experiment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub burner_id: String,
    pub ac_unit_id: String,
    pub air_handler_id: String,
    pub experiments: Vec<Experiment>,
}

pub struct Engine {
    config: EngineConfig,
    substances: Option<SubstanceCatalog>,
    equipment: Option<EquipmentCatalog>,

    pending: EngineInputs,
    applied: EngineInputs,

    selected_substance_id: Option<SubstanceId>,
    pot: PotState,
    room: Option<RoomState>,
    temp_at_fill_c: Option<f64>,

    progression: ProgressionTracker,
    sim_time_s: f64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            progression: ProgressionTracker::new(config.experiments.clone()),
            config,
            substances: None,
            equipment: None,
            pending: EngineInputs::default(),
            applied: EngineInputs::default(),
            selected_substance_id: None,
            pot: PotState::empty(),
            room: None,
            temp_at_fill_c: None,
            sim_time_s: 0.0,
        }
    }

    /// Hand the engine its read-only catalogs, loaded and validated
    /// by the caller (spec.md §5: catalog load is external to the
    /// engine). Before this is called, `advance` returns
    /// `EngineError::NotReady`.
    pub fn load_catalogs(&mut self, substances: SubstanceCatalog, equipment: EquipmentCatalog) {
        self.substances = Some(substances);
        self.equipment = Some(equipment);
    }

    pub fn is_ready(&self) -> bool {
        self.substances.is_some() && self.equipment.is_some()
    }

    fn substances(&self) -> EngineResult<&SubstanceCatalog> {
        self.substances.as_ref().ok_or(EngineError::NotReady)
    }

    fn equipment(&self) -> EngineResult<&EquipmentCatalog> {
        self.equipment.as_ref().ok_or(EngineError::NotReady)
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        self.progression.scorecards()
    }

    pub fn available_substances(&self) -> EngineResult<Vec<&Substance>> {
        let ambient = self
            .room
            .as_ref()
            .map(|r| r.temperature_c)
            .unwrap_or(self.equipment()?.room().initial_temp_c);
        Ok(self
            .substances()?
            .available_for(ambient, self.progression.room_controls_unlocked()))
    }

    // ---- External inputs (spec.md §6) ----

    pub fn set_burner_step(&mut self, step: u32) {
        self.pending.burner_step_index = step as usize;
    }

    pub fn set_pot_position(&mut self, zone: PotZone) {
        self.pending.pot_zone = zone;
    }

    pub fn set_substance(&mut self, id: impl Into<String>) {
        self.pending.substance_id = Some(SubstanceId::new(id.into()));
    }

    pub fn set_altitude(&mut self, meters: f64) {
        if meters.is_finite() {
            self.pending.altitude_m = meters;
        }
    }

    pub fn set_location(&mut self, location: ResolvedLocation) {
        self.set_altitude(location.altitude_m);
    }

    pub fn set_ac(&mut self, enabled: bool, setpoint_c: f64) {
        self.pending.ac_enabled = enabled;
        self.pending.ac_setpoint_c = setpoint_c;
    }

    pub fn set_air_handler(&mut self, on: bool) {
        self.pending.air_handler_on = on;
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier >= 0.0 {
            self.pending.speed_multiplier = multiplier;
            self.pending.paused = multiplier == 0.0;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.pending.paused = paused;
    }

    pub fn apply_inputs(&mut self, inputs: EngineInputs) {
        self.pending = inputs;
    }

    /// Maps a [`SceneCommand`] onto the matching `set_*` call, one to
    /// one, backing the mapping [`SceneCommand`]'s docs promise.
    pub fn apply_scene_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetBurnerStep(step) => self.set_burner_step(step),
            SceneCommand::SetPotPosition(zone) => self.set_pot_position(zone),
            SceneCommand::SetSubstance(id) => self.set_substance(id),
            SceneCommand::SetAltitude(meters) => self.set_altitude(meters),
            SceneCommand::SetAc { enabled, setpoint_c } => self.set_ac(enabled, setpoint_c),
            SceneCommand::SetAirHandler(on) => self.set_air_handler(on),
            SceneCommand::SetSpeed(multiplier) => self.set_speed(multiplier),
        }
    }

    pub fn complete_experiment(&mut self) {
        self.progression.advance_experiment();
    }

    // ---- The one synchronous entry point (spec.md §4.5, §5) ----

    pub fn advance(&mut self, wall_dt_s: f64) -> EngineResult<Snapshot> {
        if !self.is_ready() {
            return Err(EngineError::NotReady);
        }

        // Apply this tick's inputs atomically (spec.md §5).
        self.applied = self.pending.clone();

        self.handle_substance_change();
        self.sync_room_lifecycle()?;
        self.maybe_fill_pot()?;

        let effective_speed = self.applied.effective_speed();
        let sim_dt_s = (wall_dt_s * effective_speed).max(0.0);

        let mut alerts_new: Vec<Alert> = Vec::new();
        let mut boil_event: Option<BoilEvent> = None;
        let mut decomposition_halted = false;

        if sim_dt_s > 0.0 {
            let num_substeps = (sim_dt_s / MAX_SUBSTEP_S).ceil().max(1.0) as u32;
            let substep_dt = sim_dt_s / num_substeps as f64;

            for _ in 0..num_substeps {
                let (be, mut alerts, halted) = self.sub_step(substep_dt)?;
                if be.is_some() {
                    boil_event = boil_event.or(be);
                }
                alerts_new.append(&mut alerts);
                decomposition_halted |= halted;
            }
        }

        self.sim_time_s += sim_dt_s;

        Ok(self.build_snapshot(alerts_new, boil_event, decomposition_halted))
    }

    fn handle_substance_change(&mut self) {
        if let Some(id) = self.applied.substance_id.clone() {
            if self.selected_substance_id.as_ref() != Some(&id) {
                self.selected_substance_id = Some(id);
                self.pot = PotState::empty();
                self.temp_at_fill_c = None;
            }
        }
    }

    fn resolve_altitude_pressure(&self) -> EngineResult<f64> {
        let room_cfg = self.equipment()?.room();
        Ok(match room_cfg.pressure_mode {
            // Room pressure tracking is handled by the dynamic ideal-gas
            // path once the room exists; `custom` has no carried override
            // value in the data model (spec.md §3), so it falls back to
            // sea level (see DESIGN.md Open Questions).
            PressureMode::Custom => pressure_isa(0.0),
            PressureMode::Sealevel => pressure_isa(0.0),
            PressureMode::Location => pressure_isa(self.applied.altitude_m),
        })
    }

    fn sync_room_lifecycle(&mut self) -> EngineResult<()> {
        let unlocked = self.progression.room_controls_unlocked();
        if unlocked && self.room.is_none() {
            let pressure_pa = self.resolve_altitude_pressure()?;
            let room_cfg = self.equipment()?.room().clone();
            let total_moles = pressure_pa * room_cfg.volume_m3
                / (GAS_CONSTANT_J_PER_MOL_K * c_to_k(room_cfg.initial_temp_c));
            self.room = Some(RoomState::new(
                room_cfg.initial_temp_c,
                pressure_pa,
                room_cfg.initial_composition.clone(),
                total_moles,
            ));
        } else if !unlocked && self.room.is_some() {
            self.room = None;
        }
        Ok(())
    }

    fn maybe_fill_pot(&mut self) -> EngineResult<()> {
        if self.applied.pot_zone != PotZone::UnderTap {
            return Ok(());
        }
        let Some(substance_id) = self.applied.substance_id.clone() else {
            return Ok(());
        };

        let below_threshold =
            self.pot.liquid_mass_kg() < DEFAULT_POT_FILL_MASS_KG * REFILL_THRESHOLD_FRACTION;
        if self.pot.phase != PotPhase::Empty && !below_threshold {
            return Ok(());
        }

        let non_volatile_fraction = self
            .substances()?
            .get(substance_id.as_str())?
            .non_volatile_mass_fraction;
        let ambient = self
            .room
            .as_ref()
            .map(|r| r.temperature_c)
            .unwrap_or(self.equipment()?.room().initial_temp_c);

        self.pot
            .fill(substance_id, DEFAULT_POT_FILL_MASS_KG, non_volatile_fraction, ambient);
        self.temp_at_fill_c = Some(ambient);
        self.progression
            .record_fill(self.room.as_ref().map(|r| r.temperature_c), self.room.as_ref().map(|r| &r.composition));

        Ok(())
    }

    fn chosen_air_handler_mode(&self, handler: &AirHandler, on: bool) -> String {
        if !on {
            return "off".to_string();
        }
        handler
            .modes
            .iter()
            .filter(|(name, _)| name.as_str() != "off")
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "off".to_string())
    }

    #[allow(clippy::type_complexity)]
    fn sub_step(&mut self, dt_s: f64) -> EngineResult<(Option<BoilEvent>, Vec<Alert>, bool)> {
        let burner = self.equipment()?.burner(&self.config.burner_id)?.clone();
        let pot_over_burner = self.applied.pot_zone == PotZone::OverBurner;
        let burner_watts_now = burner.watts_at_step(self.applied.burner_step_index);

        let mut decomposition_halted = false;
        let mut boil_event = None;
        let mut vapor_inflows: Vec<VaporInflow> = Vec::new();

        if let Some(substance_id) = self.pot.substance_id.clone() {
            let substance = self.substances()?.get(substance_id.as_str())?.clone();

            let pressure_pa = match self.room.as_ref() {
                Some(room) => room.pressure_pa,
                None => self.resolve_altitude_pressure()?,
            };
            let effective_bp = substance.effective_boiling_point(pressure_pa)?;

            let ambient_temp_c = self
                .room
                .as_ref()
                .map(|r| r.temperature_c)
                .unwrap_or(self.equipment()?.room().initial_temp_c);

            let input = PotStepInput {
                burner_step_index: self.applied.burner_step_index,
                pot_over_burner,
                ambient_temp_c,
                dt_s,
            };

            let (new_pot, out) = pot_step(self.pot.clone(), input, &burner, &substance, effective_bp)?;
            self.pot = new_pot;
            decomposition_halted = self.pot.phase == PotPhase::Decomposed;
            boil_event = out.boil_event;

            if !out.decomposition.is_empty() {
                warn!(
                    substance = %substance_id,
                    species_count = out.decomposition.len(),
                    "pot decomposed; heating halted until refill"
                );
            }

            for v in &out.vapor {
                vapor_inflows.push(VaporInflow {
                    species_id: v.species_id.clone(),
                    moles: v.moles,
                });
            }
            for d in &out.decomposition {
                vapor_inflows.push(VaporInflow {
                    species_id: d.species_id.clone(),
                    moles: d.moles,
                });
            }

            if let Some(event) = boil_event {
                debug!(substance = %substance_id, temperature_c = event.temperature_c, "boil onset");
                let mass_kg = self.pot.liquid_mass_kg();
                let specific_heat = substance
                    .specific_heat
                    .for_phase(tse_substances::Phase::Liquid)
                    .unwrap_or(4.186);
                let starting_temp_c = self.temp_at_fill_c.unwrap_or(ambient_temp_c);
                let delta_t_c = (event.effective_bp_c - starting_temp_c).max(0.0);
                let ideal_times =
                    Scorecard::ideal_times_for(&burner, mass_kg, specific_heat, delta_t_c);

                self.progression.record_boil(
                    self.sim_time_s,
                    &substance_id.to_string(),
                    event.temperature_c,
                    event.effective_bp_c,
                    event.time_elapsed_s,
                    self.applied.burner_step_index,
                    self.applied.altitude_m,
                    pressure_pa,
                    self.room.as_ref().map(|r| r.temperature_c),
                    self.room.as_ref().map(|r| &r.composition),
                    self.room.as_ref().map(|r| r.alerts.clone()).unwrap_or_default(),
                    ideal_times,
                );
            }
        } else if pot_over_burner && burner_watts_now > 0.0 {
            self.pot.time_on_flame_s += dt_s;
        } else {
            self.pot.time_on_flame_s = 0.0;
        }

        let mut alerts = Vec::new();
        if let Some(room) = self.room.take() {
            let ac = self.equipment()?.ac_unit(&self.config.ac_unit_id)?.clone();
            let handler = self
                .equipment()?
                .air_handler(&self.config.air_handler_id)?
                .clone();
            let room_cfg = self.equipment()?.room().clone();

            let burner_spillover_w = burner_watts_now * DEFAULT_BURNER_SPILLOVER_FRACTION;
            let altitude_pressure_pa = self.resolve_altitude_pressure()?;

            let mut room = room;
            room.ac_enabled = self.applied.ac_enabled;
            room.ac_setpoint_c = ac.clamp_setpoint(self.applied.ac_setpoint_c);
            room.air_handler_on = self.applied.air_handler_on;
            room.air_handler_mode = self.chosen_air_handler_mode(&handler, self.applied.air_handler_on);

            let room_input = RoomStepInput {
                outside_ambient_temp_c: room_cfg.initial_temp_c,
                burner_spillover_w,
                dt_s,
                altitude_pressure_pa,
            };

            let (new_room, alerts_delta) =
                room_step(room, &room_cfg, &ac, &handler, &vapor_inflows, room_input)?;
            alerts.extend(alerts_delta);
            self.progression.observe_room_tick(&new_room.composition);
            self.room = Some(new_room);
        }

        Ok((boil_event, alerts, decomposition_halted))
    }

    fn build_snapshot(
        &self,
        alerts_new: Vec<Alert>,
        boil_event: Option<BoilEvent>,
        decomposition_halted: bool,
    ) -> Snapshot {
        let effective_bp_c = self
            .pot
            .substance_id
            .as_ref()
            .and_then(|id| self.substances.as_ref().and_then(|c| c.get(id.as_str()).ok()))
            .and_then(|s| {
                let pressure = self
                    .room
                    .as_ref()
                    .map(|r| r.pressure_pa)
                    .or_else(|| self.resolve_altitude_pressure().ok())
                    .unwrap_or(101_325.0);
                s.effective_boiling_point(pressure).ok()
            })
            .map(|ebp| ebp.temp_c)
            .unwrap_or(f64::NAN);

        let pot = PotSnapshot {
            substance_id: self.pot.substance_id.as_ref().map(|s| s.to_string()),
            phase: self.pot.phase,
            total_mass_kg: self.pot.total_mass_kg,
            residue_mass_kg: self.pot.residue_mass_kg,
            liquid_mass_kg: self.pot.liquid_mass_kg(),
            temperature_c: self.pot.temperature_c,
            effective_boiling_point_c: effective_bp_c,
            is_boiling: self.pot.is_boiling,
            time_on_flame_s: self.pot.time_on_flame_s,
            time_elapsed_s: self.pot.time_elapsed_s,
        };

        let room = self.room.as_ref().map(|r| RoomSnapshot {
            temperature_c: r.temperature_c,
            pressure_pa: r.pressure_pa,
            composition: r.composition.clone(),
            ac_enabled: r.ac_enabled,
            ac_setpoint_c: r.ac_setpoint_c,
            air_handler_on: r.air_handler_on,
        });

        Snapshot {
            sim_time_s: self.sim_time_s,
            pot,
            room,
            alerts_new,
            boil_event,
            decomposition_halted,
            extrapolation: ExtrapolationFlag {
                antoine_extrapolated: self.pot.extrapolated,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn equipment_catalog() -> EquipmentCatalog {
        let dir = std::env::temp_dir().join(format!("tse_engine_equipment_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("burners")).unwrap();
        std::fs::create_dir_all(dir.join("ac-units")).unwrap();
        std::fs::create_dir_all(dir.join("air-handlers")).unwrap();
        std::fs::write(
            dir.join("room.json"),
            r#"{"volume_m3":30.0,"initial_temp_c":20.0,"heat_capacity_j_per_c":36000.0,
               "initial_composition":{"n2":0.78,"o2":0.21,"co2":0.01},"pressure_mode":"sealevel"}"#,
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
               "filtration_efficiency":{"toxic_generic":0.8},
               "target_composition":{"n2":0.78,"o2":0.21,"co2":0.01},
               "modes":{"off":0.0,"high":100.0}}"#,
        )
        .unwrap();

        let catalog = EquipmentCatalog::load_all(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        catalog
    }

    pub(crate) fn substance_catalog_with_water() -> SubstanceCatalog {
        let dir = std::env::temp_dir().join(format!("tse_engine_substances_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("compounds")).unwrap();
        std::fs::write(
            dir.join("compounds/water.json"),
            r#"{"id":"water","name":"Water","molar_mass_kg_per_mol":0.018015,
               "phase_at_ambient":"liquid",
               "specific_heat_j_per_g_c":{"liquid":4.186,"gas":1.996,"solid":2.05},
               "latent_heat_vap_kj_per_kg":2257.0,"latent_heat_fus_kj_per_kg":334.0,
               "antoine":{"A":8.07131,"B":1730.63,"C":233.426,"t_min_c":1.0,"t_max_c":100.0},
               "melting_point_c":0.0,"boiling_point_sea_level_c":100.0}"#,
        )
        .unwrap();
        let (catalog, _) = SubstanceCatalog::load_all(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        catalog
    }

    pub(crate) fn base_engine() -> Engine {
        let config = EngineConfig {
            burner_id: "range-top".to_string(),
            ac_unit_id: "standard".to_string(),
            air_handler_id: "hvac-1".to_string(),
            experiments: vec![Experiment {
                id: tse_core::ids::ExperimentId::new("l1e1"),
                level: 1,
                requires_location: false,
                unlocks_room_controls: false,
                required_substance_ids: None,
                boil_goal: true,
            }],
        };
        Engine::new(config)
    }

    #[test]
    fn advance_before_catalogs_loaded_is_not_ready() {
        let mut engine = base_engine();
        let err = engine.advance(0.1).unwrap_err();
        assert!(matches!(err, EngineError::NotReady));
    }

    #[test]
    fn s1_sea_level_water_boils_around_167_seconds() {
        let mut engine = base_engine();
        engine.load_catalogs(substance_catalog_with_water(), equipment_catalog());
        engine.set_substance("water");
        engine.set_pot_position(PotZone::UnderTap);
        engine.advance(0.1).unwrap();
        engine.set_pot_position(PotZone::OverBurner);
        engine.set_burner_step(3);
        engine.set_speed(1.0);

        let mut boil_time = None;
        let mut elapsed = 0.0;
        while elapsed < 400.0 {
            let snap = engine.advance(0.1).unwrap();
            elapsed += 0.1;
            if let Some(event) = snap.boil_event {
                boil_time = Some(event.time_elapsed_s);
                break;
            }
        }

        let boil_time = boil_time.expect("expected a boil event within 400s");
        let expected = (1000.0 * 4.186 * 80.0) / 2000.0;
        assert!(
            (boil_time - expected).abs() / expected < 0.15,
            "boil time {boil_time} not within tolerance of {expected}"
        );
    }

    #[test]
    fn paused_speed_skips_integration_but_still_publishes() {
        let mut engine = base_engine();
        engine.load_catalogs(substance_catalog_with_water(), equipment_catalog());
        engine.set_substance("water");
        engine.set_pot_position(PotZone::UnderTap);
        engine.advance(0.1).unwrap();
        engine.set_pot_position(PotZone::OverBurner);
        engine.set_burner_step(3);
        engine.set_paused(true);

        let before = engine.advance(1.0).unwrap();
        let after = engine.advance(1.0).unwrap();
        assert_eq!(before.pot.temperature_c, after.pot.temperature_c);
    }

    #[test]
    fn switching_substance_empties_the_pot() {
        let mut engine = base_engine();
        engine.load_catalogs(substance_catalog_with_water(), equipment_catalog());
        engine.set_substance("water");
        engine.set_pot_position(PotZone::UnderTap);
        engine.advance(0.1).unwrap();
        let snap = engine.advance(0.1).unwrap();
        assert!(snap.pot.total_mass_kg > 0.0);

        engine.set_pot_position(PotZone::OffBurner);
        engine.set_substance("ethanol-not-loaded-but-id-change-is-what-matters");
        let snap = engine.advance(0.1).unwrap();
        assert_eq!(snap.pot.total_mass_kg, 0.0);
    }

    #[test]
    fn apply_scene_command_maps_onto_the_matching_set_call() {
        let mut engine = base_engine();
        engine.load_catalogs(substance_catalog_with_water(), equipment_catalog());

        engine.apply_scene_command(SceneCommand::SetSubstance("water".to_string()));
        engine.apply_scene_command(SceneCommand::SetPotPosition(PotZone::UnderTap));
        engine.apply_scene_command(SceneCommand::SetBurnerStep(3));
        engine.apply_scene_command(SceneCommand::SetAltitude(500.0));
        engine.apply_scene_command(SceneCommand::SetAc { enabled: true, setpoint_c: 19.0 });
        engine.apply_scene_command(SceneCommand::SetAirHandler(true));
        engine.apply_scene_command(SceneCommand::SetSpeed(2.0));

        assert_eq!(engine.pending.substance_id, Some(SubstanceId::new("water")));
        assert_eq!(engine.pending.pot_zone, PotZone::UnderTap);
        assert_eq!(engine.pending.burner_step_index, 3);
        assert_eq!(engine.pending.altitude_m, 500.0);
        assert!(engine.pending.ac_enabled);
        assert_eq!(engine.pending.ac_setpoint_c, 19.0);
        assert!(engine.pending.air_handler_on);
        assert_eq!(engine.pending.speed_multiplier, 2.0);
    }
}
