//! Progression & scorecard tracking (C7) — spec.md §4.6. A thin layer
//! of state above the driver: tracks which experiment is active, what
//! it requires, and freezes an immutable [`Scorecard`] on every
//! [`tse_pot::BoilEvent`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tse_core::ids::{ExperimentId, SubstanceId};
use tse_equipment::Burner;
use tse_room::Alert;

/// One experiment in the per-level linear sequence (spec.md §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub level: u32,
    pub requires_location: bool,
    pub unlocks_room_controls: bool,
    pub required_substance_ids: Option<Vec<SubstanceId>>,
    pub boil_goal: bool,
}

impl Experiment {
    /// True iff `substance_id` satisfies this experiment's
    /// requirement (spec.md §4.6: `required_substance_ids: [id]|null`
    /// — `None` means any substance qualifies).
    pub fn allows_substance(&self, substance_id: &str) -> bool {
        match &self.required_substance_ids {
            None => true,
            Some(ids) => ids.iter().any(|id| id.as_str() == substance_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotScorecardSummary {
    pub substance_id: String,
    pub temperature_c: f64,
    pub effective_boiling_point_c: f64,
    pub time_to_boil_s: f64,
    pub burner_step: usize,
    pub altitude_m: f64,
    pub pressure_pa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomScorecardSummary {
    pub temperature_delta_c: f64,
    pub composition_before: HashMap<String, f64>,
    pub composition_after: HashMap<String, f64>,
    pub peak_hazard_ppm: HashMap<String, f64>,
    pub alert_log: Vec<Alert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealTimeForStep {
    pub burner_step: usize,
    pub watts: f64,
    pub ideal_time_s: f64,
}

/// Immutable once built — the canonical export payload (spec.md
/// §4.6, §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub experiment_id: String,
    pub sim_time_s: f64,
    pub pot: PotScorecardSummary,
    pub room: Option<RoomScorecardSummary>,
    pub ideal_times: Vec<IdealTimeForStep>,
}

impl Scorecard {
    /// Energy/power-based "ideal time" per burner step, replaying
    /// spec.md §4.6: `t = m*c*dT / (P * efficiency)`, using the pot's
    /// mass and temperature delta at the moment of boiling.
    pub fn ideal_times_for(
        burner: &Burner,
        mass_kg: f64,
        specific_heat_j_per_g_c: f64,
        delta_t_c: f64,
    ) -> Vec<IdealTimeForStep> {
        let energy_j = mass_kg * 1000.0 * specific_heat_j_per_g_c * delta_t_c;
        (0..=burner.max_step_index())
            .map(|step| {
                let watts = burner.watts_at_step(step) * burner.efficiency;
                let ideal_time_s = if watts > 0.0 {
                    energy_j / watts
                } else {
                    f64::INFINITY
                };
                IdealTimeForStep {
                    burner_step: step,
                    watts,
                    ideal_time_s,
                }
            })
            .collect()
    }
}

/// Accumulates the per-fill "before" snapshot and running peak-ppm
/// watermarks a [`Scorecard`]'s room summary needs, without the
/// progression tracker depending on `tse-room`'s mutable state type
/// directly in its public API.
#[derive(Debug, Clone, Default)]
struct RoomObservation {
    temperature_at_fill_c: f64,
    composition_at_fill: HashMap<String, f64>,
    peak_hazard_ppm: HashMap<String, f64>,
}

const HAZARD_SPECIES: &[&str] = &["o2", "co2", "nh3"];

#[derive(Debug, Default)]
pub struct ProgressionTracker {
    experiments: Vec<Experiment>,
    current_index: usize,
    scorecards: Vec<Scorecard>,
    room_observation: Option<RoomObservation>,
}

impl ProgressionTracker {
    pub fn new(experiments: Vec<Experiment>) -> Self {
        ProgressionTracker {
            experiments,
            current_index: 0,
            scorecards: Vec::new(),
            room_observation: None,
        }
    }

    pub fn current_experiment(&self) -> Option<&Experiment> {
        self.experiments.get(self.current_index)
    }

    pub fn advance_experiment(&mut self) {
        if self.current_index + 1 < self.experiments.len() {
            self.current_index += 1;
        }
    }

    pub fn room_controls_unlocked(&self) -> bool {
        self.current_experiment()
            .map(|e| e.unlocks_room_controls)
            .unwrap_or(false)
    }

    /// Called by the driver whenever the pot is (re)filled, to capture
    /// the room's "before" state for the next scorecard.
    pub fn record_fill(&mut self, room_temp_c: Option<f64>, room_composition: Option<&HashMap<String, f64>>) {
        self.room_observation = room_temp_c.map(|t| RoomObservation {
            temperature_at_fill_c: t,
            composition_at_fill: room_composition.cloned().unwrap_or_default(),
            peak_hazard_ppm: HashMap::new(),
        });
    }

    /// Called once per tick the room is active, to maintain the
    /// peak-ppm watermark for hazardous species (spec.md §4.6: "peak
    /// ppm for hazardous species").
    pub fn observe_room_tick(&mut self, composition: &HashMap<String, f64>) {
        let Some(obs) = self.room_observation.as_mut() else {
            return;
        };
        for species in HAZARD_SPECIES {
            let ppm = composition.get(*species).copied().unwrap_or(0.0) * 1_000_000.0;
            let entry = obs.peak_hazard_ppm.entry((*species).to_string()).or_insert(0.0);
            if ppm > *entry {
                *entry = ppm;
            }
        }
    }

    /// Freeze a scorecard on boil onset (spec.md §4.6).
    #[allow(clippy::too_many_arguments)]
    pub fn record_boil(
        &mut self,
        sim_time_s: f64,
        substance_id: &str,
        temperature_c: f64,
        effective_boiling_point_c: f64,
        time_to_boil_s: f64,
        burner_step: usize,
        altitude_m: f64,
        pressure_pa: f64,
        room_temperature_c: Option<f64>,
        room_composition: Option<&HashMap<String, f64>>,
        alert_log: Vec<Alert>,
        ideal_times: Vec<IdealTimeForStep>,
    ) -> &Scorecard {
        let room = match (room_temperature_c, room_composition, &self.room_observation) {
            (Some(temp_after), Some(comp_after), Some(obs)) => Some(RoomScorecardSummary {
                temperature_delta_c: temp_after - obs.temperature_at_fill_c,
                composition_before: obs.composition_at_fill.clone(),
                composition_after: comp_after.clone(),
                peak_hazard_ppm: obs.peak_hazard_ppm.clone(),
                alert_log,
            }),
            _ => None,
        };

        let scorecard = Scorecard {
            experiment_id: self
                .current_experiment()
                .map(|e| e.id.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            sim_time_s,
            pot: PotScorecardSummary {
                substance_id: substance_id.to_string(),
                temperature_c,
                effective_boiling_point_c,
                time_to_boil_s,
                burner_step,
                altitude_m,
                pressure_pa,
            },
            room,
            ideal_times,
        };

        self.scorecards.push(scorecard);
        self.scorecards.last().expect("just pushed")
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        &self.scorecards
    }
}
