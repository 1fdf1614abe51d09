use serde::{Deserialize, Serialize};
use tse_core::ids::SubstanceId;

/// Pot state machine phase (spec.md §4.3):
/// `Empty -> Filled -> Heating -> Boiling -> Drying <-> Heating -> Decomposed`.
///
/// `Drying` covers both the spec's transitional "no free solvent, still
/// on the flame" state and its terminal "Dry" label — once liquid mass
/// reaches zero there is nothing left for further heating to do besides
/// warm the residue toward `decomposition_point_c`, so the two are
/// modeled as one variant (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotPhase {
    Empty,
    Filled,
    Heating,
    Boiling,
    Drying,
    Decomposed,
}

/// Mutable pot state (spec.md §3). Created on `fill`, destroyed on
/// empty; residue carries between fills of the same substance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotState {
    pub substance_id: Option<SubstanceId>,
    pub phase: PotPhase,
    pub total_mass_kg: f64,
    pub residue_mass_kg: f64,
    pub temperature_c: f64,
    pub is_boiling: bool,
    pub time_on_flame_s: f64,
    pub time_elapsed_s: f64,
    /// True once this fill's `BoilEvent` has already been emitted, so
    /// boil onset only fires once per fill (spec.md §4.3).
    pub boil_event_emitted: bool,
    /// Non-fatal Antoine extrapolation flag, carried until conditions
    /// change (spec.md §4.3 failure semantics).
    pub extrapolated: bool,
}

impl PotState {
    pub fn empty() -> Self {
        PotState {
            substance_id: None,
            phase: PotPhase::Empty,
            total_mass_kg: 0.0,
            residue_mass_kg: 0.0,
            temperature_c: 0.0,
            is_boiling: false,
            time_on_flame_s: 0.0,
            time_elapsed_s: 0.0,
            boil_event_emitted: false,
            extrapolated: false,
        }
    }

    pub fn liquid_mass_kg(&self) -> f64 {
        (self.total_mass_kg - self.residue_mass_kg).max(0.0)
    }

    /// Fill (or top up) the pot with `mass_kg` of `substance_id` at
    /// `ambient_temp_c`, applying the substance's
    /// `non_volatile_mass_fraction` to seed residue. Switching to a
    /// different substance empties any prior residue (spec.md §6
    /// `set_substance`).
    pub fn fill(
        &mut self,
        substance_id: SubstanceId,
        mass_kg: f64,
        non_volatile_mass_fraction: f64,
        ambient_temp_c: f64,
    ) {
        let same_substance = self.substance_id.as_ref() == Some(&substance_id);
        if !same_substance {
            self.residue_mass_kg = 0.0;
        }
        self.substance_id = Some(substance_id);
        self.residue_mass_kg += mass_kg * non_volatile_mass_fraction;
        self.total_mass_kg += mass_kg;
        if !same_substance || self.phase == PotPhase::Empty {
            self.temperature_c = ambient_temp_c;
        }
        self.phase = PotPhase::Filled;
        self.is_boiling = false;
        self.boil_event_emitted = false;
    }
}

/// One unit of vapor released into the room by the pot (spec.md §4.3
/// step 7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaporEmission {
    pub species_id: String,
    pub moles: f64,
    pub mass_kg: f64,
}

/// Products released when a substance crosses its decomposition point
/// (spec.md §4.3 `* -> Decomposed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionEmission {
    pub species_id: String,
    pub moles: f64,
}

/// Emitted exactly once per fill, the first tick a pot reaches its
/// effective boiling point (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoilEvent {
    pub temperature_c: f64,
    pub effective_bp_c: f64,
    pub time_elapsed_s: f64,
}
