//! `pot_step`: the pot process's single integration step (spec.md
//! §4.3). Pure: takes the prior state and this tick's inputs, returns
//! the new state plus whatever it emitted. Grounded in the teacher's
//! control-volume style of explicit state-in/state-out transitions
//! with no side effects.

use crate::error::PotResult;
use crate::state::{BoilEvent, DecompositionEmission, PotPhase, PotState, VaporEmission};
use tse_equipment::Burner;
use tse_formulas::heat::newton_cooling_step;
use tse_substances::substance::EffectiveBoilingPoint;
use tse_substances::{Phase, Substance};

/// Per-tick inputs the pot process needs, independent of the engine's
/// own input buffer (spec.md §4.3 step contract).
#[derive(Debug, Clone, Copy)]
pub struct PotStepInput {
    pub burner_step_index: usize,
    pub pot_over_burner: bool,
    pub ambient_temp_c: f64,
    pub dt_s: f64,
}

/// Everything `pot_step` produced this tick besides the new state.
#[derive(Debug, Clone, Default)]
pub struct PotStepOutput {
    pub vapor: Vec<VaporEmission>,
    pub decomposition: Vec<DecompositionEmission>,
    pub boil_event: Option<BoilEvent>,
}

/// One pot integration step.
///
/// `effective_bp` is `ISA(altitude)`-derived or room-pressure-derived
/// depending on whether room controls are unlocked (spec.md §4.4
/// "Boiling-point feedback") — the caller (C6) resolves which pressure
/// source applies and passes the already-computed boiling point in.
pub fn pot_step(
    mut state: PotState,
    input: PotStepInput,
    burner: &Burner,
    substance: &Substance,
    effective_bp: EffectiveBoilingPoint,
) -> PotResult<(PotState, PotStepOutput)> {
    let mut output = PotStepOutput::default();

    if state.phase == PotPhase::Empty || state.phase == PotPhase::Decomposed {
        state.time_on_flame_s = if input.pot_over_burner && burner_on(burner, input.burner_step_index) {
            state.time_on_flame_s + input.dt_s
        } else {
            0.0
        };
        return Ok((state, output));
    }

    state.extrapolated = effective_bp.extrapolated;

    let liquid_mass_kg = state.liquid_mass_kg();
    let burner_on_now = input.pot_over_burner && burner_on(burner, input.burner_step_index) && liquid_mass_kg > 0.0;

    let heat_in_w = if burner_on_now {
        burner.watts_at_step(input.burner_step_index) * burner.efficiency
    } else {
        0.0
    };

    if liquid_mass_kg > 0.0 {
        let specific_heat = substance
            .specific_heat
            .for_phase(Phase::Liquid)
            .unwrap_or(4.186);
        let mass_g = liquid_mass_kg * 1000.0;

        let energy_in_j = heat_in_w * input.dt_s;
        let delta_t_heat = if mass_g > 0.0 {
            energy_in_j / (mass_g * specific_heat)
        } else {
            0.0
        };
        let t_after_heat = state.temperature_c + delta_t_heat;

        let t_after_cooling = newton_cooling_step(
            t_after_heat,
            input.ambient_temp_c,
            substance.cooling_coefficient_per_s,
            input.dt_s,
        );

        if t_after_cooling > effective_bp.temp_c {
            let surplus_j = (t_after_cooling - effective_bp.temp_c) * mass_g * specific_heat;
            let latent_heat_kj_per_kg = substance.latent_heat_vap_kj_per_kg.unwrap_or(0.0);
            let delta_m_vapor = if latent_heat_kj_per_kg > 0.0 {
                surplus_j / (latent_heat_kj_per_kg * 1000.0)
            } else {
                0.0
            };
            let delta_m_vapor = delta_m_vapor.min(liquid_mass_kg);

            state.total_mass_kg = (state.total_mass_kg - delta_m_vapor).max(state.residue_mass_kg);
            state.temperature_c = effective_bp.temp_c;
            state.is_boiling = true;

            if delta_m_vapor > 0.0 {
                output.vapor.push(VaporEmission {
                    species_id: substance.id.clone(),
                    moles: delta_m_vapor / substance.molar_mass_kg_per_mol,
                    mass_kg: delta_m_vapor,
                });
            }
        } else {
            state.temperature_c = t_after_cooling;
            state.is_boiling = false;
        }
    } else {
        state.is_boiling = false;
    }

    state.time_on_flame_s = if input.pot_over_burner && burner_on(burner, input.burner_step_index) {
        state.time_on_flame_s + input.dt_s
    } else {
        0.0
    };
    state.time_elapsed_s += input.dt_s;

    let was_boiling_phase = state.phase == PotPhase::Boiling;
    let decomposed_now = substance
        .decomposition_point_c
        .map(|point| state.temperature_c >= point)
        .unwrap_or(false);

    state.phase = next_phase(state.phase, state.liquid_mass_kg(), heat_in_w, state.is_boiling, decomposed_now);

    if decomposed_now && state.phase == PotPhase::Decomposed {
        for product in &substance.decomposition_products {
            output.decomposition.push(DecompositionEmission {
                species_id: product.species_id.as_str().to_string(),
                moles: product.moles_per_kg * state.residue_mass_kg,
            });
        }
    }

    if !was_boiling_phase && state.phase == PotPhase::Boiling && !state.boil_event_emitted {
        output.boil_event = Some(BoilEvent {
            temperature_c: state.temperature_c,
            effective_bp_c: effective_bp.temp_c,
            time_elapsed_s: state.time_elapsed_s,
        });
        state.boil_event_emitted = true;
    }

    Ok((state, output))
}

fn burner_on(burner: &Burner, step_index: usize) -> bool {
    burner.watts_at_step(step_index) > 0.0
}

fn next_phase(
    current: PotPhase,
    liquid_mass_kg: f64,
    heat_in_w: f64,
    is_boiling: bool,
    decomposed_now: bool,
) -> PotPhase {
    if current == PotPhase::Decomposed || decomposed_now {
        return PotPhase::Decomposed;
    }
    if liquid_mass_kg <= 1e-9 {
        return if heat_in_w > 0.0 {
            PotPhase::Heating
        } else {
            PotPhase::Drying
        };
    }
    if is_boiling {
        return PotPhase::Boiling;
    }
    if heat_in_w > 0.0 {
        PotPhase::Heating
    } else {
        PotPhase::Filled
    }
}
