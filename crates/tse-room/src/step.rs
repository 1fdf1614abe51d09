//! `room_step`: the room process's single integration step (spec.md
//! §4.4). Only invoked by the engine once room controls are unlocked.

use crate::alert::{Alert, AlertKind, AlertSeverity};
use crate::state::{CompositionLogEntry, HeatLogEntry, RoomState};
use crate::RoomResult;
use std::collections::HashMap;
use tse_core::constants::alerts as alert_thresholds;
use tse_core::constants::DEFAULT_ROOM_OUTSIDE_LEAK_COEFFICIENT_PER_S;
use tse_core::units::c_to_k;
use tse_equipment::{AcUnit, AirHandler, RoomConfig};
use tse_formulas::gas::{exchange_fraction, gas_exchange_step, ideal_gas_pressure};
use tse_formulas::heat::newton_cooling_step;
use tse_formulas::pid::pid_step;

/// Moles of a species entering the room this tick — a plain value
/// object so `tse-room` never depends on `tse-pot`'s types (spec.md §9
/// "break cyclic references via the driver").
#[derive(Debug, Clone)]
pub struct VaporInflow {
    pub species_id: String,
    pub moles: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RoomStepInput {
    pub outside_ambient_temp_c: f64,
    pub burner_spillover_w: f64,
    pub dt_s: f64,
    /// ISA(altitude)- or location-derived pressure for this tick,
    /// resolved by the caller (spec.md §4.4 item 3: "in simpler mode
    /// ... pressure follows ISA(altitude) exactly"). Used verbatim
    /// until the room pressure goes dynamic (vapor ingress or
    /// scrubbing), after which the ideal gas law takes over.
    pub altitude_pressure_pa: f64,
}

pub fn room_step(
    mut state: RoomState,
    config: &RoomConfig,
    ac: &AcUnit,
    air_handler: &AirHandler,
    vapor_emissions: &[VaporInflow],
    input: RoomStepInput,
) -> RoomResult<(RoomState, Vec<Alert>)> {
    let mut alerts_delta = Vec::new();

    // --- 1. Temperature ---
    let ac_watts = if state.ac_enabled {
        let error = state.ac_setpoint_c - state.temperature_c;
        if error.abs() < ac.deadband_c / 2.0 {
            state.ac_pid_state = tse_formulas::PidState::default();
            0.0
        } else {
            let (output, new_pid_state) = pid_step(
                error,
                state.ac_pid_state,
                input.dt_s,
                ac.pid,
                ac.integral_windup_limit,
            );
            state.ac_pid_state = new_pid_state;
            ac.output_to_watts(output)
        }
    } else {
        0.0
    };

    let net_heat_w = input.burner_spillover_w + ac_watts;
    let mut delta_t = net_heat_w * input.dt_s / config.heat_capacity_j_per_c;
    let max_delta_t = ac.max_rate_of_change_c_per_s * input.dt_s;
    delta_t = delta_t.clamp(-max_delta_t, max_delta_t);

    let t_after_flux = state.temperature_c + delta_t;
    state.temperature_c = newton_cooling_step(
        t_after_flux,
        input.outside_ambient_temp_c,
        DEFAULT_ROOM_OUTSIDE_LEAK_COEFFICIENT_PER_S,
        input.dt_s,
    );

    state.heat_log.push(HeatLogEntry {
        time_elapsed_s: state.time_elapsed_s,
        net_heat_w,
        temperature_c: state.temperature_c,
    });

    // --- 2. Composition ---
    if !vapor_emissions.is_empty() {
        state.pressure_dynamic = true;
        let mut species_moles: HashMap<String, f64> = state
            .composition
            .iter()
            .map(|(k, f)| (k.clone(), f * state.total_moles))
            .collect();
        for emission in vapor_emissions {
            *species_moles.entry(emission.species_id.clone()).or_insert(0.0) += emission.moles;
        }
        let new_total: f64 = species_moles.values().sum();
        if new_total > 0.0 {
            state.composition = species_moles
                .into_iter()
                .map(|(k, m)| (k, m / new_total))
                .collect();
            state.total_moles = new_total;
        }
    }

    let mode = state.air_handler_mode.clone();
    let flow_m3_per_s = if state.air_handler_on {
        air_handler.flow_m3_per_s(&mode)
    } else {
        0.0
    };
    if flow_m3_per_s > 0.0 {
        state.pressure_dynamic = true;
        let frac = exchange_fraction(flow_m3_per_s, input.dt_s, config.volume_m3)?;
        let mut updated = state.composition.clone();
        for (species, current) in state.composition.iter() {
            let target = air_handler
                .target_composition
                .get(species)
                .copied()
                .unwrap_or(0.0);
            let efficiency = air_handler.efficiency_for(species);
            let delta = gas_exchange_step(*current, target, frac, efficiency);
            *updated.get_mut(species).unwrap() += delta;
        }
        // Per-species deltas are independently scaled by that species'
        // filtration efficiency, so they don't sum to zero when
        // efficiencies differ across species. Renormalize so the
        // scrubber exchange stays a mole-conserving swap with outside
        // air rather than drifting the fraction sum off 1 (spec.md §8
        // invariant 5).
        let updated_sum: f64 = updated.values().sum();
        if updated_sum > 0.0 {
            for value in updated.values_mut() {
                *value /= updated_sum;
            }
        }
        state.composition = updated;
    }

    state.composition_log.push(CompositionLogEntry {
        time_elapsed_s: state.time_elapsed_s,
        composition: state.composition.clone(),
    });

    // --- 3. Pressure ---
    state.pressure_pa = if state.pressure_dynamic {
        ideal_gas_pressure(state.total_moles, c_to_k(state.temperature_c), config.volume_m3)?
    } else {
        input.altitude_pressure_pa
    };

    // --- 4. Alerts ---
    // Edge-triggered: each threshold crossing emits exactly one alert
    // (spec.md §4.4 item 4), not one per tick the condition holds, so
    // every band is compared against the previously-active state on
    // `RoomState` before pushing anything. No pressure thresholds are
    // specified anywhere in the source material, so pressure never
    // raises an alert here (see DESIGN.md Open Question 4).
    let o2 = state.composition.get("o2").copied().unwrap_or(0.0);
    let co2 = state.composition.get("co2").copied().unwrap_or(0.0);
    let nh3_ppm = state.composition.get("nh3").copied().unwrap_or(0.0) * 1_000_000.0;

    let o2_band_now = if o2 < alert_thresholds::O2_CRITICAL_FRACTION {
        Some(AlertSeverity::Critical)
    } else if o2 < alert_thresholds::O2_WARN_FRACTION {
        Some(AlertSeverity::Warn)
    } else {
        None
    };
    if o2_band_now.is_some() && o2_band_now != state.o2_alert_band {
        let (severity, message) = match o2_band_now {
            Some(AlertSeverity::Critical) => (AlertSeverity::Critical, format!("oxygen critical: {:.3}", o2)),
            _ => (AlertSeverity::Warn, format!("oxygen low: {:.3}", o2)),
        };
        alerts_delta.push(make_alert(state.time_elapsed_s, severity, AlertKind::OxygenLow, message));
    }
    state.o2_alert_band = o2_band_now;

    let co2_active_now = co2 > alert_thresholds::CO2_WARN_FRACTION;
    if co2_active_now && !state.co2_alert_active {
        alerts_delta.push(make_alert(
            state.time_elapsed_s,
            AlertSeverity::Warn,
            AlertKind::CarbonDioxideHigh,
            format!("CO2 elevated: {:.3}", co2),
        ));
    }
    state.co2_alert_active = co2_active_now;

    let nh3_active_now = nh3_ppm > alert_thresholds::NH3_CRITICAL_PPM;
    if nh3_active_now && !state.nh3_alert_active {
        alerts_delta.push(make_alert(
            state.time_elapsed_s,
            AlertSeverity::Critical,
            AlertKind::AmmoniaHigh,
            format!("ammonia critical: {:.1} ppm", nh3_ppm),
        ));
    }
    state.nh3_alert_active = nh3_active_now;

    state.alerts.extend(alerts_delta.iter().cloned());
    state.time_elapsed_s += input.dt_s;

    Ok((state, alerts_delta))
}

fn make_alert(time_elapsed_s: f64, severity: AlertSeverity, kind: AlertKind, message: String) -> Alert {
    Alert {
        time_elapsed_s,
        severity,
        kind,
        message,
    }
}


/// Invariant 5 (spec.md §8): composition fractions sum to 1 within
/// 1e-6 after every tick, for any vapor inflow rate and any air
/// handler flow.
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn composition_sum_stays_normalized(
            vapor_moles in 0.0_f64..5.0,
            handler_on in any::<bool>(),
            ticks in 1usize..30,
        ) {
            let config = tests::room_config();
            let ac = tests::ac_unit();
            let handler = tests::air_handler();
            let mut state = tests::initial_state();
            state.air_handler_on = handler_on;
            state.air_handler_mode = if handler_on { "high".to_string() } else { "off".to_string() };

            for _ in 0..ticks {
                let vapor = vec![VaporInflow { species_id: "h2o".to_string(), moles: vapor_moles }];
                let input = RoomStepInput {
                    outside_ambient_temp_c: 15.0,
                    burner_spillover_w: 100.0,
                    dt_s: 0.25,
                    altitude_pressure_pa: 101_325.0,
                };
                let (new_state, _) = room_step(state, &config, &ac, &handler, &vapor, input).unwrap();
                prop_assert!((new_state.composition_sum() - 1.0).abs() < 1e-6);
                state = new_state;
            }
        }
    }
}
