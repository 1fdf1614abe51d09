//! PID controller step (C1), used by the room's AC climate control (C5).
//!
//! Per spec.md §4.1: the integrator is clamped to `[-windup, +windup]`
//! *before* the `ki` multiplier is applied, and the derivative term
//! uses a first-difference on the raw error (no filtering) — this is
//! deliberately simpler than a production controller; see DESIGN.md for
//! why a first-difference derivative was kept rather than filtered.

use serde::{Deserialize, Serialize};

/// PID gains, in the direct `kp`/`ki`/`kd` form spec.md's AC unit
/// record declares (as opposed to the time-constant `ti`/`td` form).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

/// PID controller state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PidState {
    pub integral: f64,
    pub prev_error: f64,
}

/// One PID controller update.
///
/// Returns `(output, new_state)`. `windup` bounds the integrator
/// magnitude; it is applied to the accumulator itself, not to the
/// output.
pub fn pid_step(
    error: f64,
    state: PidState,
    dt_s: f64,
    gains: PidGains,
    windup: f64,
) -> (f64, PidState) {
    let p_term = gains.kp * error;

    let raw_integral = state.integral + error * dt_s;
    let clamped_integral = raw_integral.clamp(-windup.abs(), windup.abs());
    let i_term = gains.ki * clamped_integral;

    let d_term = if dt_s > 0.0 {
        gains.kd * (error - state.prev_error) / dt_s
    } else {
        0.0
    };

    let output = p_term + i_term + d_term;

    let new_state = PidState {
        integral: clamped_integral,
        prev_error: error,
    };

    (output, new_state)
}
