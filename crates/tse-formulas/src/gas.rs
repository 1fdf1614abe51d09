//! Ideal-gas pressure and scrubber gas-exchange formulas.

use crate::error::{FormulaError, FormulaResult};
use tse_core::constants::GAS_CONSTANT_J_PER_MOL_K;

/// `P = n * R * T / V`. `n_mol` total moles, `t_k` Kelvin, `v_m3` cubic
/// meters.
pub fn ideal_gas_pressure(n_mol: f64, t_k: f64, v_m3: f64) -> FormulaResult<f64> {
    if v_m3 <= 0.0 {
        return Err(FormulaError::BadParameters {
            what: "ideal_gas_pressure",
            reason: "v_m3 must be positive".to_string(),
        });
    }
    Ok(n_mol * GAS_CONSTANT_J_PER_MOL_K * t_k / v_m3)
}

/// Fraction of the room's atmosphere exchanged with the outside air
/// over one step, given a volumetric flow rate: `min(1, flow*dt / V)`.
pub fn exchange_fraction(flow_m3_per_s: f64, dt_s: f64, v_m3: f64) -> FormulaResult<f64> {
    if v_m3 <= 0.0 {
        return Err(FormulaError::BadParameters {
            what: "exchange_fraction",
            reason: "v_m3 must be positive".to_string(),
        });
    }
    Ok((flow_m3_per_s * dt_s / v_m3).clamp(0.0, 1.0))
}

/// One scrubber exchange step for a single species:
/// `delta_f = (target - current) * exchange_fraction * efficiency`.
pub fn gas_exchange_step(
    current_fraction: f64,
    target_fraction: f64,
    exchange_fraction: f64,
    efficiency: f64,
) -> f64 {
    (target_fraction - current_fraction) * exchange_fraction * efficiency
}
