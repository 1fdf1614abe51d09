//! International Standard Atmosphere (ISA) troposphere pressure model.

use tse_core::constants::isa::{AIR_MOLAR_MASS_KG_PER_MOL, LAPSE_RATE_K_PER_M, P0_PA, T0_K};
use tse_core::constants::{GAS_CONSTANT_J_PER_MOL_K, STANDARD_GRAVITY_MPS2};

/// ISA troposphere exponent `(g * M) / (R * L)`.
fn isa_exponent() -> f64 {
    (STANDARD_GRAVITY_MPS2 * AIR_MOLAR_MASS_KG_PER_MOL)
        / (GAS_CONSTANT_J_PER_MOL_K * LAPSE_RATE_K_PER_M)
}

/// Pressure at a given altitude (meters above sea level), per the ISA
/// troposphere model. Negative altitudes (e.g. the Dead Sea, -430 m)
/// are valid inputs.
///
/// For altitudes where `T0 - L*h <= 0` (above the troposphere), the
/// pressure at the tropopause (11 km) is returned instead — a genuine
/// clamp, not the Antoine extrapolation-flagging behavior, because the
/// troposphere model itself is undefined there (spec.md §4.1).
pub fn pressure_isa(altitude_m: f64) -> f64 {
    let temp_at_altitude = T0_K - LAPSE_RATE_K_PER_M * altitude_m;
    if temp_at_altitude <= 0.0 {
        return pressure_isa(tse_core::constants::isa::TROPOPAUSE_ALTITUDE_M);
    }

    let ratio = temp_at_altitude / T0_K;
    P0_PA * ratio.powf(isa_exponent())
}
