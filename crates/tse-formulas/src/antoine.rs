//! Antoine equation: empirical vapor-pressure/temperature relation.
//!
//! `log10(P_mmHg) = A - B / (C + T)`, solved either direction. Per
//! spec.md §4.1/§9 the inverse never clamps at the verified range
//! boundary — it flags `extrapolated` and returns the value anyway.

use crate::error::{FormulaError, FormulaResult};
use tse_core::constants::PA_PER_MMHG;

/// Antoine coefficients for a substance, plus the range over which
/// they were empirically verified (`T_min_c..=T_max_c`). This range is
/// advisory, not a clamp (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntoineCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub t_min_c: f64,
    pub t_max_c: f64,
}

/// Result of solving the Antoine equation for temperature at a given
/// pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntoineSolution {
    pub temp_c: f64,
    pub extrapolated: bool,
    pub verified_range: (f64, f64),
}

/// Solve the Antoine equation for boiling temperature at `pressure_pa`.
///
/// Never clamps: if the solved temperature falls outside
/// `[t_min_c, t_max_c]`, the value is returned anyway with
/// `extrapolated = true`.
pub fn boiling_temperature(
    pressure_pa: f64,
    coeffs: AntoineCoefficients,
) -> FormulaResult<AntoineSolution> {
    if !pressure_pa.is_finite() || pressure_pa <= 0.0 {
        return Err(FormulaError::BadParameters {
            what: "antoine pressure",
            reason: format!("pressure_pa must be positive and finite, got {pressure_pa}"),
        });
    }

    let p_mmhg = pressure_pa / PA_PER_MMHG;
    let log10_p = p_mmhg.log10();
    if !log10_p.is_finite() {
        return Err(FormulaError::OutOfDomain {
            what: "antoine log10(pressure)",
            value: pressure_pa,
        });
    }

    let denom = coeffs.a - log10_p;
    if denom.abs() < 1e-12 {
        return Err(FormulaError::OutOfDomain {
            what: "antoine denominator (A - log10(P))",
            value: denom,
        });
    }

    let temp_c = coeffs.b / denom - coeffs.c;
    if !temp_c.is_finite() {
        return Err(FormulaError::OutOfDomain {
            what: "antoine solved temperature",
            value: temp_c,
        });
    }

    let extrapolated = temp_c < coeffs.t_min_c || temp_c > coeffs.t_max_c;

    Ok(AntoineSolution {
        temp_c,
        extrapolated,
        verified_range: (coeffs.t_min_c, coeffs.t_max_c),
    })
}

/// Evaluate the Antoine equation forward: vapor pressure at a given
/// temperature. Used to validate that a substance's declared sea-level
/// boiling point agrees with its Antoine coefficients (spec.md §4.2),
/// and for the invariant-8 round-trip check.
pub fn vapor_pressure_pa(temp_c: f64, coeffs: AntoineCoefficients) -> FormulaResult<f64> {
    let denom = coeffs.c + temp_c;
    if denom.abs() < 1e-12 {
        return Err(FormulaError::OutOfDomain {
            what: "antoine denominator (C + T)",
            value: denom,
        });
    }

    let log10_p = coeffs.a - coeffs.b / denom;
    let p_mmhg = 10f64.powf(log10_p);
    let p_pa = p_mmhg * PA_PER_MMHG;

    if !p_pa.is_finite() {
        return Err(FormulaError::OutOfDomain {
            what: "antoine forward pressure",
            value: p_pa,
        });
    }

    Ok(p_pa)
}
