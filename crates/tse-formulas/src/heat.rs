//! Heat transfer, phase change, and colligative-property formulas.

use crate::error::{FormulaError, FormulaResult};
use tse_core::constants::GAS_CONSTANT_J_PER_MOL_K;

/// `Q = m * c * dT`, with mass in kg (converted to g internally) and
/// specific heat in J/(g·°C). Returns energy in joules.
pub fn heat_energy(mass_kg: f64, specific_heat_j_per_g_c: f64, delta_t_c: f64) -> f64 {
    let mass_g = mass_kg * 1000.0;
    mass_g * specific_heat_j_per_g_c * delta_t_c
}

/// `Q_vap = m * L_v`, with mass in kg and latent heat in kJ/kg. Returns
/// energy in joules.
pub fn latent_heat(mass_kg: f64, latent_heat_kj_per_kg: f64) -> f64 {
    mass_kg * latent_heat_kj_per_kg * 1000.0
}

/// One Newton's-law-of-cooling step: exponential relaxation of `t`
/// toward `t_ambient` with rate `k` (1/s) over `dt` seconds.
pub fn newton_cooling_step(t_c: f64, t_ambient_c: f64, k_per_s: f64, dt_s: f64) -> f64 {
    t_ambient_c + (t_c - t_ambient_c) * (-k_per_s * dt_s).exp()
}

/// Dynamic ebullioscopic constant, computed from the solvent's current
/// boiling temperature rather than a fixed table value:
///
/// `Kb = R * T_boil^2 * M / dH_vap`
///
/// `t_boil_k` in Kelvin, `molar_mass_kg_per_mol` in kg/mol, `dh_vap_j_per_mol`
/// in J/mol. Returns Kb in K·kg/mol.
pub fn dynamic_ebullioscopic_constant(
    t_boil_k: f64,
    molar_mass_kg_per_mol: f64,
    dh_vap_j_per_mol: f64,
) -> FormulaResult<f64> {
    if dh_vap_j_per_mol <= 0.0 {
        return Err(FormulaError::BadParameters {
            what: "dynamic_ebullioscopic_constant",
            reason: "dh_vap_j_per_mol must be positive".to_string(),
        });
    }
    Ok(GAS_CONSTANT_J_PER_MOL_K * t_boil_k * t_boil_k * molar_mass_kg_per_mol / dh_vap_j_per_mol)
}

/// Boiling point elevation: `dT_b = i * Kb * m`, where `i` is the
/// van't Hoff factor, `Kb` the (dynamic) ebullioscopic constant, and
/// `m` the molality (mol solute / kg solvent).
pub fn boiling_point_elevation(van_hoff_factor: f64, kb: f64, molality_mol_per_kg: f64) -> f64 {
    van_hoff_factor * kb * molality_mol_per_kg
}

#[cfg(test)]
mod tests {
    use super::*;
    use tse_core::units::c_to_k;

    #[test]
    fn heat_energy_matches_known_values() {
        // S1: 1000 g water, c=4.186 J/(g*K), dT=80K -> ~334880 J
        let q = heat_energy(1.0, 4.186, 80.0);
        assert!((q - 334_880.0).abs() < 1.0);
    }

    #[test]
    fn latent_heat_scales_with_mass() {
        let q1 = latent_heat(1.0, 2257.0);
        let q2 = latent_heat(2.0, 2257.0);
        assert!((q2 - 2.0 * q1).abs() < 1e-6);
    }

    #[test]
    fn newton_cooling_relaxes_toward_ambient() {
        let mut t = 100.0;
        for _ in 0..1000 {
            t = newton_cooling_step(t, 20.0, 0.01, 1.0);
        }
        assert!((t - 20.0).abs() < 0.5);
    }

    #[test]
    fn newton_cooling_is_noop_at_ambient() {
        let t = newton_cooling_step(20.0, 20.0, 0.01, 10.0);
        assert!((t - 20.0).abs() < 1e-9);
    }

    #[test]
    fn dynamic_kb_matches_water_reference_order_of_magnitude() {
        // Water's textbook Kb is ~0.512 K*kg/mol; molar mass 0.018 kg/mol,
        // dH_vap ~40660 J/mol at 373.15K.
        let kb = dynamic_ebullioscopic_constant(c_to_k(100.0), 0.018015, 40_660.0).unwrap();
        assert!((kb - 0.513).abs() < 0.05, "got {kb}");
    }

    #[test]
    fn boiling_point_elevation_scales_linearly() {
        // S3: i=1.9, molality=0.513 mol/kg, Kb~0.512 -> dT ~ 0.50C
        let dt = boiling_point_elevation(1.9, 0.512, 0.513);
        assert!((dt - 0.50).abs() < 0.05, "got {dt}");
    }
}
