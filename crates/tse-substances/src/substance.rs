//! Normalized, engine-facing substance representation (spec.md §3).
//!
//! `CompoundRecord`/`ElementRecord` (the raw JSON shapes) are resolved
//! into this single type at load time — tagged by `SubstanceKind` so
//! callers can tell an element apart from a compound or solution
//! without re-inspecting which directory it came from (spec.md §9:
//! "tagged variants for Element | PureCompound | Solution").

use crate::error::{CatalogError, CatalogResult};
use crate::phase::Phase;
use crate::records::{CompoundRecord, ElementRecord};
use std::path::Path;
use tse_core::ids::SpeciesId;
use tse_formulas::antoine::{self, AntoineCoefficients};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstanceKind {
    Element,
    PureCompound,
    Solution,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificHeat {
    pub solid_j_per_g_c: Option<f64>,
    pub liquid_j_per_g_c: Option<f64>,
    pub gas_j_per_g_c: Option<f64>,
}

impl SpecificHeat {
    pub fn for_phase(&self, phase: Phase) -> Option<f64> {
        match phase {
            Phase::Solid => self.solid_j_per_g_c,
            Phase::Liquid => self.liquid_j_per_g_c,
            Phase::Gas => self.gas_j_per_g_c,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExposureLimits {
    pub warn_ppm: f64,
    pub critical_ppm: f64,
}

#[derive(Debug, Clone)]
pub struct DecompositionProduct {
    pub species_id: SpeciesId,
    pub moles_per_kg: f64,
}

/// Result of resolving a substance's boiling point at a given pressure
/// (Antoine-inverse, plus ebullioscopic elevation for solutions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveBoilingPoint {
    pub temp_c: f64,
    pub extrapolated: bool,
    pub verified_range: (f64, f64),
}

/// A single immutable substance record, resolved from the catalog.
#[derive(Debug, Clone)]
pub struct Substance {
    pub id: String,
    pub kind: SubstanceKind,
    pub name: String,
    pub molar_mass_kg_per_mol: f64,
    pub phase_at_ambient: Phase,
    pub specific_heat: SpecificHeat,
    pub latent_heat_vap_kj_per_kg: Option<f64>,
    pub latent_heat_fus_kj_per_kg: Option<f64>,
    pub antoine: Option<AntoineCoefficients>,
    pub melting_point_c: f64,
    pub boiling_point_sea_level_c: f64,
    pub van_hoff_factor: f64,
    pub molality_mol_per_kg: Option<f64>,
    pub non_volatile_mass_fraction: f64,
    pub cooling_coefficient_per_s: f64,
    pub decomposition_point_c: Option<f64>,
    pub decomposition_products: Vec<DecompositionProduct>,
    pub requires_room_controls: bool,
    pub exposure_limits_ppm: Option<ExposureLimits>,
    pub can_boil: bool,
}

impl Substance {
    /// Resolve a compound or solution record (same JSON schema; the
    /// distinction is the directory it was loaded from and whether the
    /// resulting `kind` is reported as `PureCompound` or `Solution`).
    ///
    /// Returns the substance plus an optional warning message when the
    /// declared sea-level boiling point disagrees with the
    /// Antoine-derived value by more than 0.5C (spec.md §4.2: "warn and
    /// prefer Antoine").
    pub fn from_compound(
        record: CompoundRecord,
        kind: SubstanceKind,
        path: &Path,
    ) -> CatalogResult<(Self, Option<String>)> {
        if !(0.0..=1.0).contains(&record.non_volatile_mass_fraction) {
            return Err(CatalogError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "non_volatile_mass_fraction must be in [0,1], got {}",
                    record.non_volatile_mass_fraction
                ),
            });
        }
        if record.van_hoff_factor < 1.0 {
            return Err(CatalogError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "van_hoff_factor must be >= 1, got {}",
                    record.van_hoff_factor
                ),
            });
        }

        let antoine = record.antoine.as_ref().map(|a| AntoineCoefficients {
            a: a.a,
            b: a.b,
            c: a.c,
            t_min_c: a.t_min_c,
            t_max_c: a.t_max_c,
        });

        let (boiling_point_sea_level_c, warning, can_boil) = match antoine {
            Some(coeffs) => {
                let derived = antoine::boiling_temperature(101_325.0, coeffs)
                    .map_err(|e| CatalogError::Invalid {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })?
                    .temp_c;

                let warning = match record.boiling_point_sea_level_c {
                    Some(declared) if (declared - derived).abs() > 0.5 => Some(format!(
                        "substance '{}': declared boiling_point_sea_level_c={} disagrees with \
                         Antoine-derived {} by more than 0.5C; using the Antoine value",
                        record.id, declared, derived
                    )),
                    _ => None,
                };

                (derived, warning, true)
            }
            None => {
                let declared = record.boiling_point_sea_level_c.unwrap_or(f64::INFINITY);
                (declared, None, false)
            }
        };

        let decomposition_products = record
            .decomposition_products
            .into_iter()
            .map(|p| DecompositionProduct {
                species_id: SpeciesId::new(p.species_id),
                moles_per_kg: p.moles_per_kg,
            })
            .collect();

        let substance = Substance {
            id: record.id,
            kind,
            name: record.name,
            molar_mass_kg_per_mol: record.molar_mass_kg_per_mol,
            phase_at_ambient: record.phase_at_ambient,
            specific_heat: SpecificHeat {
                solid_j_per_g_c: record.specific_heat_j_per_g_c.solid,
                liquid_j_per_g_c: record.specific_heat_j_per_g_c.liquid,
                gas_j_per_g_c: record.specific_heat_j_per_g_c.gas,
            },
            latent_heat_vap_kj_per_kg: record.latent_heat_vap_kj_per_kg,
            latent_heat_fus_kj_per_kg: record.latent_heat_fus_kj_per_kg,
            antoine,
            melting_point_c: record.melting_point_c,
            boiling_point_sea_level_c,
            van_hoff_factor: record.van_hoff_factor,
            molality_mol_per_kg: record.molality_mol_per_kg,
            non_volatile_mass_fraction: record.non_volatile_mass_fraction,
            cooling_coefficient_per_s: record
                .cooling_coefficient
                .unwrap_or(tse_core::constants::DEFAULT_COOLING_COEFFICIENT_PER_S),
            decomposition_point_c: record.decomposition_point_c,
            decomposition_products,
            requires_room_controls: record.requires_room_controls,
            exposure_limits_ppm: record.exposure_limits_ppm.map(|e| ExposureLimits {
                warn_ppm: e.warn,
                critical_ppm: e.critical,
            }),
            can_boil,
        };

        Ok((substance, warning))
    }

    pub fn from_element(record: ElementRecord) -> Self {
        let specific_heat = SpecificHeat {
            solid_j_per_g_c: Some(record.specific_heat_j_g_c),
            liquid_j_per_g_c: Some(record.specific_heat_j_g_c),
            gas_j_per_g_c: Some(record.specific_heat_j_g_c),
        };

        Substance {
            id: record.symbol.clone(),
            kind: SubstanceKind::Element,
            name: record.name,
            molar_mass_kg_per_mol: record.atomic_mass / 1000.0,
            phase_at_ambient: Phase::Solid,
            specific_heat,
            latent_heat_vap_kj_per_kg: None,
            latent_heat_fus_kj_per_kg: None,
            antoine: None,
            melting_point_c: record.melting_point_c,
            boiling_point_sea_level_c: record.boiling_point_c,
            van_hoff_factor: 1.0,
            molality_mol_per_kg: None,
            non_volatile_mass_fraction: 0.0,
            cooling_coefficient_per_s: tse_core::constants::DEFAULT_COOLING_COEFFICIENT_PER_S,
            decomposition_point_c: None,
            decomposition_products: Vec::new(),
            requires_room_controls: false,
            exposure_limits_ppm: None,
            can_boil: false,
        }
    }

    /// Antoine-inverse at `pressure_pa`, plus ebullioscopic elevation
    /// if this is a solution (spec.md §4.2).
    pub fn effective_boiling_point(&self, pressure_pa: f64) -> CatalogResult<EffectiveBoilingPoint> {
        let coeffs = self.antoine.ok_or_else(|| CatalogError::Invalid {
            path: std::path::PathBuf::new(),
            reason: format!("substance '{}' has no Antoine coefficients (can_boil=false)", self.id),
        })?;

        let base = antoine::boiling_temperature(pressure_pa, coeffs)?;

        let elevation = match self.molality_mol_per_kg {
            Some(molality) if molality > 0.0 => {
                let dh_vap_j_per_mol = self
                    .latent_heat_vap_kj_per_kg
                    .map(|kj_per_kg| kj_per_kg * 1000.0 * self.molar_mass_kg_per_mol)
                    .unwrap_or(0.0);
                if dh_vap_j_per_mol > 0.0 {
                    let kb = tse_formulas::heat::dynamic_ebullioscopic_constant(
                        tse_core::units::c_to_k(base.temp_c),
                        self.molar_mass_kg_per_mol,
                        dh_vap_j_per_mol,
                    )?;
                    tse_formulas::heat::boiling_point_elevation(self.van_hoff_factor, kb, molality)
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };

        Ok(EffectiveBoilingPoint {
            temp_c: base.temp_c + elevation,
            extrapolated: base.extrapolated,
            verified_range: base.verified_range,
        })
    }

    /// True iff this substance is naturally liquid at `ambient_temp_c`
    /// (spec.md §4.2 `available_for`).
    pub fn is_liquid_at(&self, ambient_temp_c: f64) -> bool {
        self.melting_point_c < ambient_temp_c && ambient_temp_c < self.boiling_point_sea_level_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AntoineRecord, SpecificHeatByPhase};
    use std::path::PathBuf;

    fn water_record() -> CompoundRecord {
        CompoundRecord {
            id: "water".to_string(),
            name: "Water".to_string(),
            molar_mass_kg_per_mol: 0.018015,
            phase_at_ambient: Phase::Liquid,
            specific_heat_j_per_g_c: SpecificHeatByPhase {
                solid: Some(2.05),
                liquid: Some(4.186),
                gas: Some(1.996),
            },
            latent_heat_vap_kj_per_kg: Some(2257.0),
            latent_heat_fus_kj_per_kg: Some(334.0),
            antoine: Some(AntoineRecord {
                a: 8.07131,
                b: 1730.63,
                c: 233.426,
                t_min_c: 1.0,
                t_max_c: 100.0,
            }),
            melting_point_c: 0.0,
            boiling_point_sea_level_c: Some(100.0),
            van_hoff_factor: 1.0,
            molality_mol_per_kg: None,
            non_volatile_mass_fraction: 0.0,
            cooling_coefficient: Some(0.0015),
            decomposition_point_c: None,
            decomposition_products: Vec::new(),
            requires_room_controls: false,
            exposure_limits_ppm: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn water_resolves_without_warning() {
        let (substance, warning) =
            Substance::from_compound(water_record(), SubstanceKind::PureCompound, &PathBuf::new())
                .unwrap();
        assert!(warning.is_none());
        assert!(substance.can_boil);
        assert!((substance.boiling_point_sea_level_c - 100.0).abs() < 0.5);
    }

    #[test]
    fn inconsistent_declared_boiling_point_warns_and_prefers_antoine() {
        let mut record = water_record();
        record.boiling_point_sea_level_c = Some(120.0);
        let (substance, warning) =
            Substance::from_compound(record, SubstanceKind::PureCompound, &PathBuf::new()).unwrap();
        assert!(warning.is_some());
        assert!((substance.boiling_point_sea_level_c - 100.0).abs() < 0.5);
    }

    #[test]
    fn saltwater_elevation_raises_effective_boiling_point() {
        let mut record = water_record();
        record.id = "saltwater_3pct".to_string();
        record.van_hoff_factor = 1.9;
        record.molality_mol_per_kg = Some(0.513);
        let (substance, _) =
            Substance::from_compound(record, SubstanceKind::Solution, &PathBuf::new()).unwrap();

        let ebp = substance.effective_boiling_point(101_325.0).unwrap();
        assert!(
            (ebp.temp_c - 100.50).abs() < 0.1,
            "expected ~100.5C, got {}",
            ebp.temp_c
        );
    }

    #[test]
    fn non_boiling_substance_without_antoine() {
        let mut record = water_record();
        record.antoine = None;
        record.boiling_point_sea_level_c = None;
        let (substance, _) =
            Substance::from_compound(record, SubstanceKind::PureCompound, &PathBuf::new()).unwrap();
        assert!(!substance.can_boil);
        assert!(substance.effective_boiling_point(101_325.0).is_err());
    }

    #[test]
    fn invalid_non_volatile_mass_fraction_is_rejected() {
        let mut record = water_record();
        record.non_volatile_mass_fraction = 1.5;
        let err =
            Substance::from_compound(record, SubstanceKind::PureCompound, &PathBuf::new())
                .unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }
}
