//! Raw, directly-deserializable JSON record shapes (spec.md §3, §6).
//!
//! Unknown extra keys are preserved (via `extra`) but never
//! interpreted, per spec.md §6: "unknown extra keys are preserved but
//! not interpreted."

use crate::phase::Phase;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

fn default_van_hoff_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AntoineRecord {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    pub t_min_c: f64,
    pub t_max_c: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecificHeatByPhase {
    pub solid: Option<f64>,
    pub liquid: Option<f64>,
    pub gas: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecompositionProductRecord {
    pub species_id: String,
    pub moles_per_kg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExposureLimitsRecord {
    pub warn: f64,
    pub critical: f64,
}

/// Raw record shared by `compounds/*.json` and `solutions/*.json`.
/// Solutions are distinguished only by the directory they live in and
/// by carrying a `van_hoff_factor > 1` / `molality_mol_per_kg` in
/// practice — the schema itself is identical, matching spec.md §3's
/// single Substance entity with optional solution-only fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CompoundRecord {
    pub id: String,
    pub name: String,
    pub molar_mass_kg_per_mol: f64,
    pub phase_at_ambient: Phase,
    #[serde(default)]
    pub specific_heat_j_per_g_c: SpecificHeatByPhase,
    pub latent_heat_vap_kj_per_kg: Option<f64>,
    pub latent_heat_fus_kj_per_kg: Option<f64>,
    pub antoine: Option<AntoineRecord>,
    pub melting_point_c: f64,
    pub boiling_point_sea_level_c: Option<f64>,
    #[serde(default = "default_van_hoff_factor")]
    pub van_hoff_factor: f64,
    pub molality_mol_per_kg: Option<f64>,
    #[serde(default)]
    pub non_volatile_mass_fraction: f64,
    pub cooling_coefficient: Option<f64>,
    pub decomposition_point_c: Option<f64>,
    #[serde(default)]
    pub decomposition_products: Vec<DecompositionProductRecord>,
    #[serde(default)]
    pub requires_room_controls: bool,
    pub exposure_limits_ppm: Option<ExposureLimitsRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw record for `elements/*.json` — the periodic table. Atomic mass
/// MUST be a single scalar, never a range (spec.md §6); serde enforces
/// that by typing it as `f64`.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    pub atomic_mass: f64,
    pub melting_point_c: f64,
    pub boiling_point_c: f64,
    pub density_kg_m3: f64,
    pub specific_heat_j_g_c: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
