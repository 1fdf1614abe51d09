//! Loads and indexes the substance catalog from a directory tree
//! (spec.md §6): `compounds/`, `solutions/`, and `elements/`, each a
//! flat folder of `*.json` files.

use crate::error::{CatalogError, CatalogResult};
use crate::records::{CompoundRecord, ElementRecord};
use crate::substance::{EffectiveBoilingPoint, Substance, SubstanceKind};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The resolved substance catalog: every compound, solution, and
/// element keyed by its declared id (elements are keyed by symbol).
///
/// Read-only after `load_all` and cheap to clone (an `Arc` handle) so
/// the engine can share one catalog across ticks without re-loading it
/// (spec.md §5: "Catalogs are read-only after load and may be shared
/// freely").
#[derive(Debug, Default, Clone)]
pub struct SubstanceCatalog {
    substances: Arc<HashMap<String, Substance>>,
}

impl SubstanceCatalog {
    /// Walk `root/compounds`, `root/solutions`, `root/elements` and
    /// resolve every `*.json` file found into a `Substance`. Returns
    /// the catalog plus any non-fatal consistency warnings collected
    /// along the way (spec.md §4.2: declared-vs-Antoine disagreement
    /// is a warning, not a load failure).
    pub fn load_all(root: &Path) -> CatalogResult<(Self, Vec<String>)> {
        if !root.is_dir() {
            return Err(CatalogError::Missing {
                path: root.to_path_buf(),
            });
        }

        let mut substances = HashMap::new();
        let mut warnings = Vec::new();

        Self::load_compound_dir(
            &root.join("compounds"),
            SubstanceKind::PureCompound,
            &mut substances,
            &mut warnings,
        )?;
        Self::load_compound_dir(
            &root.join("solutions"),
            SubstanceKind::Solution,
            &mut substances,
            &mut warnings,
        )?;
        Self::load_element_dir(&root.join("elements"), &mut substances)?;

        Ok((
            Self {
                substances: Arc::new(substances),
            },
            warnings,
        ))
    }

    fn load_compound_dir(
        dir: &Path,
        kind: SubstanceKind,
        out: &mut HashMap<String, Substance>,
        warnings: &mut Vec<String>,
    ) -> CatalogResult<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in json_files(dir)? {
            let raw = fs::read_to_string(&entry).map_err(|source| CatalogError::Io {
                path: entry.clone(),
                source,
            })?;
            let record: CompoundRecord =
                serde_json::from_str(&raw).map_err(|e| CatalogError::Invalid {
                    path: entry.clone(),
                    reason: e.to_string(),
                })?;
            let (substance, warning) = Substance::from_compound(record, kind, &entry)?;
            if let Some(w) = warning {
                warnings.push(w);
            }
            out.insert(substance.id.clone(), substance);
        }
        Ok(())
    }

    fn load_element_dir(dir: &Path, out: &mut HashMap<String, Substance>) -> CatalogResult<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in json_files(dir)? {
            let raw = fs::read_to_string(&entry).map_err(|source| CatalogError::Io {
                path: entry.clone(),
                source,
            })?;
            let record: ElementRecord =
                serde_json::from_str(&raw).map_err(|e| CatalogError::Invalid {
                    path: entry.clone(),
                    reason: e.to_string(),
                })?;
            let substance = Substance::from_element(record);
            out.insert(substance.id.clone(), substance);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> CatalogResult<&Substance> {
        self.substances
            .get(id)
            .ok_or_else(|| CatalogError::UnknownSpecies { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }

    /// Compounds and solutions that are liquid at `ambient_temp_c` and
    /// may legally be poured into the pot given the current room-controls
    /// unlock state (spec.md §4.2). Elements are catalog entries for
    /// decomposition products, not pourable substances, and are excluded.
    pub fn available_for(
        &self,
        ambient_temp_c: f64,
        room_controls_unlocked: bool,
    ) -> Vec<&Substance> {
        self.substances
            .values()
            .filter(|s| s.kind != SubstanceKind::Element)
            .filter(|s| !s.requires_room_controls || room_controls_unlocked)
            .filter(|s| s.is_liquid_at(ambient_temp_c))
            .collect()
    }

    pub fn effective_boiling_point(
        &self,
        id: &str,
        pressure_pa: f64,
    ) -> CatalogResult<EffectiveBoilingPoint> {
        self.get(id)?.effective_boiling_point(pressure_pa)
    }
}

fn json_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn water_json() -> &'static str {
        r#"{
            "id": "water",
            "name": "Water",
            "molar_mass_kg_per_mol": 0.018015,
            "phase_at_ambient": "liquid",
            "specific_heat_j_per_g_c": { "liquid": 4.186, "gas": 1.996, "solid": 2.05 },
            "latent_heat_vap_kj_per_kg": 2257.0,
            "latent_heat_fus_kj_per_kg": 334.0,
            "antoine": { "A": 8.07131, "B": 1730.63, "C": 233.426, "t_min_c": 1.0, "t_max_c": 100.0 },
            "melting_point_c": 0.0,
            "boiling_point_sea_level_c": 100.0
        }"#
    }

    fn sodium_json() -> &'static str {
        r#"{
            "atomic_number": 11,
            "symbol": "Na",
            "name": "Sodium",
            "atomic_mass": 22.990,
            "melting_point_c": 97.8,
            "boiling_point_c": 883.0,
            "density_kg_m3": 968.0,
            "specific_heat_j_g_c": 1.23
        }"#
    }

    #[test]
    fn loads_compound_and_element_trees() {
        let dir = std::env::temp_dir().join(format!(
            "tse_catalog_test_{}",
            std::process::id()
        ));
        write_file(&dir.join("compounds/water.json"), water_json());
        write_file(&dir.join("elements/sodium.json"), sodium_json());

        let (catalog, warnings) = SubstanceCatalog::load_all(&dir).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(catalog.len(), 2);

        let water = catalog.get("water").unwrap();
        assert!(water.can_boil);
        let na = catalog.get("Na").unwrap();
        assert!(!na.can_boil);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_root_is_reported() {
        let err = SubstanceCatalog::load_all(Path::new("/nonexistent/tse/root")).unwrap_err();
        assert!(matches!(err, CatalogError::Missing { .. }));
    }

    #[test]
    fn available_for_filters_by_ambient_temp_and_lock_state() {
        let dir = std::env::temp_dir().join(format!(
            "tse_catalog_test_avail_{}",
            std::process::id()
        ));
        write_file(&dir.join("compounds/water.json"), water_json());

        let (catalog, _) = SubstanceCatalog::load_all(&dir).unwrap();
        let at_room_temp = catalog.available_for(20.0, false);
        assert_eq!(at_room_temp.len(), 1);

        let below_freezing = catalog.available_for(-10.0, false);
        assert!(below_freezing.is_empty());

        fs::remove_dir_all(&dir).ok();
    }
}
