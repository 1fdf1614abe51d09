//! Scorecard persistence: one directory per content-hashed run id,
//! holding a manifest and a single frozen [`Scorecard`] per boil event.

use crate::error::{ResultsError, ResultsResult};
use crate::hash::compute_scorecard_id;
use crate::types::{ScorecardManifest, ScorecardRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tse_engine::Scorecard;

pub const SOLVER_VERSION: &str = "0.1.0";

#[derive(Clone)]
pub struct ScorecardStore {
    root_dir: PathBuf,
}

impl ScorecardStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("scorecard.json").exists()
    }

    /// Freeze `scorecard` to disk under a content-hashed run ID,
    /// returning the manifest that was written alongside it.
    pub fn save_scorecard(
        &self,
        experiment_id: &str,
        scorecard: &Scorecard,
        timestamp: impl Into<String>,
    ) -> ResultsResult<ScorecardManifest> {
        let run_id = compute_scorecard_id(experiment_id, scorecard, SOLVER_VERSION);
        let manifest = ScorecardManifest {
            run_id: run_id.clone(),
            experiment_id: experiment_id.to_string(),
            timestamp: timestamp.into(),
            solver_version: SOLVER_VERSION.to_string(),
        };

        let run_dir = self.run_dir(&run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let scorecard_json = serde_json::to_string_pretty(scorecard)?;
        fs::write(run_dir.join("scorecard.json"), scorecard_json)?;

        Ok(manifest)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<ScorecardManifest> {
        let path = self.run_dir(run_id).join("manifest.json");
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_scorecard(&self, run_id: &str) -> ResultsResult<Scorecard> {
        let path = self.run_dir(run_id).join("scorecard.json");
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_record(&self, run_id: &str) -> ResultsResult<ScorecardRecord> {
        Ok(ScorecardRecord {
            manifest: self.load_manifest(run_id)?,
            scorecard: self.load_scorecard(run_id)?,
        })
    }

    pub fn list_runs(&self, experiment_id: &str) -> ResultsResult<Vec<ScorecardManifest>> {
        let mut runs = Vec::new();
        if !self.root_dir.exists() {
            return Ok(runs);
        }
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    if manifest.experiment_id == experiment_id {
                        runs.push(manifest);
                    }
                }
            }
        }
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

pub fn for_catalog_root(catalog_root: &Path) -> ResultsResult<ScorecardStore> {
    ScorecardStore::new(catalog_root.join(".tse").join("scorecards"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tse_engine::PotScorecardSummary;

    fn scorecard() -> Scorecard {
        Scorecard {
            experiment_id: "l1e1".to_string(),
            sim_time_s: 167.0,
            pot: PotScorecardSummary {
                substance_id: "water".to_string(),
                temperature_c: 100.0,
                effective_boiling_point_c: 100.0,
                time_to_boil_s: 167.0,
                burner_step: 3,
                altitude_m: 0.0,
                pressure_pa: 101_325.0,
            },
            room: None,
            ideal_times: vec![],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!("tse_results_store_{}", std::process::id()));
        let store = ScorecardStore::new(dir.clone()).unwrap();

        let card = scorecard();
        let manifest = store
            .save_scorecard("l1e1", &card, "2026-01-01T00:00:00Z")
            .unwrap();

        assert!(store.has_run(&manifest.run_id));
        let loaded = store.load_scorecard(&manifest.run_id).unwrap();
        assert_eq!(loaded.pot.substance_id, "water");

        let runs = store.list_runs("l1e1").unwrap();
        assert_eq!(runs.len(), 1);

        store.delete_run(&manifest.run_id).unwrap();
        assert!(!store.has_run(&manifest.run_id));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loading_unknown_run_errors() {
        let dir = std::env::temp_dir().join(format!("tse_results_store_missing_{}", std::process::id()));
        let store = ScorecardStore::new(dir.clone()).unwrap();
        let err = store.load_manifest("nope").unwrap_err();
        assert!(matches!(err, ResultsError::RunNotFound { .. }));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_is_content_hashed_and_idempotent() {
        let dir = std::env::temp_dir().join(format!("tse_results_store_hash_{}", std::process::id()));
        let store = ScorecardStore::new(dir.clone()).unwrap();
        let card = scorecard();
        let m1 = store.save_scorecard("l1e1", &card, "t1").unwrap();
        let m2 = store.save_scorecard("l1e1", &card, "t2").unwrap();
        assert_eq!(m1.run_id, m2.run_id);
        fs::remove_dir_all(&dir).ok();
    }
}
