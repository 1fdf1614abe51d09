//! tse-results: scorecard export and persistence (C8, export half).
//!
//! Splits into content-hashed run IDs, immutable manifests, and a
//! directory-per-run store holding frozen pot-boil
//! [`tse_engine::Scorecard`]s.

pub mod error;
pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use error::{ResultsError, ResultsResult};
pub use export::{
    ideal_times_to_csv, scorecard_to_json, scorecards_to_csv, scorecards_to_jsonl, to_record,
};
pub use hash::compute_scorecard_id;
pub use store::{for_catalog_root, ScorecardStore, SOLVER_VERSION};
pub use types::{RunId, ScorecardManifest, ScorecardRecord};
