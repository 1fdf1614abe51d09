//! Persisted-record shapes, one level up from the in-memory
//! [`tse_engine::Scorecard`]: a small manifest carrying the run id and
//! timestamp, plus the full scorecard payload it describes.

use serde::{Deserialize, Serialize};
use tse_engine::Scorecard;

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardManifest {
    pub run_id: RunId,
    pub experiment_id: String,
    pub timestamp: String,
    pub solver_version: String,
}

/// What gets written to disk for one boil event: the manifest plus
/// the scorecard it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardRecord {
    pub manifest: ScorecardManifest,
    pub scorecard: Scorecard,
}
