//! tse-engine: the simulation driver (C6) and progression tracker
//! (C7).
//!
//! `Engine` is the sole entry point consumers integrate against: one
//! constructor, a batch of `set_*` input methods, and a single
//! `advance` call that returns a [`Snapshot`]. Everything downstream
//! of the formula/catalog/pot/room layers lives here.

pub mod adapters;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod progression;
pub mod snapshot;

pub use adapters::{ResolvedLocation, SceneCommand};
pub use engine::{Engine, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use inputs::{EngineInputs, PotZone};
pub use progression::{
    Experiment, IdealTimeForStep, PotScorecardSummary, ProgressionTracker, RoomScorecardSummary,
    Scorecard,
};
pub use snapshot::{ExtrapolationFlag, PotSnapshot, RoomSnapshot, Snapshot};
