//! tse-pot: the pot process (C4).
//!
//! A pure state machine over liquid mass, temperature, phase, residue,
//! and vapor emission rate, stepped once per sub-integration tick by
//! the engine.

pub mod error;
pub mod state;
pub mod step;

pub use error::{PotError, PotResult};
pub use state::{BoilEvent, DecompositionEmission, PotPhase, PotState, VaporEmission};
pub use step::{pot_step, PotStepInput, PotStepOutput};
