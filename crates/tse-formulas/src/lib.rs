//! tse-formulas: the pure, side-effect-free formula library (C1).
//!
//! Every function here is a stateless, deterministic computation over
//! plain numbers. None of them touch the catalogs, the pot, or the
//! room — callers (tse-pot, tse-room) own the domain objects and pass
//! in the scalars these formulas need.

pub mod antoine;
pub mod error;
pub mod gas;
pub mod heat;
pub mod isa;
pub mod pid;

pub use antoine::{boiling_temperature, AntoineCoefficients, AntoineSolution};
pub use error::{FormulaError, FormulaResult};
pub use gas::{exchange_fraction, gas_exchange_step, ideal_gas_pressure};
pub use heat::{dynamic_ebullioscopic_constant, heat_energy, latent_heat, newton_cooling_step};
pub use isa::pressure_isa;
pub use pid::{pid_step, PidGains, PidState};
