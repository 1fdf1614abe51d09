use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from the simulation driver (C6) and progression tracker
/// (C7) — spec.md §7.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine advanced before catalogs were loaded")]
    NotReady,

    #[error("bad input: {reason}")]
    BadInput { reason: String },

    #[error("pot halted by decomposition; refill to resume heating")]
    DecompositionHalt,

    #[error("unknown substance id: {id}")]
    UnknownSubstance { id: String },

    #[error("unknown equipment id: {kind} '{id}'")]
    UnknownEquipment { kind: &'static str, id: String },

    #[error(transparent)]
    Catalog(#[from] tse_substances::CatalogError),

    #[error(transparent)]
    Equipment(#[from] tse_equipment::EquipmentError),

    #[error(transparent)]
    Pot(#[from] tse_pot::PotError),

    #[error(transparent)]
    Room(#[from] tse_room::RoomError),

    #[error(transparent)]
    Formula(#[from] tse_formulas::FormulaError),
}
