use thiserror::Error;

pub type RoomResult<T> = Result<T, RoomError>;

/// Errors from the room process (spec.md §7).
#[derive(Error, Debug)]
pub enum RoomError {
    #[error("bad room input: {reason}")]
    BadInput { reason: String },

    #[error("formula error in room step: {0}")]
    Formula(#[from] tse_formulas::FormulaError),
}
