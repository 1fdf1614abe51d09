use thiserror::Error;

pub type PotResult<T> = Result<T, PotError>;

/// Errors from the pot process (spec.md §7).
#[derive(Error, Debug)]
pub enum PotError {
    #[error("bad pot input: {reason}")]
    BadInput { reason: String },

    #[error("formula error in pot step: {0}")]
    Formula(#[from] tse_formulas::FormulaError),

    #[error("catalog error in pot step: {0}")]
    Catalog(#[from] tse_substances::CatalogError),
}
