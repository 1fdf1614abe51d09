use thiserror::Error;

pub type FormulaResult<T> = Result<T, FormulaError>;

/// Errors from the formula library (C1).
///
/// `Extrapolated` is carried as a value on successful results (see
/// [`crate::AntoineSolution`]) rather than as an error variant here —
/// spec.md §9 explicitly replaces clamp-at-boundary with
/// flag-and-continue, so going outside the verified range is not a
/// failure. This variant exists for formulas (if any) that choose to
/// surface it as a hard error instead of a flag.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Out of domain for {what}: {value}")]
    OutOfDomain { what: &'static str, value: f64 },

    #[error("Extrapolated beyond verified range for {what}: {value}")]
    Extrapolated { what: &'static str, value: f64 },

    #[error("Bad parameters for {what}: {reason}")]
    BadParameters {
        what: &'static str,
        reason: String,
    },
}

impl From<FormulaError> for tse_core::TfError {
    fn from(err: FormulaError) -> Self {
        match err {
            FormulaError::OutOfDomain { what, value } => tse_core::TfError::NonFinite {
                what,
                value,
            },
            FormulaError::Extrapolated { what, value } => tse_core::TfError::NonFinite {
                what,
                value,
            },
            FormulaError::BadParameters { what, .. } => tse_core::TfError::InvalidArg { what },
        }
    }
}
