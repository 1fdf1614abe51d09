use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from loading and validating the substance catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Missing catalog data at {path}")]
    Missing { path: PathBuf },

    #[error("Invalid substance record in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error(
        "Inconsistent substance '{id}': declared boiling_point_sea_level_c={declared} disagrees \
         with Antoine-derived value {derived} by more than 0.5C"
    )]
    Inconsistent {
        id: String,
        declared: f64,
        derived: f64,
    },

    #[error("Unknown species id referenced: {id}")]
    UnknownSpecies { id: String },

    #[error("I/O error reading catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<tse_formulas::FormulaError> for CatalogError {
    fn from(err: tse_formulas::FormulaError) -> Self {
        CatalogError::Invalid {
            path: PathBuf::new(),
            reason: err.to_string(),
        }
    }
}
