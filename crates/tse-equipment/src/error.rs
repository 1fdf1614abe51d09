use std::path::PathBuf;
use thiserror::Error;

pub type EquipmentResult<T> = Result<T, EquipmentError>;

/// Errors from loading and validating burner, AC-unit, air-handler,
/// and room config records (spec.md §3, §7).
#[derive(Error, Debug)]
pub enum EquipmentError {
    #[error("Missing equipment data at {path}")]
    Missing { path: PathBuf },

    #[error("Invalid equipment record in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("I/O error reading equipment record at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
