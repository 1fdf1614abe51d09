use thiserror::Error;

pub type ResultsResult<T> = Result<T, ResultsError>;

/// Errors from scorecard persistence and export (spec.md §7:
/// `IOError` only appears here and in `apps/tse-cli`).
#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scorecard run not found: {run_id}")]
    RunNotFound { run_id: String },
}
