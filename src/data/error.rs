use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer error taxonomy
// ---------------------------------------------------------------------------

/// Errors produced by the data layer.
///
/// `SourceNotFound` is fatal at startup; everything else is local to a single
/// requested view and leaves the loaded dataset usable. Undefined aggregates
/// (mean over zero rows, correlation of a constant column) are *not* errors:
/// they are `None` values in the result types.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset file was not found in any candidate location.
    #[error("could not find '{name}' (tried {candidates:?})")]
    SourceNotFound {
        name: String,
        candidates: Vec<PathBuf>,
    },

    /// A requested column name does not exist in the dataset schema.
    #[error("unknown field '{0}'")]
    InvalidField(String),

    /// A row of the source file could not be parsed into a record.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
