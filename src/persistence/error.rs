use thiserror::Error;

/// Faults raised by a [`super::TabularStore`] itself.
///
/// These are never turned into `{"error": ...}` payloads. They bubble up to
/// whoever called the adapter, since there is no recovery policy for a
/// broken backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid range: row {row}, column {column}, {num_rows}x{num_columns}")]
    InvalidRange {
        row: usize,
        column: usize,
        num_rows: usize,
        num_columns: usize,
    },

    #[error("row {0} is out of bounds")]
    RowOutOfBounds(usize),

    #[error("backend failure: {0}")]
    Backend(String),
}

/// The outcome of a table operation that did not produce its payload.
///
/// [`TableError::NotFound`] and [`TableError::Duplicate`] are logical failures
/// and render exactly as `not found` and `duplicate`, which is the text the
/// output channel puts under the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("not found")]
    NotFound,

    #[error("duplicate")]
    Duplicate,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the [`super::Workbook`] registry and its on-disk snapshot.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("does not exist: sheet '{0}'")]
    NoSuchSheet(String),

    #[error("integrity violation; sheet '{0}' already exists")]
    SheetExists(String),

    #[error("invalid arguments: 0 columns does not make a header")]
    EmptyHeader,

    #[error("workbook file: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook json: {0}")]
    Json(#[from] serde_json::Error),
}
