use std::io;
use thiserror::Error;

/// Error type for table loading and mutation operations.
#[derive(Error, Debug)]
pub enum TableError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A quoted cell was never closed. Always fatal; no policy hook can
    /// recover this, the remaining input is structurally ambiguous.
    #[error("unterminated quote starting at byte offset {offset}")]
    UnterminatedQuote {
        /// Byte offset of the opening quote within the parsed text.
        offset: usize,
    },

    /// An adapter failed to convert a cell value.
    #[error("cell conversion failed: {0}")]
    CellConversion(String),

    /// A caller-declared column spec carries no adapter.
    #[error("declared column has no adapter: {0}")]
    ColumnWithoutAdapter(String),

    /// A row's cell count disagrees with the consolidated column list.
    #[error("inconsistent column count: {0}")]
    InconsistentColumnCount(String),

    /// A programmatic row insertion does not match the table shape.
    #[error("invalid row append: {0}")]
    InvalidRowAppend(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
