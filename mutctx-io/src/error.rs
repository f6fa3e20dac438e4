use std::io;
use thiserror::Error;

/// Error type for mutctx-io operations.
#[derive(Error, Debug)]
pub enum VariantTableError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The CSV layer rejected the file (ragged rows, bad quoting, invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file could not be opened.
    #[error("Can't read file: {0}")]
    FileRead(String),

    /// A column the pipeline needs is not in the header.
    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: String, column: String },

    /// An input column uses a name the pipeline writes itself.
    #[error("{file}: input column `{column}` clashes with an output column of the same name")]
    ReservedColumn { file: String, column: String },

    /// A cell of an annotated table does not hold the expected type.
    #[error("{file}, line {line}: column `{column}` has malformed value `{value}`")]
    MalformedCell {
        file: String,
        line: u64,
        column: String,
        value: String,
    },

    /// The stored sequence does not match its flank pieces.
    #[error("{file}, line {line}: sequence does not match left_flank + center_base + right_flank")]
    InconsistentContext { file: String, line: u64 },
}

/// Result type alias for mutctx-io operations.
pub type Result<T> = std::result::Result<T, VariantTableError>;
