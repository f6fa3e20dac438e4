use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    /// A position that cannot be turned into a non-negative integer. `row` is
    /// the 1-based row within the batch.
    #[error("Malformed position on row {row}: `{value}` is not a non-negative integer")]
    MalformedInput { row: usize, value: String },

    /// The lookup answered with a result set that cannot be zipped back onto
    /// the request.
    #[error("Lookup contract violated: {0}")]
    LookupContractViolation(String),

    #[error(transparent)]
    Lookup(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ContextError>;
