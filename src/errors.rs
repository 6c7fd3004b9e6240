use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    /// A date or amount field could not be interpreted.
    #[error("Could not parse {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    /// A persisted row has the wrong shape. `line` is 1-based and counts the header.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("No data: {0}")]
    EmptyResult(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
