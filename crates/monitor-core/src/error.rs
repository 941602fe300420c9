use std::path::PathBuf;
use thiserror::Error;

/// A command line that could not be turned into a request.
///
/// `line` is the 1-based line number within the command file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The operation code is not 1, 2, 3 or 4.
    #[error("line {line}: unknown operation {op:?}")]
    UnknownOperation { line: usize, op: String },

    /// A required argument is absent.
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    /// A timestamp is not a valid 64-bit integer.
    #[error("line {line}: invalid timestamp {value:?}")]
    InvalidTimestamp { line: usize, value: String },

    /// A severity is not a valid floating-point number.
    #[error("line {line}: invalid severity {value:?}")]
    InvalidSeverity { line: usize, value: String },

    /// A time mode other than `BEFORE` or `AFTER`.
    #[error("line {line}: invalid mode {value:?}")]
    InvalidMode { line: usize, value: String },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownOperation { line, .. }
            | ParseError::MissingField { line, .. }
            | ParseError::InvalidTimestamp { line, .. }
            | ParseError::InvalidSeverity { line, .. }
            | ParseError::InvalidMode { line, .. } => *line,
        }
    }
}

/// All errors produced by the log monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// A command file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `input.txt` files were found under the given directory.
    #[error("No input files found in {0}")]
    NoInputFiles(PathBuf),

    /// A command line was malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A response could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the monitor crates.
pub type Result<T> = std::result::Result<T, MonitorError>;
