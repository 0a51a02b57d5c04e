use thiserror::Error;

/// A problem with one locale source file.
///
/// Parsing collects every problem in a file before giving up, so one run can
/// report all of them. The loader turns these into findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("failed to read file: {0}")]
    Io(String),

    #[error("malformed JSON at line {line} column {column} (byte {offset}): {message}")]
    Malformed {
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    #[error("top-level value must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("'{key}' has unsupported value type {found}; only strings are allowed")]
    UnsupportedLeaf {
        key: String,
        found: &'static str,
        line: usize,
    },

    #[error("'{key}' has invalid segment \"{segment}\"; segments must be non-empty and contain no '.'")]
    InvalidSegment {
        key: String,
        segment: String,
        line: usize,
    },
}

impl SourceError {
    /// Line the problem points at (1 when the whole file is affected).
    pub fn line(&self) -> usize {
        match self {
            SourceError::Io(_) | SourceError::RootNotObject { .. } => 1,
            SourceError::Malformed { line, .. }
            | SourceError::UnsupportedLeaf { line, .. }
            | SourceError::InvalidSegment { line, .. } => *line,
        }
    }

    /// Column the problem points at (1 unless the parser reported one).
    pub fn column(&self) -> usize {
        match self {
            SourceError::Malformed { column, .. } => (*column).max(1),
            _ => 1,
        }
    }
}
