use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to read a serialized document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid document at line {line}, column {column}: {message}")]
    InvalidDocument {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Could not serialize document: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Self::InvalidDocument {
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            }
        } else {
            Self::Serialize(e.to_string())
        }
    }
}

/// Failure to turn a textual key-path into a [`crate::KeyPath`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("Malformed key path '{path}' at {pos}: {message}")]
    Malformed {
        path: String,
        pos: usize,
        message: String,
    },

    #[error("Unknown field '{name}' in key path '{path}'")]
    UnknownField { path: String, name: String },

    #[error("Unknown section '{name}' in key path '{path}'")]
    UnknownSection { path: String, name: String },

    #[error("Section '{section}' has no record fields (key path '{path}')")]
    NotARecord { path: String, section: String },
}

impl KeyPathError {
    pub fn malformed(path: &str, pos: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_string(),
            pos,
            message: message.into(),
        }
    }
}

/// Failure to apply a value at a resolved location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Cannot store {found} at '{path}', expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} in '{path}' is too far past the end of {len} items")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Either half of "parse a textual path, then write through it"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error(transparent)]
    KeyPath(#[from] KeyPathError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
