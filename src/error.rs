//! Error types shared by every part of the crate.

use thiserror::Error;

/// Errors produced while building, parsing or compiling HTTP messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value outside the admitted kinds was handed to a scalar, header map
    /// or message field.
    #[error("expected {expected}, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    /// Compilation was requested into a representation other than text or bytes.
    #[error("unsupported format {requested:?}: expected \"text\" or \"bytes\"")]
    Format { requested: String },

    /// A first line did not split into the number of tokens its variant needs.
    #[error("malformed first line {line:?}: expected {expected} tokens, found {found}")]
    Malformed {
        expected: usize,
        found: usize,
        line: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
