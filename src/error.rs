//! Defines [`GeoCellError`], representing all errors returned by this crate.

use std::borrow::Cow;
use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoCellError {
    /// Malformed or truncated WKB input.
    #[error("WKB decode error at byte {position}: {message}")]
    Decode {
        /// Cursor position at which decoding failed.
        position: usize,
        /// What went wrong.
        message: Cow<'static, str>,
    },

    /// A stored geometry value whose prefix or payload is malformed.
    #[error("Invalid serialized geometry: {0}")]
    InvalidBlob(Cow<'static, str>),

    /// Incorrect type was passed to an operation.
    #[error("Incorrect type passed to operation: {0}")]
    IncorrectType(Cow<'static, str>),

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// A count or size does not fit in the 32-bit fields of the binary encodings.
    #[error("Overflow")]
    Overflow,

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl GeoCellError {
    pub(crate) fn decode(position: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Decode {
            position,
            message: message.into(),
        }
    }
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoCellError>;
