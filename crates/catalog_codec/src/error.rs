//! Error types for the codec crate.

use crate::path::ValuePath;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during value conversion, encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A dynamic value has no wire representation.
    #[error("unsupported value kind `{kind}` at {path}")]
    UnsupportedValueKind {
        /// Where in the value the offending element sits.
        path: ValuePath,
        /// Kind of the offending element.
        kind: String,
    },

    /// NaN values are forbidden in stored documents.
    #[error("NaN values are forbidden")]
    NaNForbidden,

    /// Indefinite-length items are forbidden.
    #[error("indefinite-length items are forbidden")]
    IndefiniteLengthForbidden,

    /// Invalid UTF-8 string.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Input continues after a complete value.
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// Invalid CBOR structure.
    #[error("invalid CBOR structure: {message}")]
    InvalidStructure {
        /// Description of the structural error.
        message: String,
    },

    /// Unsupported CBOR type.
    #[error("unsupported CBOR type: {type_name}")]
    UnsupportedType {
        /// Name of the unsupported type.
        type_name: String,
    },

    /// Integer does not fit the signed 64-bit range.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A declared length exceeds the decoder limits.
    #[error("size limit exceeded: claimed {claimed}, max allowed {max_allowed}")]
    SizeLimitExceeded {
        /// Length claimed by the input.
        claimed: u64,
        /// Maximum accepted length.
        max_allowed: u64,
    },
}

impl CodecError {
    /// Create an unsupported value kind error.
    pub fn unsupported_value_kind(path: ValuePath, kind: impl Into<String>) -> Self {
        Self::UnsupportedValueKind {
            path,
            kind: kind.into(),
        }
    }

    /// Create an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Name of the top-level attribute an unsupported value was found in.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::UnsupportedValueKind { path, .. } => path.attribute(),
            _ => None,
        }
    }
}
