//! Error types for store operations.

use crate::context::Interrupted;
use catalog_codec::CodecError;
use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a document store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document could not be serialized for storage.
    #[error("document encoding failed: {0}")]
    Encode(#[source] CodecError),

    /// A stored document could not be read back.
    #[error("document decoding failed: {0}")]
    Decode(#[source] CodecError),

    /// The store's persistent state is unreadable.
    #[error("store corrupted: {0}")]
    Corrupted(String),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The cursor has already been closed.
    #[error("cursor is closed")]
    CursorClosed,

    /// The calling context was cancelled.
    #[error("operation cancelled")]
    Canceled,

    /// The calling context's deadline passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Returns the interruption this error stands for, if any.
    pub fn interruption(&self) -> Option<Interrupted> {
        match self {
            Self::Canceled => Some(Interrupted::Canceled),
            Self::DeadlineExceeded => Some(Interrupted::DeadlineExceeded),
            _ => None,
        }
    }
}

impl From<Interrupted> for StoreError {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::Canceled => Self::Canceled,
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}
