//! Error types for catalog operations.

use crate::id::RecordId;
use catalog_codec::CodecError;
use catalog_storage::{Interrupted, StoreError};
use std::fmt;
use thiserror::Error;

/// Result type for catalog operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Repository operation, used to give errors context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Inserting a new record.
    Create,
    /// Fetching one record.
    Get,
    /// Replacing one record.
    Update,
    /// Removing one record.
    Delete,
    /// Scanning the collection.
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "creating",
            Self::Get => "getting",
            Self::Update => "updating",
            Self::Delete => "deleting",
            Self::List => "listing",
        })
    }
}

/// Underlying reason for a persistence failure.
#[derive(Debug, Error)]
pub enum PersistenceCause {
    /// The store rejected or failed the call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored document does not describe a record.
    #[error("malformed product document: {0}")]
    Document(#[from] CodecError),
}

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record has the requested identifier.
    #[error("product with uuid {:?} does not exist", .id.as_str())]
    NotFound {
        /// The identifier looked up.
        id: RecordId,
    },

    /// The store failed, or returned something unusable.
    #[error("{operation} {}: {source}", subject(.id.as_ref()))]
    Persistence {
        /// The operation that failed.
        operation: Operation,
        /// The record involved, when there is one.
        id: Option<RecordId>,
        /// What went wrong underneath.
        #[source]
        source: PersistenceCause,
    },

    /// The calling context was cancelled or ran out of time.
    #[error("{operation} {}: {reason}", subject(.id.as_ref()))]
    Canceled {
        /// The operation that was interrupted.
        operation: Operation,
        /// The record involved, when there is one.
        id: Option<RecordId>,
        /// Cancellation or deadline.
        reason: Interrupted,
    },

    /// An attribute holds a value the wire format cannot carry.
    ///
    /// The error names the attribute and is passed through unchanged.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn subject(id: Option<&RecordId>) -> String {
    match id {
        Some(id) => format!("product with uuid {:?}", id.as_str()),
        None => "products".to_string(),
    }
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(id: impl Into<RecordId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a persistence error.
    pub fn persistence(
        operation: Operation,
        id: Option<RecordId>,
        source: impl Into<PersistenceCause>,
    ) -> Self {
        Self::Persistence {
            operation,
            id,
            source: source.into(),
        }
    }

    /// Creates a cancellation error.
    pub fn canceled(operation: Operation, id: Option<RecordId>, reason: Interrupted) -> Self {
        Self::Canceled {
            operation,
            id,
            reason,
        }
    }

    /// Classifies a store failure, keeping interruptions distinct.
    pub fn from_store(operation: Operation, id: Option<RecordId>, err: StoreError) -> Self {
        match err.interruption() {
            Some(reason) => Self::canceled(operation, id, reason),
            None => Self::persistence(operation, id, err),
        }
    }

    /// Classifies a stored document that did not decode into a record.
    ///
    /// An unrepresentable attribute value surfaces as [`CoreError::Codec`];
    /// any other decode failure means the document itself is malformed and
    /// becomes [`CoreError::Persistence`].
    pub fn from_document(operation: Operation, id: Option<RecordId>, err: CodecError) -> Self {
        match err {
            CodecError::UnsupportedValueKind { .. } => Self::Codec(err),
            other => Self::persistence(operation, id, other),
        }
    }

    /// Returns true for [`CoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`CoreError::Persistence`].
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    /// Returns the codec error if this is [`CoreError::Codec`].
    pub fn codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the interruption if this is [`CoreError::Canceled`].
    pub fn interruption(&self) -> Option<Interrupted> {
        match self {
            Self::Canceled { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
