//! Record identifiers.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier of a catalog record.
///
/// Empty only for a record that has not been persisted yet. Assigned once on
/// create and never changed afterwards.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier of a record that was never persisted.
    #[must_use]
    pub const fn unassigned() -> Self {
        Self(String::new())
    }

    /// Returns true if no identifier has been assigned.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({:?})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh record identifiers.
///
/// Implementations must never hand out the same identifier twice, including
/// across concurrent callers.
pub trait IdGenerator: Send + Sync {
    /// Returns a new, never-before-issued identifier.
    fn generate(&self) -> RecordId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn generate(&self) -> RecordId {
        (**self).generate()
    }
}

/// Issues random version 4 UUIDs in their hyphenated text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> RecordId {
        RecordId(Uuid::new_v4().to_string())
    }
}
