//! Deterministic identifier generators.

use catalog_core::{IdGenerator, RecordId};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues `prefix-0`, `prefix-1`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("product")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> RecordId {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        RecordId::new(format!("{}-{n}", self.prefix))
    }
}

/// Hands out a scripted list of identifiers, then falls back to a
/// sequence.
///
/// Useful for forcing collisions or checking that a specific id ends up
/// in the store.
#[derive(Debug)]
pub struct FixedIdGenerator {
    queued: Mutex<VecDeque<RecordId>>,
    fallback: SequentialIdGenerator,
}

impl FixedIdGenerator {
    /// Creates a generator that issues `ids` in order.
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RecordId>,
    {
        Self {
            queued: Mutex::new(ids.into_iter().map(Into::into).collect()),
            fallback: SequentialIdGenerator::new("fixed"),
        }
    }

    /// Creates a generator that always issues `id`.
    pub fn always(id: impl Into<RecordId>) -> AlwaysIdGenerator {
        AlwaysIdGenerator(id.into())
    }

    /// Identifiers not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queued.lock().len()
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> RecordId {
        let queued = self.queued.lock().pop_front();
        queued.unwrap_or_else(|| self.fallback.generate())
    }
}

/// Issues the same identifier every time. See [`FixedIdGenerator::always`].
#[derive(Debug, Clone)]
pub struct AlwaysIdGenerator(RecordId);

impl IdGenerator for AlwaysIdGenerator {
    fn generate(&self) -> RecordId {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_counts_up() {
        let ids = SequentialIdGenerator::new("p");
        assert_eq!(ids.generate().as_str(), "p-0");
        assert_eq!(ids.generate().as_str(), "p-1");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn fixed_then_fallback() {
        let ids = FixedIdGenerator::new(["a", "b"]);
        assert_eq!(ids.generate().as_str(), "a");
        assert_eq!(ids.remaining(), 1);
        assert_eq!(ids.generate().as_str(), "b");
        assert_eq!(ids.generate().as_str(), "fixed-0");
    }

    #[test]
    fn always_repeats() {
        let ids = FixedIdGenerator::always("same");
        assert_eq!(ids.generate(), ids.generate());
    }
}
