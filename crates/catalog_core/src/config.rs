//! Repository configuration.

use std::time::Duration;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "products";

/// Configuration for a [`ProductRepository`](crate::ProductRepository).
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Name of the collection holding the records.
    pub collection: String,

    /// Whether an update that matches no record fails with `NotFound`
    /// instead of succeeding as a no-op.
    pub strict_updates: bool,

    /// Upper bound applied to every call on top of the caller's context
    /// (`None` = caller's deadline only).
    pub default_timeout: Option<Duration>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            strict_updates: false,
            default_timeout: None,
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection name.
    #[must_use]
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    /// Sets whether updates of unknown records fail.
    #[must_use]
    pub fn strict_updates(mut self, value: bool) -> Self {
        self.strict_updates = value;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}
