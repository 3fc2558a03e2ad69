//! Document filters.

use catalog_codec::Value;

/// Selects documents by their top-level fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document.
    All,
    /// Documents whose `field` equals `value`.
    Eq {
        /// Top-level field name.
        field: String,
        /// Value the field must equal.
        value: Value,
    },
}

impl Filter {
    /// Matches every document.
    #[must_use]
    pub fn all() -> Self {
        Self::All
    }

    /// Matches documents whose `field` equals `value`.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns true if `document` satisfies this filter.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => document.get(field) == Some(value),
        }
    }
}
