//! Location of an element inside a nested value.

use std::fmt;

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Map entry with this key.
    Key(String),
    /// Array element at this position.
    Index(usize),
}

/// Path from the root of an attribute bag (or list of bags) to an element.
///
/// Rendered as `color`, `dims[2]`, `[3].tags` and similar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// The empty path, pointing at the root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by a map key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Returns a copy of this path extended by an array index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns this path nested under `prefix`.
    #[must_use]
    pub fn under(self, prefix: &ValuePath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0);
        Self(segments)
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The first map key on the path: the attribute name when the path is
    /// rooted at an attribute bag.
    pub fn attribute(&self) -> Option<&str> {
        self.0.iter().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key:?}")?,
                PathSegment::Key(key) => write!(f, ".{key:?}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
