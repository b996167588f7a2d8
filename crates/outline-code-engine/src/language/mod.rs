pub mod registry;
pub mod resolver;

pub use registry::{DEFAULT_LANGUAGE_PATTERNS, LanguageRegistry};
pub use resolver::{MODE_SUFFIX, language_for_mode};

use std::fmt;

/// Identifier of a source language, e.g. `python`.
///
/// Derived from a buffer's mode identifier and used as the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
