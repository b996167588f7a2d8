use std::collections::BTreeMap;

use super::LanguageId;

/// Construct-opener patterns shipped out of the box.
///
/// Patterns are written in the `regex` crate dialect and must not consume
/// the leading indentation of a line; the combined matcher captures that
/// itself.
pub const DEFAULT_LANGUAGE_PATTERNS: &[(&str, &str)] = &[
    ("python", r"(?:async[ \t]+)?(?:def|class)[ \t]+\w+"),
    (
        "emacs-lisp",
        r"\((?:defun|defmacro|defsubst|defvar|defcustom|defconst|cl-defun|cl-defmacro|use-package)[ \t]",
    ),
    (
        "rust",
        r"(?:pub(?:\([^)]*\))?[ \t]+)?(?:async[ \t]+)?(?:unsafe[ \t]+)?(?:fn|struct|enum|trait|impl|mod)\b",
    ),
    (
        "javascript",
        r"(?:export[ \t]+)?(?:default[ \t]+)?(?:async[ \t]+)?(?:function\*?|class)\b",
    ),
    ("sh", r"(?:function[ \t]+\w+|\w+[ \t]*\(\))[ \t]*\{?"),
];

/// Immutable mapping from language to its construct-opener pattern source.
///
/// Lookups are exact and case-sensitive. The registry is never mutated after
/// construction; a new set of patterns is installed by building a new
/// registry and handing it to [`crate::LanguageSupport::reload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageRegistry {
    patterns: BTreeMap<LanguageId, String>,
}

impl LanguageRegistry {
    /// Build a registry from exactly the given entries.
    pub fn new<I, K, V>(patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<LanguageId>,
        V: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|(language, pattern)| (language.into(), pattern.into()))
                .collect(),
        }
    }

    /// Registry holding [`DEFAULT_LANGUAGE_PATTERNS`].
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_LANGUAGE_PATTERNS.iter().copied())
    }

    /// Defaults extended by user entries. A user entry for a language that
    /// already has a default replaces it.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<LanguageId>,
        V: Into<String>,
    {
        let mut registry = Self::with_defaults();
        for (language, pattern) in overrides {
            registry.patterns.insert(language.into(), pattern.into());
        }
        registry
    }

    /// Pattern source registered for `language`, if any.
    pub fn pattern_for(&self, language: &LanguageId) -> Option<&str> {
        self.patterns.get(language).map(String::as_str)
    }

    /// Registered languages, sorted by name
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.patterns.keys()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
