use regex::Regex;

use super::{HeadlinePattern, MatchContext};
use crate::support::LanguageError;

/// Whole language-construct alternative: indentation plus construct opener.
pub const LANG_HEADLINE: &str = "lang_headline";
/// Leading horizontal whitespace of a language construct.
pub const LANG_INDENT: &str = "lang_indent";
/// Standard headline alternative, i.e. the baseline pattern.
pub const STD_HEADLINE: &str = "std_headline";

/// Which alternative of a combined pattern produced a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// A language construct, with the indentation in front of it.
    Language { whitespace: String },
    /// A standard headline as the baseline pattern defines it.
    Standard,
}

impl MatchKind {
    /// Classify a match made with a pattern from [`compile_combined`].
    ///
    /// Returns `None` when neither alternative took part, which only happens
    /// for contexts produced by some other pattern.
    pub fn of(ctx: &MatchContext<'_>) -> Option<Self> {
        if ctx.group(LANG_HEADLINE).is_some() {
            let whitespace = ctx.group(LANG_INDENT).unwrap_or_default();
            Some(Self::Language {
                whitespace: whitespace.to_string(),
            })
        } else if ctx.group(STD_HEADLINE).is_some() {
            Some(Self::Standard)
        } else {
            None
        }
    }
}

/// Merge a baseline headline pattern and a language construct pattern.
///
/// The language alternative is tried first, so an indented construct opener
/// wins over a standard headline whenever both could match. The language
/// source is validated on its own before combining, so a malformed entry is
/// reported against that entry rather than against the merged pattern.
pub fn compile_combined(
    baseline_source: &str,
    language_source: &str,
) -> Result<HeadlinePattern, LanguageError> {
    Regex::new(language_source).map_err(|source| LanguageError::InvalidLanguagePattern {
        pattern: language_source.to_string(),
        source,
    })?;

    let combined = format!(
        r"(?P<{LANG_HEADLINE}>(?P<{LANG_INDENT}>[ \t]*)(?:{language_source}))|(?P<{STD_HEADLINE}>(?:{baseline_source}))"
    );
    HeadlinePattern::new(combined).map_err(|source| LanguageError::InvalidCombinedPattern {
        pattern: language_source.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PYTHON: &str = r"(def|class) \w+.*:";

    fn combined() -> HeadlinePattern {
        compile_combined(r"\*+ ", PYTHON).unwrap()
    }

    #[test]
    fn test_language_alternative_captures_indentation() {
        let pattern = combined();
        let ctx = pattern.match_line("    def foo():").unwrap();

        assert_eq!(ctx.group(LANG_HEADLINE), Some("    def foo():"));
        assert_eq!(ctx.group(LANG_INDENT), Some("    "));
        assert_eq!(ctx.group(STD_HEADLINE), None);
        assert_eq!(
            MatchKind::of(&ctx),
            Some(MatchKind::Language {
                whitespace: "    ".to_string()
            })
        );
    }

    #[test]
    fn test_unindented_construct_has_empty_whitespace() {
        let pattern = combined();
        let ctx = pattern.match_line("class Foo:").unwrap();

        assert_eq!(
            MatchKind::of(&ctx),
            Some(MatchKind::Language {
                whitespace: String::new()
            })
        );
    }

    #[test]
    fn test_standard_alternative() {
        let pattern = combined();
        let ctx = pattern.match_line("** Heading").unwrap();

        assert_eq!(ctx.group(LANG_HEADLINE), None);
        assert_eq!(ctx.group(STD_HEADLINE), Some("** "));
        assert_eq!(ctx.matched(), "** ");
        assert_eq!(MatchKind::of(&ctx), Some(MatchKind::Standard));
    }

    #[test]
    fn test_non_headline_lines_do_not_match() {
        let pattern = combined();

        assert!(pattern.match_line("    return 1").is_none());
        assert!(pattern.match_line("text with * star").is_none());
        assert!(pattern.match_line("").is_none());
    }

    #[test]
    fn test_tabs_are_captured_as_whitespace() {
        let pattern = combined();
        let ctx = pattern.match_line("\t def foo():").unwrap();

        assert_eq!(ctx.group(LANG_INDENT), Some("\t "));
    }

    #[test]
    fn test_combined_source_keeps_both_inputs() {
        let pattern = combined();

        assert!(pattern.source().contains(PYTHON));
        assert!(pattern.source().contains(r"\*+ "));
    }

    #[test]
    fn test_malformed_language_pattern_is_reported() {
        let err = compile_combined(r"\*+ ", "(def|class").unwrap_err();

        assert!(matches!(
            err,
            LanguageError::InvalidLanguagePattern { ref pattern, .. } if pattern == "(def|class"
        ));
    }

    #[test]
    fn test_group_name_clash_is_reported() {
        let err = compile_combined(r"\*+ ", r"(?P<lang_indent>def)").unwrap_err();

        assert!(matches!(err, LanguageError::InvalidCombinedPattern { .. }));
    }

    #[test]
    fn test_match_kind_of_foreign_pattern() {
        let pattern = HeadlinePattern::new(r"\*+ ").unwrap();
        let ctx = pattern.match_line("* One").unwrap();

        assert_eq!(MatchKind::of(&ctx), None);
    }
}
