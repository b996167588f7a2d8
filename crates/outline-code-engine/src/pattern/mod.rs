//! Headline matching primitives shared by the host engine and language support.
//!
//! A [`HeadlinePattern`] decides whether a line is a headline, a
//! [`LevelFunction`] turns the resulting [`MatchContext`] into a nesting
//! level, and [`OutlineDefinitions`] binds the two into the pair a buffer
//! uses for outline computation.

pub mod combined;

pub use combined::{LANG_HEADLINE, LANG_INDENT, MatchKind, STD_HEADLINE, compile_combined};

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::{Captures, Regex};

/// Compiled headline pattern together with the source it was built from.
///
/// Matching has looking-at semantics: the pattern only ever matches at the
/// very start of the line it is given.
#[derive(Clone)]
pub struct HeadlinePattern {
    source: String,
    regex: Regex,
}

impl HeadlinePattern {
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})"))?;
        Ok(Self { source, regex })
    }

    /// Raw pattern source, without the anchoring added at compile time.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match `line` (without its trailing newline) against this pattern.
    pub fn match_line<'t>(&self, line: &'t str) -> Option<MatchContext<'t>> {
        self.regex
            .captures(line)
            .map(|captures| MatchContext { line, captures })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl fmt::Debug for HeadlinePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HeadlinePattern").field(&self.source).finish()
    }
}

impl PartialEq for HeadlinePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for HeadlinePattern {}

/// Everything a level function may know about one successful match.
///
/// Passed explicitly to level functions; there is no ambient "last match"
/// state anywhere in the engine.
#[derive(Debug)]
pub struct MatchContext<'t> {
    line: &'t str,
    captures: Captures<'t>,
}

impl<'t> MatchContext<'t> {
    /// The full line the match was made against
    pub fn line(&self) -> &'t str {
        self.line
    }

    /// Text of the whole match.
    pub fn matched(&self) -> &'t str {
        self.captures.get(0).map_or("", |m| m.as_str())
    }

    /// Byte range of the whole match within the line.
    pub fn span(&self) -> Range<usize> {
        self.captures.get(0).map_or(0..0, |m| m.range())
    }

    /// Text of a named capture group, if it took part in the match.
    pub fn group(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }
}

type LevelFn = dyn Fn(&MatchContext<'_>) -> usize + Send + Sync;

/// Shared function computing the outline level of a matched line.
///
/// Cloning is cheap and keeps identity: two clones compare equal through
/// [`LevelFunction::same_as`].
#[derive(Clone)]
pub struct LevelFunction {
    name: Arc<str>,
    func: Arc<LevelFn>,
}

impl LevelFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&MatchContext<'_>) -> usize + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn call(&self, ctx: &MatchContext<'_>) -> usize {
        (self.func)(ctx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles point at the same function object.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for LevelFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LevelFunction").field(&self.name).finish()
    }
}

/// Level of a matched line together with where the match sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub span: Range<usize>,
    pub level: usize,
}

/// The pattern and level function a buffer computes its outline with.
///
/// The two always travel together: installing, saving and restoring happen
/// on the pair, never on one half.
#[derive(Debug, Clone)]
pub struct OutlineDefinitions {
    pattern: HeadlinePattern,
    level: LevelFunction,
}

impl OutlineDefinitions {
    pub fn new(pattern: HeadlinePattern, level: LevelFunction) -> Self {
        Self { pattern, level }
    }

    pub fn pattern(&self) -> &HeadlinePattern {
        &self.pattern
    }

    pub fn level_function(&self) -> &LevelFunction {
        &self.level
    }

    /// Match `line` and compute its level in one step.
    pub fn resolve(&self, line: &str) -> Option<LineMatch> {
        let ctx = self.pattern.match_line(line)?;
        Some(LineMatch {
            span: ctx.span(),
            level: self.level.call(&ctx),
        })
    }

    /// Same pattern source and the very same level function.
    pub fn same_as(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.level.same_as(&other.level)
    }
}
