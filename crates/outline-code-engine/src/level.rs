use crate::pattern::{LevelFunction, MatchContext, MatchKind};

/// Level computation for matches of a combined pattern.
///
/// Language constructs sit below every standard headline: their level is
/// `max_standard_level` plus the number of whitespace characters in front of
/// them. A tab counts as one character, so buffers mixing tabs and spaces get
/// inconsistent levels; expand tabs beforehand if that matters.
///
/// Standard headlines are handed to the baseline level function with the
/// untouched match context.
#[derive(Debug, Clone)]
pub struct LevelResolver {
    max_standard_level: usize,
    baseline: LevelFunction,
}

impl LevelResolver {
    pub fn new(max_standard_level: usize, baseline: LevelFunction) -> Self {
        Self {
            max_standard_level,
            baseline,
        }
    }

    pub fn level(&self, ctx: &MatchContext<'_>) -> usize {
        match MatchKind::of(ctx) {
            Some(MatchKind::Language { whitespace }) => {
                self.max_standard_level + whitespace.chars().count()
            }
            // Contexts from a non-combined pattern go to the baseline
            Some(MatchKind::Standard) | None => self.baseline.call(ctx),
        }
    }

    /// Wrap the resolver as the level function installed next to the
    /// combined pattern.
    pub fn into_level_function(self) -> LevelFunction {
        let name = format!("language-aware({})", self.baseline.name());
        LevelFunction::new(name, move |ctx| self.level(ctx))
    }
}
