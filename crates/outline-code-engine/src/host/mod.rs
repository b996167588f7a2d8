//! Reference outline host.
//!
//! A minimal outlining engine: buffers with an active pattern/level pair,
//! star headlines as the baseline syntax, activation hooks run when a
//! buffer is opened, and a baseline promotability rule. Language support
//! plugs into it purely through [`ActivationHook`] and the buffer's
//! definition slots.

pub mod buffer;
pub mod session;

pub use buffer::{Buffer, BufferId};
pub use session::Session;

use std::fmt;
use std::sync::Arc;

use crate::pattern::{HeadlinePattern, LevelFunction, OutlineDefinitions};

/// Baseline headline syntax: one or more stars followed by a space.
pub const BASELINE_PATTERN: &str = r"\*+ ";

/// Baseline pattern paired with a level equal to the number of stars.
pub fn baseline_definitions() -> Result<OutlineDefinitions, regex::Error> {
    let pattern = HeadlinePattern::new(BASELINE_PATTERN)?;
    let level = LevelFunction::new("star-count", |ctx| {
        ctx.matched().chars().take_while(|&c| c == '*').count()
    });
    Ok(OutlineDefinitions::new(pattern, level))
}

/// Extension point run once per buffer after the host finished setting it up.
pub trait ActivationHook: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    fn on_activate(&self, buffer: &mut Buffer) -> anyhow::Result<()>;
}

/// Rule deciding whether a headline level may be promoted or demoted.
#[derive(Clone)]
pub struct Promotability(Arc<dyn Fn(usize) -> bool + Send + Sync>);

impl Promotability {
    pub fn new(rule: impl Fn(usize) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(rule))
    }

    pub fn allows(&self, level: usize) -> bool {
        (self.0)(level)
    }
}

impl Default for Promotability {
    /// Every real headline level is eligible.
    fn default() -> Self {
        Self::new(|level| level >= 1)
    }
}

impl fmt::Debug for Promotability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Promotability(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_levels_count_stars() {
        let defs = baseline_definitions().unwrap();

        assert_eq!(defs.resolve("* One").map(|m| m.level), Some(1));
        assert_eq!(defs.resolve("**** Four").map(|m| m.level), Some(4));
        assert_eq!(defs.resolve("*bold* text"), None);
        assert_eq!(defs.resolve("    def foo():"), None);
    }

    #[test]
    fn test_default_promotability() {
        let rule = Promotability::default();

        assert!(!rule.allows(0));
        assert!(rule.allows(1));
        assert!(rule.allows(42));
    }
}
