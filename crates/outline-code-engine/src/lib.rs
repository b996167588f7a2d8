pub mod editing;
pub mod host;
pub mod io;
pub mod language;
pub mod level;
pub mod outline;
pub mod pattern;
pub mod support;

// Re-export key types for easier usage
pub use editing::{Cmd, CommandError, Patch};
pub use host::{ActivationHook, Buffer, BufferId, Promotability, Session};
pub use language::{LanguageId, LanguageRegistry, language_for_mode};
pub use level::LevelResolver;
pub use outline::{FoldRange, Headline, OutlineNode, build_outline, fold_ranges, render_outline};
pub use pattern::{
    HeadlinePattern, LevelFunction, MatchContext, MatchKind, OutlineDefinitions, compile_combined,
};
pub use support::{Activation, BufferLanguageState, LanguageError, LanguageSupport};
