//! Language support: installs the combined outline definitions on buffers
//! whose language has a construct pattern, and hands structural commands
//! the original definitions back for as long as they run.
//!
//! Per-buffer lifecycle:
//!
//! ```text
//! Inactive --activate, pattern found--> ActiveCombined
//! Inactive --activate, no pattern-----> Inactive (for good)
//! ActiveCombined --with_original_definitions--> TemporarilyOriginal --op returns--> ActiveCombined
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::host::{ActivationHook, Buffer, BufferId, Promotability, Session};
use crate::language::{LanguageId, LanguageRegistry, language_for_mode};
use crate::level::LevelResolver;
use crate::pattern::{OutlineDefinitions, compile_combined};

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("Invalid language pattern {pattern:?}: {source}")]
    InvalidLanguagePattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Language pattern {pattern:?} cannot be combined with the headline pattern: {source}")]
    InvalidCombinedPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Outcome of [`LanguageSupport::activate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// No pattern registered for the buffer's language; nothing installed.
    Inactive(LanguageId),
    /// Combined definitions are installed for the language.
    Combined(LanguageId),
}

/// Language support state carried by each buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferLanguageState {
    language: Option<LanguageId>,
    originals: Option<OutlineDefinitions>,
    max_standard_level: usize,
}

impl BufferLanguageState {
    /// Language resolved at the last activation attempt.
    pub fn language(&self) -> Option<&LanguageId> {
        self.language.as_ref()
    }

    /// Definitions the buffer had before language support replaced them.
    pub fn originals(&self) -> Option<&OutlineDefinitions> {
        self.originals.as_ref()
    }

    /// Language whose combined definitions were installed, if any.
    pub fn active_language(&self) -> Option<&LanguageId> {
        self.originals.as_ref().and(self.language.as_ref())
    }

    pub fn is_active(&self) -> bool {
        self.active_language().is_some()
    }

    /// Promotability with language support taken into account.
    ///
    /// With a language active only standard levels qualify; language
    /// construct levels are never rewritten as ordinary headlines.
    pub fn is_level_promotable(&self, level: usize, baseline: &Promotability) -> bool {
        if self.is_active() {
            level < self.max_standard_level
        } else {
            baseline.allows(level)
        }
    }
}

/// Installs and scopes language-aware outline definitions.
pub struct LanguageSupport {
    registry: RwLock<Arc<LanguageRegistry>>,
    max_standard_level: usize,
}

impl LanguageSupport {
    pub const DEFAULT_MAX_STANDARD_LEVEL: usize = 10;

    pub fn new(registry: Arc<LanguageRegistry>, max_standard_level: usize) -> Self {
        Self {
            registry: RwLock::new(registry),
            max_standard_level,
        }
    }

    pub fn max_standard_level(&self) -> usize {
        self.max_standard_level
    }

    /// Current registry snapshot.
    pub fn registry(&self) -> Arc<LanguageRegistry> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the registry. Buffers activated earlier keep what they have.
    pub fn reload(&self, registry: Arc<LanguageRegistry>) {
        *self.registry.write().unwrap_or_else(PoisonError::into_inner) = registry;
        log::debug!("Language registry reloaded");
    }

    /// Install combined definitions on `buffer` if its language is known.
    ///
    /// The definitions active before the first successful activation are
    /// remembered once and never overwritten, so activating again rebuilds
    /// the combined pair from the same originals. On error the buffer keeps
    /// its current definitions untouched.
    pub fn activate(&self, buffer: &mut Buffer) -> Result<Activation, LanguageError> {
        let language = language_for_mode(buffer.mode());
        let registry = self.registry();

        let Some(language_source) = registry.pattern_for(&language) else {
            log::debug!(
                "No outline pattern for language {language}, buffer {} stays inactive",
                buffer.name()
            );
            let state = buffer.language_state_mut();
            if state.originals.is_none() {
                state.language = Some(language.clone());
            }
            return Ok(Activation::Inactive(language));
        };

        let originals = buffer
            .language_state()
            .originals()
            .cloned()
            .unwrap_or_else(|| buffer.active_definitions().clone());

        let pattern = compile_combined(originals.pattern().source(), language_source)?;
        let level = LevelResolver::new(
            self.max_standard_level,
            originals.level_function().clone(),
        )
        .into_level_function();

        let state = buffer.language_state_mut();
        state.language = Some(language.clone());
        state.max_standard_level = self.max_standard_level;
        if state.originals.is_none() {
            state.originals = Some(originals);
        }
        buffer.set_active_definitions(OutlineDefinitions::new(pattern, level));

        log::debug!(
            "Language outline for {language} active in buffer {}",
            buffer.name()
        );
        Ok(Activation::Combined(language))
    }

    /// Whether `level` on `buffer` may be promoted or demoted.
    pub fn is_level_promotable(&self, buffer: &Buffer, level: usize) -> bool {
        buffer.is_level_promotable(level)
    }
}

impl Default for LanguageSupport {
    fn default() -> Self {
        Self::new(
            Arc::new(LanguageRegistry::with_defaults()),
            Self::DEFAULT_MAX_STANDARD_LEVEL,
        )
    }
}

impl ActivationHook for LanguageSupport {
    fn name(&self) -> &str {
        "language-outline"
    }

    fn on_activate(&self, buffer: &mut Buffer) -> anyhow::Result<()> {
        self.activate(buffer)?;
        Ok(())
    }
}

impl Buffer {
    /// Run `op` with the original definitions active.
    ///
    /// Without an active language `op` runs as is. Otherwise the current pair
    /// is pushed onto the buffer's stack, the originals are installed, and the
    /// pushed pair is restored when `op` returns, whatever it returns. Nested
    /// calls therefore restore the pair of the immediately enclosing call.
    pub fn with_original_definitions<R>(&mut self, op: impl FnOnce(&mut Buffer) -> R) -> R {
        if !self.enter_original_definitions() {
            return op(self);
        }
        let outcome = op(self);
        self.leave_original_definitions();
        outcome
    }

    /// Promotability rule for this buffer.
    pub fn is_level_promotable(&self, level: usize) -> bool {
        self.language.is_level_promotable(level, &self.promotability)
    }

    fn enter_original_definitions(&mut self) -> bool {
        let Some(originals) = self.language.originals().cloned() else {
            return false;
        };
        let displaced = self.set_active_definitions(originals);
        self.saved.push(displaced);
        true
    }

    fn leave_original_definitions(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.set_active_definitions(previous);
        }
    }
}

impl Session {
    /// Session-level variant of [`Buffer::with_original_definitions`].
    ///
    /// `op` gets the whole session and may close the buffer; restoring is
    /// then skipped.
    pub fn with_original_definitions<R>(
        &mut self,
        id: BufferId,
        op: impl FnOnce(&mut Session) -> R,
    ) -> R {
        let entered = self
            .buffer_mut(id)
            .is_some_and(|buffer| buffer.enter_original_definitions());
        let outcome = op(self);
        if entered {
            match self.buffer_mut(id) {
                Some(buffer) => buffer.leave_original_definitions(),
                None => log::warn!("Buffer {id} closed before its definitions were restored"),
            }
        }
        outcome
    }
}
