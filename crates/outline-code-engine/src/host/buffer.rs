use std::fmt;

use uuid::Uuid;
use xi_rope::delta::DeltaElement;
use xi_rope::{Delta, Rope, RopeInfo};

use super::Promotability;
use crate::editing::{Cmd, CommandError, Patch, commands::compile_command};
use crate::outline::{Headline, scan_headlines};
use crate::pattern::OutlineDefinitions;
use crate::support::BufferLanguageState;

/// Stable identifier of a buffer within a [`super::Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(Uuid);

impl BufferId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BufferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text buffer as the outline host sees it.
///
/// Besides the text the buffer owns the *active* outline definitions, the
/// pair every outline computation on it uses. Language support replaces that
/// pair on activation and swaps the original back in around structural
/// edits; the stack of saved pairs lives here too so nested swaps unwind in
/// order.
pub struct Buffer {
    pub(crate) id: BufferId,
    pub(crate) name: String,
    pub(crate) mode: String,
    /// Entire buffer text
    pub(crate) text: Rope,
    /// Incremented on each edit
    pub(crate) version: u64,
    pub(crate) active: OutlineDefinitions,
    pub(crate) language: BufferLanguageState,
    /// Pairs displaced by `with_original_definitions`, innermost last
    pub(crate) saved: Vec<OutlineDefinitions>,
    pub(crate) promotability: Promotability,
}

impl Buffer {
    pub fn new(
        name: impl Into<String>,
        mode: impl Into<String>,
        text: &str,
        definitions: OutlineDefinitions,
        promotability: Promotability,
    ) -> Self {
        Self {
            id: BufferId::new(),
            name: name.into(),
            mode: mode.into(),
            text: Rope::from(text),
            version: 0,
            active: definitions,
            language: BufferLanguageState::default(),
            saved: Vec::new(),
            promotability,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mode identifier, e.g. `python-mode`
    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.text.lines_raw(..).count()
    }

    /// Text of the 0-based line `index`, without its newline.
    pub fn line(&self, index: usize) -> Option<String> {
        self.text.lines(..).nth(index).map(|line| line.into_owned())
    }

    /// The pair outline computation currently uses.
    pub fn active_definitions(&self) -> &OutlineDefinitions {
        &self.active
    }

    /// Install a new active pair, returning the one it replaces.
    pub fn set_active_definitions(&mut self, definitions: OutlineDefinitions) -> OutlineDefinitions {
        std::mem::replace(&mut self.active, definitions)
    }

    pub fn language_state(&self) -> &BufferLanguageState {
        &self.language
    }

    pub(crate) fn language_state_mut(&mut self) -> &mut BufferLanguageState {
        &mut self.language
    }

    pub fn promotability(&self) -> &Promotability {
        &self.promotability
    }

    /// Number of displaced pairs waiting to be restored.
    pub fn saved_depth(&self) -> usize {
        self.saved.len()
    }

    /// Headlines under the active definitions, in buffer order.
    pub fn headlines(&self) -> Vec<Headline> {
        scan_headlines(&self.text, &self.active)
    }

    /// Apply a structural command.
    ///
    /// The command always runs against the original definitions, so language
    /// constructs are invisible to it.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, CommandError> {
        self.with_original_definitions(|buffer| {
            let delta = compile_command(buffer, &cmd)?;
            Ok(buffer.apply_delta(&delta))
        })
    }

    fn apply_delta(&mut self, delta: &Delta<RopeInfo>) -> Patch {
        // Changed ranges are reported in post-edit coordinates; a deletion
        // shows up as an empty range where the text used to be.
        let mut changed = Vec::new();
        let mut cursor = 0;
        let mut old_pos = 0;
        for op in &delta.els {
            match op {
                DeltaElement::Copy(from, to) => {
                    if *from > old_pos {
                        changed.push(cursor..cursor);
                    }
                    cursor += to - from;
                    old_pos = *to;
                }
                DeltaElement::Insert(inserted) => {
                    changed.push(cursor..cursor + inserted.len());
                    cursor += inserted.len();
                }
            }
        }
        if old_pos < delta.base_len {
            changed.push(cursor..cursor);
        }

        self.text = delta.apply(&self.text);
        self.version += 1;

        Patch {
            changed,
            version: self.version,
        }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("version", &self.version)
            .field("active", &self.active)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::baseline_definitions;

    fn buffer(text: &str) -> Buffer {
        Buffer::new(
            "notes.org",
            "org-mode",
            text,
            baseline_definitions().unwrap(),
            Promotability::default(),
        )
    }

    #[test]
    fn test_new_buffer() {
        let buf = buffer("* One\nbody\n");

        assert_eq!(buf.name(), "notes.org");
        assert_eq!(buf.mode(), "org-mode");
        assert_eq!(buf.text(), "* One\nbody\n");
        assert_eq!(buf.version(), 0);
        assert_eq!(buf.saved_depth(), 0);
        assert!(buf.language_state().language().is_none());
    }

    #[test]
    fn test_lines() {
        let buf = buffer("first\nsecond\nthird");

        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0).as_deref(), Some("first"));
        assert_eq!(buf.line(2).as_deref(), Some("third"));
        assert_eq!(buf.line(3), None);
    }

    #[test]
    fn test_set_active_definitions_returns_previous() {
        let mut buf = buffer("* One");
        let original = buf.active_definitions().clone();
        let replacement = baseline_definitions().unwrap();

        let previous = buf.set_active_definitions(replacement.clone());

        assert!(previous.same_as(&original));
        assert!(buf.active_definitions().same_as(&replacement));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(buffer("").id(), buffer("").id());
    }

    #[test]
    fn test_headlines_use_active_definitions() {
        let buf = buffer("* One\ntext\n** Two\n");
        let levels: Vec<_> = buf.headlines().iter().map(|h| (h.line, h.level)).collect();

        assert_eq!(levels, vec![(0, 1), (2, 2)]);
    }
}
