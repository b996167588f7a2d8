use thiserror::Error;
use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::host::Buffer;
use crate::outline::Headline;

/// Commands that can be applied to a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Raise the headline on `line` and its subtree one level
    PromoteSubtree { line: usize },
    /// Lower the headline on `line` and its subtree one level
    DemoteSubtree { line: usize },
}

impl Cmd {
    pub fn line(&self) -> usize {
        match self {
            Cmd::PromoteSubtree { line } | Cmd::DemoteSubtree { line } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Line {line} is past the end of the buffer")]
    LineOutOfRange { line: usize },

    #[error("Line {line} is not a headline")]
    NotOnHeadline { line: usize },

    #[error("Headline on line {line} is already at the top level")]
    CannotPromote { line: usize },

    #[error("Headline on line {line} cannot move to or from level {level}")]
    NotPromotable { line: usize, level: usize },
}

/// Compile a command into a delta over the buffer's current text.
///
/// Headlines are taken from the buffer's active definitions; callers are
/// expected to have the original definitions installed. A headline's level
/// marker is its first character, so any baseline syntax that repeats one
/// character per level (`*`, `#`, ...) works.
///
/// Both the current and the resulting level must pass the buffer's
/// promotability rule. The target headline is refused otherwise; descendants
/// are left as they are.
pub(crate) fn compile_command(buffer: &Buffer, cmd: &Cmd) -> Result<Delta<RopeInfo>, CommandError> {
    let line = cmd.line();
    if line >= buffer.line_count() {
        return Err(CommandError::LineOutOfRange { line });
    }

    let headlines = buffer.headlines();
    let root = headlines
        .iter()
        .position(|h| h.line == line)
        .ok_or(CommandError::NotOnHeadline { line })?;
    let root_level = headlines[root].level;

    if matches!(cmd, Cmd::PromoteSubtree { .. }) && root_level <= 1 {
        return Err(CommandError::CannotPromote { line });
    }
    let new_level = shifted_level(cmd, root_level);
    if !buffer.is_level_promotable(root_level) {
        return Err(CommandError::NotPromotable {
            line,
            level: root_level,
        });
    }
    if !buffer.is_level_promotable(new_level) {
        return Err(CommandError::NotPromotable {
            line,
            level: new_level,
        });
    }
    let root_marker =
        leading_marker(buffer, &headlines[root]).ok_or(CommandError::NotOnHeadline { line })?;

    let subtree = headlines[root + 1..]
        .iter()
        .take_while(|h| h.level > root_level)
        .filter(|h| {
            buffer.is_level_promotable(h.level)
                && buffer.is_level_promotable(shifted_level(cmd, h.level))
        })
        .filter_map(|h| Some((h, leading_marker(buffer, h)?)));

    let mut builder = Builder::new(buffer.len());
    for (headline, marker) in std::iter::once((&headlines[root], root_marker)).chain(subtree) {
        let at = headline.span.start;
        match cmd {
            Cmd::DemoteSubtree { .. } => {
                builder.replace(at..at, Rope::from(marker.to_string()));
            }
            Cmd::PromoteSubtree { .. } => builder.delete(at..at + marker.len_utf8()),
        }
    }

    log::debug!("Compiled {cmd:?} on buffer {}", buffer.name());
    Ok(builder.build())
}

fn shifted_level(cmd: &Cmd, level: usize) -> usize {
    match cmd {
        Cmd::DemoteSubtree { .. } => level + 1,
        Cmd::PromoteSubtree { .. } => level.saturating_sub(1),
    }
}

/// First character of a headline, the one repeated per level.
fn leading_marker(buffer: &Buffer, headline: &Headline) -> Option<char> {
    buffer
        .rope()
        .slice_to_cow(headline.span.clone())
        .chars()
        .next()
        .filter(|c| !c.is_whitespace())
}
