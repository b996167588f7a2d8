//! Outline computation over a buffer's active definitions.
//!
//! Consumers (folding, cycling, outline views) only ever see levels; whether
//! a level came from a star headline or an indented `def` is decided by the
//! definitions the buffer has active.

use std::ops::Range;

use xi_rope::Rope;

use crate::pattern::OutlineDefinitions;

/// A single line of the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line, including the newline if present.
    pub span: Range<usize>,
    pub text: String,
}

/// Iterate over lines with their byte spans.
///
/// Uses `lines_raw` so spans account for the newline characters.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: start..offset,
            text: line.into_owned(),
        }
    })
}

/// A line recognized as a headline, with its computed level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// 0-based line number
    pub line: usize,
    /// Byte span of the line content in the buffer, newline excluded.
    pub span: Range<usize>,
    pub level: usize,
    /// Line content with surrounding whitespace trimmed.
    pub text: String,
}

/// Match every line against `definitions` and keep the headlines.
pub fn scan_headlines(rope: &Rope, definitions: &OutlineDefinitions) -> Vec<Headline> {
    lines_with_spans(rope)
        .enumerate()
        .filter_map(|(line, lr)| {
            let content = lr.text.trim_end_matches(['\r', '\n']);
            let found = definitions.resolve(content)?;
            Some(Headline {
                line,
                span: lr.span.start..lr.span.start + content.len(),
                level: found.level,
                text: content.trim().to_string(),
            })
        })
        .collect()
}

/// A headline and the headlines nested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub headline: Headline,
    pub children: Vec<OutlineNode>,
}

/// Nest headlines by level.
///
/// A headline owns every following headline with a strictly greater level,
/// up to the next one at its own level or above.
pub fn build_outline(headlines: Vec<Headline>) -> Vec<OutlineNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    for headline in headlines {
        while stack
            .last()
            .is_some_and(|open| open.headline.level >= headline.level)
        {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }
        stack.push(OutlineNode {
            headline,
            children: Vec::new(),
        });
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    roots
}

fn attach(stack: &mut [OutlineNode], roots: &mut Vec<OutlineNode>, node: OutlineNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Lines a folded headline hides, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRange {
    /// The headline line itself, which stays visible
    pub line: usize,
    pub end_line: usize,
}

/// Subtree extent of every headline.
///
/// A subtree ends right before the next headline of the same or a lower
/// level, or at the last line of the buffer.
pub fn fold_ranges(headlines: &[Headline], line_count: usize) -> Vec<FoldRange> {
    let last_line = line_count.saturating_sub(1);
    headlines
        .iter()
        .enumerate()
        .map(|(i, headline)| {
            let end_line = headlines[i + 1..]
                .iter()
                .find(|next| next.level <= headline.level)
                .map_or(last_line, |next| next.line.saturating_sub(1));
            FoldRange {
                line: headline.line,
                end_line,
            }
        })
        .collect()
}

/// Render an outline tree, one headline per line:
/// `[line] <indent>text (level N)` with 1-based line numbers.
pub fn render_outline(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    render_nodes(nodes, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn render_nodes(nodes: &[OutlineNode], depth: usize, out: &mut String) {
    for node in nodes {
        let headline = &node.headline;
        out.push_str(&format!(
            "[{}] {}{} (level {})\n",
            headline.line + 1,
            "  ".repeat(depth),
            headline.text,
            headline.level
        ));
        render_nodes(&node.children, depth + 1, out);
    }
}
