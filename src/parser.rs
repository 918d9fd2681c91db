use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::block::{Block, BlockType};
use crate::error::{Error, Result};

static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());

const CODE_FENCE: &str = "```";

/// Split a document into trimmed blocks separated by blank lines.
///
/// A line counts as blank when it is empty after trimming, so runs of
/// whitespace-only lines separate blocks too. Line breaks inside a block
/// are kept as `\n`.
pub fn markdown_to_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if line.trim().is_empty() {
            flush_block(&mut current, &mut blocks);
        } else {
            current.push(line);
        }
    }
    flush_block(&mut current, &mut blocks);

    blocks
}

fn flush_block(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let block = lines.join("\n");
    lines.clear();
    let trimmed = block.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_string());
    }
}

/// Classify a block from its leading syntax.
///
/// Checked in order: heading, quote, ordered list, unordered list, fenced
/// code, paragraph. Inline content is never inspected.
pub fn block_to_block_type(block: &str) -> BlockType {
    let first_line = block.lines().next().unwrap_or_default();

    if let Some(level) = heading_level(first_line) {
        return BlockType::Heading(level);
    }
    if first_line.starts_with("> ") {
        return BlockType::Quote;
    }
    if ORDERED_ITEM_RE.is_match(first_line) {
        return BlockType::OrderedList;
    }
    if first_line.starts_with("- ") || first_line.starts_with("* ") {
        return BlockType::UnorderedList;
    }
    if is_fenced_code(block) {
        return BlockType::Code;
    }
    BlockType::Paragraph
}

/// Segment and classify a whole document.
pub fn parse(markdown: &str) -> Vec<Block> {
    markdown_to_blocks(markdown)
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let kind = block_to_block_type(&text);
            trace!(index, %kind, "classified block");
            Block { text, kind }
        })
        .collect()
}

/// Number of leading `#`s when followed by a space, for 1 to 6 of them.
pub(crate) fn heading_level(line: &str) -> Option<u8> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// A fenced code block, split at the fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fence<'a> {
    /// Text after the opening fence on its own line (`rust` in ```` ```rust ````).
    pub info: &'a str,
    /// Everything between the fences, verbatim.
    pub body: &'a str,
}

/// Split a block that starts and ends with ```` ``` ````.
///
/// The closing fence may share a line with code (`` print(x)``` ``), and a
/// single line wrapped in fences (```` ```x``` ````) has no info string. Fences that
/// overlap (a block of three to five backticks) enclose an empty body.
pub(crate) fn split_fence(block: &str) -> Option<Fence<'_>> {
    if !block.starts_with(CODE_FENCE) || !block.ends_with(CODE_FENCE) {
        return None;
    }
    let inner = block
        .get(CODE_FENCE.len()..block.len() - CODE_FENCE.len())
        .unwrap_or_default();
    let fence = match inner.split_once('\n') {
        Some((info, body)) => Fence {
            info: info.trim(),
            body,
        },
        None => Fence { info: "", body: inner },
    };
    Some(fence)
}

fn is_fenced_code(block: &str) -> bool {
    split_fence(block).is_some()
}

/// Strip an ordered-list marker (`12. `) from the start of a line.
pub(crate) fn strip_ordered_marker(line: &str) -> &str {
    match ORDERED_ITEM_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Text of the first level-1 heading (`# Title`), trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingTitle)
}
