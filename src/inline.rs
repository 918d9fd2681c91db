//! Inline tokenizer: plain text to a flat sequence of [`TextRun`]s.
//!
//! Stages run in a fixed order (images, links, bold, italic, code) and each
//! one only rewrites runs that are still plain. Images go first because their
//! syntax contains link syntax; emphasis goes last so that URLs and alt text
//! are never split on `**`, `_` or `` ` ``.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::block::{RunKind, TextRun};
use crate::error::{Error, Result};

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

pub const BOLD_DELIMITER: &str = "**";
pub const ITALIC_DELIMITER: &str = "_";
pub const CODE_DELIMITER: &str = "`";

/// Tokenize one string into typed runs.
pub fn tokenize_inline(text: &str) -> Result<Vec<TextRun>> {
    let runs = vec![TextRun::plain(text)];
    let runs = split_images(runs);
    let runs = split_links(runs);
    let runs = split_delimiter(runs, BOLD_DELIMITER, RunKind::Bold)?;
    let runs = split_delimiter(runs, ITALIC_DELIMITER, RunKind::Italic)?;
    let runs = split_delimiter(runs, CODE_DELIMITER, RunKind::Code)?;

    trace!(input_len = text.len(), runs = runs.len(), "tokenized inline text");
    Ok(runs)
}

/// `(alt, url)` pairs for every `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// `(text, url)` pairs for every `[text](url)` in `text` not preceded by `!`.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    link_captures(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

fn link_captures(text: &str) -> impl Iterator<Item = Captures<'_>> {
    LINK_RE.captures_iter(text).filter(move |caps| {
        let start = caps.get(0).map_or(0, |m| m.start());
        !text[..start].ends_with('!')
    })
}

/// Pull `![alt](url)` out of plain runs.
pub fn split_images(runs: Vec<TextRun>) -> Vec<TextRun> {
    split_matches(
        runs,
        |text| IMAGE_RE.captures_iter(text).collect(),
        |alt, url| TextRun::image(alt, url),
    )
}

/// Pull `[text](url)` out of plain runs.
pub fn split_links(runs: Vec<TextRun>) -> Vec<TextRun> {
    split_matches(
        runs,
        |text| link_captures(text).collect(),
        |label, url| TextRun::link(label, url),
    )
}

fn split_matches<F, B>(runs: Vec<TextRun>, find: F, build: B) -> Vec<TextRun>
where
    F: for<'t> Fn(&'t str) -> Vec<Captures<'t>>,
    B: Fn(&str, &str) -> TextRun,
{
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if !run.is_plain() {
            out.push(run);
            continue;
        }

        let text = run.content();
        let mut rest = 0;
        for caps in find(text) {
            let Some(whole) = caps.get(0) else { continue };
            push_plain(&mut out, &text[rest..whole.start()]);
            out.push(build(&caps[1], &caps[2]));
            rest = whole.end();
        }
        push_plain(&mut out, &text[rest..]);
    }
    out
}

/// Split plain runs on `delimiter`; odd-numbered pieces become `kind`.
///
/// Non-plain runs pass through untouched. A run with an odd number of
/// delimiters has an unterminated span and is rejected.
pub fn split_delimiter(
    runs: Vec<TextRun>,
    delimiter: &'static str,
    kind: RunKind,
) -> Result<Vec<TextRun>> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if !run.is_plain() || !run.content().contains(delimiter) {
            out.push(run);
            continue;
        }

        let parts: Vec<&str> = run.content().split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnbalancedDelimiter {
                delimiter,
                text: run.content().to_string(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let kind = if i % 2 == 1 { kind } else { RunKind::Plain };
            out.push(TextRun::styled(part, kind));
        }
    }
    Ok(out)
}

fn push_plain(out: &mut Vec<TextRun>, text: &str) {
    if !text.is_empty() {
        out.push(TextRun::plain(text));
    }
}
