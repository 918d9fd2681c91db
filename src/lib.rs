mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;

pub use block::{Block, BlockType, RunKind, TextRun};
pub use config::{Config, ConfigError, LineJoin, PageConfig, QuoteConfig};
pub use error::{Error, Result};
pub use html::{blocks_to_html, text_run_to_html};
pub use inline::{extract_images, extract_links};
pub use node::{Attributes, HtmlNode};
pub use parser::{block_to_block_type, extract_title, markdown_to_blocks};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{ (Title|Content) \}\}").unwrap());

/// Parse markdown text into classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Tokenize a single line of inline markdown.
pub fn tokenize_inline(text: &str) -> Result<Vec<TextRun>> {
    inline::tokenize_inline(text)
}

/// Convert markdown to an HTML tree using default config.
pub fn convert_document(markdown: &str) -> Result<HtmlNode> {
    convert_document_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to an HTML tree with custom config.
pub fn convert_document_with_config(markdown: &str, config: &Config) -> Result<HtmlNode> {
    let blocks = parse(markdown);
    debug!(blocks = blocks.len(), "segmented document");
    html::blocks_to_html(&blocks, config)
}

/// Convert markdown straight to an HTML string using default config.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown straight to an HTML string with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> Result<String> {
    let html = convert_document_with_config(markdown, config)?.render()?;
    debug!(len = html.len(), "rendered document");
    Ok(html)
}

/// Fill a page template's `{{ Title }}` and `{{ Content }}` placeholders.
///
/// Both are replaced in one pass, so placeholder text inside the title or
/// the content is left as it is.
pub fn render_page(template: &str, title: &str, content: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "Title" => title,
            _ => content,
        })
        .into_owned()
}
