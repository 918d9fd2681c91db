use tracing::debug;

use crate::block::{Block, BlockType, RunKind, TextRun};
use crate::config::{Config, LineJoin};
use crate::error::{Error, Result};
use crate::inline::tokenize_inline;
use crate::node::{Attributes, HtmlNode};
use crate::parser::{Fence, split_fence, strip_ordered_marker};

/// Map one run to one leaf node.
pub fn text_run_to_html(run: TextRun) -> HtmlNode {
    let (content, kind, target) = run.into_parts();
    let target = target.unwrap_or_default();
    match kind {
        RunKind::Plain => HtmlNode::text(content),
        RunKind::Bold => HtmlNode::leaf("b", content, Attributes::new()),
        RunKind::Italic => HtmlNode::leaf("i", content, Attributes::new()),
        RunKind::Code => HtmlNode::leaf("code", content, Attributes::new()),
        RunKind::Link => {
            let attrs: Attributes = [("href", target)].into_iter().collect();
            HtmlNode::leaf("a", content, attrs)
        }
        RunKind::Image => {
            let attrs: Attributes = [("src", target), ("alt", content)].into_iter().collect();
            HtmlNode::leaf("img", "", attrs)
        }
    }
}

/// Build the `div` root for a sequence of classified blocks.
///
/// The first block that fails aborts the whole build; its position and type
/// are attached to the error.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> Result<HtmlNode> {
    let children = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            block_to_html(block, config).map_err(|source| Error::BlockBuildFailed {
                index,
                block_type: block.kind,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(blocks = children.len(), "assembled document");
    Ok(HtmlNode::container("div", children))
}

fn block_to_html(block: &Block, config: &Config) -> Result<HtmlNode> {
    let text = block.text.as_str();
    match block.kind {
        BlockType::Heading(level) => {
            let content = &text[usize::from(level) + 1..];
            Ok(HtmlNode::container(
                &format!("h{level}"),
                inline_children(content)?,
            ))
        }
        BlockType::Paragraph => Ok(HtmlNode::container("p", inline_children(text)?)),
        BlockType::Quote => {
            let lines: Vec<&str> = text.lines().map(strip_quote_marker).collect();
            let separator = match config.quote.line_join {
                LineJoin::Space => " ",
                LineJoin::Newline => "\n",
            };
            let content = lines.join(separator);
            Ok(HtmlNode::container(
                "blockquote",
                inline_children(content.trim())?,
            ))
        }
        BlockType::UnorderedList => list_to_html("ul", text, strip_unordered_marker),
        BlockType::OrderedList => list_to_html("ol", text, strip_ordered_marker),
        BlockType::Code => {
            let fence = split_fence(text).unwrap_or(Fence { info: "", body: text });
            Ok(code_to_html(fence))
        }
    }
}

fn list_to_html(tag: &str, text: &str, strip: fn(&str) -> &str) -> Result<HtmlNode> {
    let items = text
        .lines()
        .map(|line| -> Result<HtmlNode> {
            Ok(HtmlNode::container("li", inline_children(strip(line))?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::container(tag, items))
}

/// `<pre><code>` around the fenced body, which is never inline-tokenized.
fn code_to_html(fence: Fence<'_>) -> HtmlNode {
    let mut attrs = Attributes::new();
    if let Some(lang) = fence.info.split_whitespace().next() {
        attrs.insert("class", format!("language-{lang}"));
    }

    let code = HtmlNode::container_with("code", vec![HtmlNode::text(fence.body)], attrs);
    HtmlNode::container("pre", vec![code])
}

/// Inline runs of `text` as leaf nodes. Text with no runs at all (an empty
/// list item) becomes a single empty text leaf so the parent still renders.
fn inline_children(text: &str) -> Result<Vec<HtmlNode>> {
    let nodes: Vec<HtmlNode> = tokenize_inline(text)?
        .into_iter()
        .map(text_run_to_html)
        .collect();
    if nodes.is_empty() {
        return Ok(vec![HtmlNode::text("")]);
    }
    Ok(nodes)
}

fn strip_quote_marker(line: &str) -> &str {
    line.strip_prefix("> ")
        .or_else(|| line.strip_prefix('>'))
        .unwrap_or(line)
}

fn strip_unordered_marker(line: &str) -> &str {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{convert_document, markdown_to_html, markdown_to_html_with_config};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn html(markdown: &str) -> String {
        markdown_to_html(markdown).unwrap()
    }

    #[rstest]
    #[case(TextRun::plain("Hello, world!"), "Hello, world!")]
    #[case(TextRun::bold("Bold text"), "<b>Bold text</b>")]
    #[case(TextRun::italic("Italic text"), "<i>Italic text</i>")]
    #[case(TextRun::code("Code text"), "<code>Code text</code>")]
    #[case(
        TextRun::link("Link text", "https://example.com"),
        r#"<a href="https://example.com">Link text</a>"#
    )]
    #[case(
        TextRun::image("Image alt text", "https://example.com/image.png"),
        r#"<img src="https://example.com/image.png" alt="Image alt text"></img>"#
    )]
    fn maps_each_run_kind(#[case] run: TextRun, #[case] expected: &str) {
        assert_eq!(text_run_to_html(run).render().unwrap(), expected);
    }

    #[test]
    fn image_leaf_has_empty_value_and_ordered_attributes() {
        let node = text_run_to_html(TextRun::image("a", "u"));
        assert_eq!(node.tag(), Some("img"));
        assert_eq!(node.value(), Some(""));
        let attrs: Vec<_> = node.attributes().iter().collect();
        assert_eq!(attrs, vec![("src", "u"), ("alt", "a")]);
    }

    #[test]
    fn heading() {
        assert_eq!(html("# Hello"), "<div><h1>Hello</h1></div>");
        assert_eq!(
            html("### Some **bold** title"),
            "<div><h3>Some <b>bold</b> title</h3></div>"
        );
    }

    #[test]
    fn paragraph_keeps_newlines() {
        assert_eq!(
            html("This is _one_\nparagraph"),
            "<div><p>This is <i>one</i>\nparagraph</p></div>"
        );
    }

    #[test]
    fn quote_lines_join_with_spaces() {
        assert_eq!(
            html("> first line\n> second **line**\n>\n> end"),
            "<div><blockquote>first line second <b>line</b>  end</blockquote></div>"
        );
    }

    #[test]
    fn quote_lines_join_with_newlines_when_configured() {
        let mut config = Config::compiled_default();
        config.quote.line_join = LineJoin::Newline;
        assert_eq!(
            markdown_to_html_with_config("> one\n> two", &config).unwrap(),
            "<div><blockquote>one\ntwo</blockquote></div>"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            html("- one\n* _two_"),
            "<div><ul><li>one</li><li><i>two</i></li></ul></div>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            html("1. one\n2. [two](https://x)"),
            r#"<div><ol><li>one</li><li><a href="https://x">two</a></li></ol></div>"#
        );
    }

    #[test]
    fn empty_list_item_still_renders() {
        assert_eq!(
            html("- a\n- \n- b"),
            "<div><ul><li>a</li><li></li><li>b</li></ul></div>"
        );
    }

    #[test]
    fn code_block_is_not_tokenized() {
        assert_eq!(
            html("```\nlet **x** = a_b;\n\tindented `tick\n```"),
            "<div><pre><code>let **x** = a_b;\n\tindented `tick\n</code></pre></div>"
        );
    }

    #[test]
    fn code_block_language_becomes_a_class() {
        assert_eq!(
            html("```rust\nlet x = 1;\n```"),
            r#"<div><pre><code class="language-rust">let x = 1;
</code></pre></div>"#
        );
    }

    #[test]
    fn empty_code_block() {
        assert_eq!(html("```\n```"), "<div><pre><code></code></pre></div>");
        assert_eq!(html("```"), "<div><pre><code></code></pre></div>");
    }

    #[test]
    fn closing_fence_on_a_code_line_keeps_that_line() {
        assert_eq!(
            html("```\nlet x = 1;\nprint(x)```"),
            "<div><pre><code>let x = 1;\nprint(x)</code></pre></div>"
        );
    }

    #[test]
    fn single_line_fence_is_a_code_block() {
        assert_eq!(
            html("```print(1)```"),
            "<div><pre><code>print(1)</code></pre></div>"
        );
    }

    #[test]
    fn backticks_inside_the_body_are_kept() {
        assert_eq!(
            html("```md\nuse ``` to fence\n_not italic_ **or bold\n```"),
            r#"<div><pre><code class="language-md">use ``` to fence
_not italic_ **or bold
</code></pre></div>"#
        );
    }

    #[test]
    fn code_block_built_without_fences_keeps_its_text() {
        let block = Block {
            text: "raw".to_string(),
            kind: BlockType::Code,
        };
        let root = blocks_to_html(&[block], &Config::compiled_default()).unwrap();
        assert_eq!(root.render().unwrap(), "<div><pre><code>raw</code></pre></div>");
    }

    #[test]
    fn failing_block_reports_index_and_type() {
        let err = convert_document("# Fine\n\nstill fine\n\n- ok\n- **broken").unwrap_err();
        match err {
            Error::BlockBuildFailed {
                index,
                block_type,
                source,
            } => {
                assert_eq!(index, 2);
                assert_eq!(block_type, BlockType::UnorderedList);
                assert!(matches!(
                    *source,
                    Error::UnbalancedDelimiter { delimiter: "**", .. }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blocks_build_into_div_children_in_order() {
        let root = convert_document("## a\n\nb\n\n> c").unwrap();
        assert_eq!(root.tag(), Some("div"));
        let tags: Vec<_> = root.children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec![Some("h2"), Some("p"), Some("blockquote")]);
    }
}
