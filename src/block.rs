use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The closed set of inline run kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl RunKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RunKind::Plain => "plain",
            RunKind::Bold => "bold",
            RunKind::Italic => "italic",
            RunKind::Code => "code",
            RunKind::Link => "link",
            RunKind::Image => "image",
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(RunKind::Plain),
            "bold" => Ok(RunKind::Bold),
            "italic" => Ok(RunKind::Italic),
            "code" => Ok(RunKind::Code),
            "link" => Ok(RunKind::Link),
            "image" => Ok(RunKind::Image),
            other => Err(Error::UnknownRunKind(other.to_string())),
        }
    }
}

/// A typed span of inline text.
///
/// `target` is present exactly when the kind is [`RunKind::Link`] or
/// [`RunKind::Image`]; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    content: String,
    kind: RunKind,
    target: Option<String>,
}

impl TextRun {
    /// A run without a target. Link and image runs go through
    /// [`TextRun::link`] and [`TextRun::image`] instead.
    pub(crate) fn styled(content: impl Into<String>, kind: RunKind) -> Self {
        debug_assert!(!matches!(kind, RunKind::Link | RunKind::Image));
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, RunKind::Plain)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(content, RunKind::Bold)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(content, RunKind::Italic)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::styled(content, RunKind::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            kind: RunKind::Link,
            target: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: RunKind::Image,
            target: Some(url.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> RunKind {
        self.kind
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == RunKind::Plain
    }

    pub(crate) fn into_parts(self) -> (String, RunKind, Option<String>) {
        (self.content, self.kind, self.target)
    }
}

/// Block-level classification, decided from a block's leading syntax only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    /// Heading level, 1 through 6
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Paragraph => f.write_str("paragraph"),
            BlockType::Heading(level) => write!(f, "heading {level}"),
            BlockType::Code => f.write_str("code"),
            BlockType::Quote => f.write_str("quote"),
            BlockType::UnorderedList => f.write_str("unordered list"),
            BlockType::OrderedList => f.write_str("ordered list"),
        }
    }
}

/// One trimmed, non-empty top-level unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub kind: BlockType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RunKind::Plain)]
    #[case(RunKind::Bold)]
    #[case(RunKind::Italic)]
    #[case(RunKind::Code)]
    #[case(RunKind::Link)]
    #[case(RunKind::Image)]
    fn run_kind_names_parse_back(#[case] kind: RunKind) {
        assert_eq!(kind.as_str().parse::<RunKind>().ok(), Some(kind));
    }

    #[test]
    fn unknown_run_kind_is_rejected() {
        let err = "wrong".parse::<RunKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownRunKind(ref name) if name == "wrong"));
    }

    #[test]
    fn only_links_and_images_carry_a_target() {
        assert_eq!(TextRun::bold("x").target(), None);
        assert_eq!(TextRun::plain("x").target(), None);
        assert_eq!(TextRun::link("x", "u").target(), Some("u"));
        assert_eq!(TextRun::image("x", "u").target(), Some("u"));
    }
}
