use crate::block::BlockType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while converting or rendering.
///
/// None of these are transient: the input (or the tree built from it) is
/// malformed and will fail the same way until it changes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unbalanced `{delimiter}` delimiter in {text:?}")]
    UnbalancedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("leaf node {} has no value", tag_label(.tag))]
    MissingValue { tag: Option<String> },

    #[error("container node {} has no children or no tag", tag_label(.tag))]
    MissingChildren { tag: Option<String> },

    #[error("unknown text run kind: {0:?}")]
    UnknownRunKind(String),

    #[error("failed to build block {index} ({block_type})")]
    BlockBuildFailed {
        index: usize,
        block_type: BlockType,
        #[source]
        source: Box<Error>,
    },

    #[error("document has no level-1 heading to use as a title")]
    MissingTitle,
}

fn tag_label(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("<{tag}>"),
        None => "(untagged)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_failure_keeps_its_cause() {
        use std::error::Error as _;

        let err = Error::BlockBuildFailed {
            index: 2,
            block_type: BlockType::Heading(3),
            source: Box::new(Error::UnbalancedDelimiter {
                delimiter: "**",
                text: "a **b".to_string(),
            }),
        };

        assert_eq!(err.to_string(), "failed to build block 2 (heading 3)");
        let cause = err.source().map(|e| e.to_string());
        assert_eq!(
            cause.as_deref(),
            Some("unbalanced `**` delimiter in \"a **b\"")
        );
    }

    #[test]
    fn node_errors_name_the_tag() {
        let err = Error::MissingValue {
            tag: Some("b".to_string()),
        };
        assert_eq!(err.to_string(), "leaf node <b> has no value");

        let err = Error::MissingChildren { tag: None };
        assert_eq!(
            err.to_string(),
            "container node (untagged) has no children or no tag"
        );
    }
}
