//! Tool invocation outcomes.
//!
//! Every invocation resolves to exactly one [`ToolOutcome`]: either an
//! ordered sequence of content blocks or a failure message. The outcome is
//! always fully formed; dispatch never lets a handler fault escape as
//! anything else.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One block of tool output content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// The tagged result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success(Vec<ContentBlock>),
    Failure(String),
}

impl ToolOutcome {
    /// A success outcome with a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(vec![ContentBlock::text(text)])
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Wire encoding used as the `tools/call` result payload.
    ///
    /// Failures ride in-band as an error-flagged text block, so a failed
    /// invocation is still a successful protocol response.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Success(content) => json!({
                "content": content,
                "isError": false,
            }),
            Self::Failure(message) => json!({
                "content": [ContentBlock::text(message.clone())],
                "isError": true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wire_encoding() {
        let wire = ToolOutcome::text("hello").to_wire();
        assert_eq!(wire["isError"], false);
        assert_eq!(wire["content"][0]["type"], "text");
        assert_eq!(wire["content"][0]["text"], "hello");
    }

    #[test]
    fn test_failure_wire_encoding() {
        let wire = ToolOutcome::failure("boom").to_wire();
        assert_eq!(wire["isError"], true);
        assert_eq!(wire["content"][0]["text"], "boom");
    }

    #[test]
    fn test_content_block_serialization() {
        let block = serde_json::to_value(ContentBlock::text("hi")).unwrap();
        assert_eq!(block, json!({ "type": "text", "text": "hi" }));
    }
}
