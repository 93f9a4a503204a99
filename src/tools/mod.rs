use serde::Serialize;

use crate::extract::ExtractionResult;

pub mod extract_file;

/// Envelope returned by every tool call. The extraction body travels as a
/// single text content item; `isError` is always serialized so clients can
/// branch without probing for the field.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolResult {
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        ToolResult {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error,
        }
    }

    pub fn from_extraction(result: &ExtractionResult) -> Self {
        ToolResult::text(result.body(), result.is_error())
    }
}
