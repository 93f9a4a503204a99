use serde_json::Value;
use tracing::{info, warn};

use super::ToolResult;
use crate::extract::{ExtractionResult, Extractor};

/// Handles `extract-file-to-html`. Argument validation happens before any
/// filesystem access so malformed calls never leak resolution behavior.
pub fn call(extractor: &Extractor, args: &Value) -> ToolResult {
    let Some(filename) = args.get("filename").and_then(Value::as_str) else {
        return ToolResult::from_extraction(&ExtractionResult::protocol_error(
            "missing required parameter: filename",
        ));
    };

    info!(tool = crate::mcp::contracts::TOOL_EXTRACT_FILE, filename, "extracting file");
    let result = extractor.extract(filename);
    if let Some(kind) = result.error_kind() {
        warn!(filename, kind, "extraction failed");
    }
    ToolResult::from_extraction(&result)
}
