use serde_json::json;

pub const TOOL_EXTRACT_FILE: &str = "extract-file-to-html";

pub const TOOL_EXTRACT_FILE_DESCRIPTION: &str =
    "Extracts content from a file (PDF, Word, Markdown, etc.) and converts it to HTML";

pub const PROTOCOL_VERSION: &str = "2025-11-25";

pub const HEALTH_SERVER_NAME: &str = "File Extract MCP Server";
pub const HEALTH_SERVER_VERSION: &str = "1.0.0";

pub fn extract_file_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "filename": {
                "type": "string",
                "description": "Name of the file in the file-to-extract directory"
            }
        },
        "required": ["filename"]
    })
}
