use serde_json::json;

pub mod contracts;
pub mod errors;
pub mod protocol;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![json!({
        "name": contracts::TOOL_EXTRACT_FILE,
        "description": contracts::TOOL_EXTRACT_FILE_DESCRIPTION,
        "inputSchema": contracts::extract_file_schema()
    })]
}
