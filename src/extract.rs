use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::config::ServerConfig;
use crate::convert::{CONTENT_TYPE_KEY, DocumentConverter};
use crate::mcp::errors;

pub const SUCCESS_MESSAGE: &str = "File content extracted successfully";

/// Resolves filenames inside the sandboxed base directory and turns the
/// collaborator's output into the normalized success/error envelope body.
pub struct Extractor {
    config: ServerConfig,
    converter: Arc<dyn DocumentConverter>,
}

#[derive(Debug, Clone)]
pub enum ExtractionResult {
    Success {
        html: String,
        filename: String,
        content_type: String,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    status: &'static str,
    message: &'static str,
    html: &'a str,
    metadata: BodyMetadata<'a>,
}

#[derive(Serialize)]
struct BodyMetadata<'a> {
    filename: &'a str,
    #[serde(rename = "contentType")]
    content_type: &'a str,
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(rename = "errorType")]
    error_type: &'static str,
}

impl ExtractionResult {
    pub fn not_found(filename: &str) -> Self {
        ExtractionResult::Error {
            kind: errors::NOT_FOUND,
            message: format!("File not found: {filename}"),
        }
    }

    pub fn protocol_error(message: impl Into<String>) -> Self {
        ExtractionResult::Error {
            kind: errors::PROTOCOL,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionResult::Error { .. })
    }

    pub fn error_kind(&self) -> Option<&'static str> {
        match self {
            ExtractionResult::Success { .. } => None,
            ExtractionResult::Error { kind, .. } => Some(kind),
        }
    }

    /// Serialize the JSON-shaped body carried as the envelope's text
    /// payload. One pass through serde_json; no hand escaping.
    pub fn body(&self) -> String {
        let serialized = match self {
            ExtractionResult::Success {
                html,
                filename,
                content_type,
            } => serde_json::to_string(&SuccessBody {
                status: "success",
                message: SUCCESS_MESSAGE,
                html,
                metadata: BodyMetadata {
                    filename,
                    content_type,
                },
            }),
            ExtractionResult::Error { kind, message } => serde_json::to_string(&ErrorBody {
                status: "error",
                message: format!("Failed to extract file: {message}"),
                error_type: kind,
            }),
        };
        serialized.unwrap_or_else(|e| {
            json!({
                "status": "error",
                "message": format!("Failed to serialize extraction result: {e}"),
                "errorType": errors::INTERNAL,
            })
            .to_string()
        })
    }
}

impl Extractor {
    pub fn new(config: ServerConfig, converter: Arc<dyn DocumentConverter>) -> Self {
        Extractor { config, converter }
    }

    pub fn extract(&self, filename: &str) -> ExtractionResult {
        let Some(path) = self.resolve(filename) else {
            return ExtractionResult::not_found(filename);
        };

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return ExtractionResult::Error {
                    kind: errors::IO,
                    message: e.to_string(),
                };
            }
        };

        match self.converter.convert(&bytes, filename) {
            Ok(converted) => {
                let content_type = converted
                    .metadata
                    .get(CONTENT_TYPE_KEY)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                ExtractionResult::Success {
                    html: converted.html,
                    filename: filename.to_string(),
                    content_type,
                }
            }
            Err(e) => ExtractionResult::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }

    /// Canonicalized paths must stay under the canonicalized base directory.
    /// Every failure mode collapses to None so callers cannot distinguish a
    /// traversal attempt from a missing file.
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let base = self.config.base_dir.canonicalize().ok()?;
        let candidate = base.join(filename).canonicalize().ok()?;
        (candidate.starts_with(&base) && candidate.is_file()).then_some(candidate)
    }
}
