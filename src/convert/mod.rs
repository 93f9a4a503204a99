use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::mcp::errors;

pub mod docx;
pub mod markdown;
pub mod pdf;
pub mod text;

pub const CONTENT_TYPE_KEY: &str = "contentType";

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone)]
pub struct Converted {
    pub html: String,
    pub metadata: HashMap<String, String>,
}

impl Converted {
    fn new(html: String, content_type: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(CONTENT_TYPE_KEY.to_string(), content_type.to_string());
        Converted { html, metadata }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to parse document: {0}")]
    Parse(String),
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::UnsupportedFormat(_) => errors::UNSUPPORTED_FORMAT,
            ConvertError::Parse(_) => errors::PARSE_ERROR,
            ConvertError::Encoding(_) => errors::ENCODING_ERROR,
            ConvertError::Io(_) => errors::IO,
        }
    }
}

/// The extraction collaborator: opaque to the protocol layer, which only
/// sees HTML plus a metadata map or a categorized failure.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, bytes: &[u8], filename_hint: &str) -> Result<Converted, ConvertError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Markdown,
    Html,
    Text,
}

impl DocumentFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Markdown => "text/markdown",
            DocumentFormat::Html => "text/html",
            DocumentFormat::Text => "text/plain",
        }
    }
}

/// Magic bytes win over the filename hint; the hint settles container and
/// text formats that share no signature.
pub fn detect_format(bytes: &[u8], filename_hint: &str) -> Result<DocumentFormat, ConvertError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(DocumentFormat::Pdf);
    }

    let extension = Path::new(filename_hint)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    if bytes.starts_with(ZIP_MAGIC) {
        return match extension.as_deref() {
            Some("docx") => Ok(DocumentFormat::Docx),
            _ => Err(ConvertError::UnsupportedFormat(format!(
                "unrecognized zip container: {filename_hint}"
            ))),
        };
    }

    match extension.as_deref() {
        Some("md") | Some("markdown") => Ok(DocumentFormat::Markdown),
        Some("html") | Some("htm") => Ok(DocumentFormat::Html),
        Some("txt") => Ok(DocumentFormat::Text),
        _ => {
            if std::str::from_utf8(bytes).is_ok() {
                Ok(DocumentFormat::Text)
            } else {
                Err(ConvertError::UnsupportedFormat(format!(
                    "unrecognized binary content: {filename_hint}"
                )))
            }
        }
    }
}

pub(crate) fn wrap_document(body: &str) -> String {
    format!("<html><head><meta charset=\"utf-8\"></head><body>\n{body}</body></html>\n")
}

/// Auto-detecting converter covering PDF, DOCX, Markdown, HTML, and plain
/// text inputs.
#[derive(Debug, Default)]
pub struct AutoConverter;

impl DocumentConverter for AutoConverter {
    fn convert(&self, bytes: &[u8], filename_hint: &str) -> Result<Converted, ConvertError> {
        let format = detect_format(bytes, filename_hint)?;
        let html = match format {
            DocumentFormat::Pdf => wrap_document(&pdf::convert(bytes)?),
            DocumentFormat::Docx => wrap_document(&docx::convert(bytes)?),
            DocumentFormat::Markdown => wrap_document(&markdown::convert(bytes)?),
            DocumentFormat::Html => text::convert_html(bytes)?,
            DocumentFormat::Text => wrap_document(&text::convert_plain(bytes)?),
        };
        Ok(Converted::new(html, format.content_type()))
    }
}
