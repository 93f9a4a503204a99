use crate::convert::ConvertError;

pub fn convert_plain(bytes: &[u8]) -> Result<String, ConvertError> {
    let text =
        std::str::from_utf8(bytes).map_err(|e| ConvertError::Encoding(e.to_string()))?;
    Ok(paragraphs_to_html(text))
}

/// HTML sources pass through unchanged: they already carry their own
/// document structure.
pub fn convert_html(bytes: &[u8]) -> Result<String, ConvertError> {
    let html =
        std::str::from_utf8(bytes).map_err(|e| ConvertError::Encoding(e.to_string()))?;
    Ok(html.to_string())
}

/// Blank lines delimit paragraphs; everything else is escaped text.
pub fn paragraphs_to_html(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut body = String::new();

    for block in normalized.split("\n\n") {
        let trimmed = block.trim();
        if trimmed.is_empty() {
            continue;
        }
        body.push_str("<p>");
        body.push_str(&html_escape::encode_text(trimmed));
        body.push_str("</p>\n");
    }

    body
}
