use crate::convert::{ConvertError, text};

pub fn convert(bytes: &[u8]) -> Result<String, ConvertError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ConvertError::Parse(format!("pdf extraction failed: {e}")))?;
    Ok(text::paragraphs_to_html(&clean_extracted_text(&raw)))
}

/// Extracted PDF text carries layout artifacts: runs of spaces and single
/// hard-wrapped lines inside one paragraph. Collapse the former, keep blank
/// lines as paragraph breaks.
fn clean_extracted_text(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut paragraphs: Vec<String> = Vec::new();

    for block in normalized.split("\n\n") {
        let joined = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            paragraphs.push(collapsed);
        }
    }

    paragraphs.join("\n\n")
}
