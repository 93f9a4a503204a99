use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};

use crate::convert::ConvertError;

pub fn convert(bytes: &[u8]) -> Result<String, ConvertError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ConvertError::Parse(format!("docx parsing failed: {e}")))?;

    let mut body = String::new();
    for child in docx.document.children.iter() {
        render_child(&mut body, child);
    }
    Ok(body)
}

fn render_child(body: &mut String, child: &DocumentChild) {
    match child {
        DocumentChild::Paragraph(paragraph) => {
            let text = paragraph_text(paragraph);
            if !text.is_empty() {
                body.push_str("<p>");
                body.push_str(&html_escape::encode_text(&text));
                body.push_str("</p>\n");
            }
        }
        DocumentChild::Table(table) => {
            body.push_str("<table>\n");
            for row in &table.rows {
                let TableChild::TableRow(table_row) = row;
                body.push_str("<tr>");
                for cell in &table_row.cells {
                    let TableRowChild::TableCell(table_cell) = cell;
                    let mut cell_text = String::new();
                    for content in &table_cell.children {
                        if let TableCellContent::Paragraph(paragraph) = content {
                            let text = paragraph_text(paragraph);
                            if !text.is_empty() {
                                if !cell_text.is_empty() {
                                    cell_text.push(' ');
                                }
                                cell_text.push_str(&text);
                            }
                        }
                    }
                    body.push_str("<td>");
                    body.push_str(&html_escape::encode_text(&cell_text));
                    body.push_str("</td>");
                }
                body.push_str("</tr>\n");
            }
            body.push_str("</table>\n");
        }
        _ => {}
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        text.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let ParagraphChild::Run(run) = link_child {
                        for run_child in &run.children {
                            if let RunChild::Text(t) = run_child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    text
}
