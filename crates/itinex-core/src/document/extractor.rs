//! Plain-text extraction from PDF and DOCX buffers.

use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use lopdf::Document;
use tracing::{debug, warn};

use super::{DocumentFormat, Result};
use crate::error::DocumentError;

/// Extract plain text from a document buffer.
///
/// PDF buffers go through a primary/secondary extraction chain: if the
/// primary method errors or yields only whitespace, the secondary method
/// is attempted before giving up. Callers never receive partial or
/// garbled text silently; a fully failed chain is a typed error.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Pdf => extract_pdf_text(bytes),
        DocumentFormat::Docx => extract_docx_text(bytes),
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if !text.trim().is_empty() => {
            debug!("primary PDF extraction produced {} chars", text.len());
            return Ok(text);
        }
        Ok(_) => debug!("primary PDF extraction produced only whitespace"),
        Err(e) => warn!("primary PDF extraction failed: {}", e),
    }

    let text = extract_pdf_text_lopdf(bytes)?;
    if text.trim().is_empty() {
        return Err(DocumentError::Unextractable);
    }
    debug!("secondary PDF extraction produced {} chars", text.len());
    Ok(text)
}

/// Secondary PDF method: page-by-page extraction with lopdf.
fn extract_pdf_text_lopdf(bytes: &[u8]) -> Result<String> {
    let mut doc =
        Document::load_mem(bytes).map_err(|_| DocumentError::Unextractable)?;

    // Handle PDFs with empty password encryption.
    if doc.is_encrypted() && doc.decrypt("").is_err() {
        return Err(DocumentError::Unextractable);
    }

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(DocumentError::Unextractable);
    }

    let mut full_text = String::new();
    for page in pages {
        match doc.extract_text(&[page]) {
            Ok(page_text) if !page_text.trim().is_empty() => {
                if !full_text.is_empty() {
                    full_text.push_str("\n\n");
                }
                full_text.push_str(&page_text);
            }
            Ok(_) => {}
            Err(e) => debug!("lopdf failed on page {}: {}", page, e),
        }
    }

    Ok(full_text)
}

fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::Parse(e.to_string()))?;

    let mut lines: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        match child {
            DocumentChild::Paragraph(para) => {
                let text = paragraph_text(para);
                if !text.is_empty() {
                    lines.push(text);
                }
            }
            DocumentChild::Table(table) => {
                for row in table.rows.iter() {
                    let TableChild::TableRow(row) = row;
                    let mut cells: Vec<String> = Vec::new();
                    for cell in row.cells.iter() {
                        let TableRowChild::TableCell(cell) = cell;
                        let text: Vec<String> = cell
                            .children
                            .iter()
                            .filter_map(|content| match content {
                                TableCellContent::Paragraph(p) => {
                                    let t = paragraph_text(p);
                                    (!t.is_empty()).then_some(t)
                                }
                                _ => None,
                            })
                            .collect();
                        if !text.is_empty() {
                            cells.push(text.join(" "));
                        }
                    }
                    if !cells.is_empty() {
                        lines.push(cells.join(" - "));
                    }
                }
            }
            _ => {}
        }
    }

    if lines.is_empty() {
        return Err(DocumentError::Unextractable);
    }

    Ok(lines.join("\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|pc| {
            if let ParagraphChild::Run(run) = pc {
                Some(
                    run.children
                        .iter()
                        .filter_map(|rc| {
                            if let RunChild::Text(t) = rc {
                                Some(t.text.clone())
                            } else {
                                None
                            }
                        })
                        .collect::<Vec<_>>()
                        .join(""),
                )
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("")
}
