//! Text extraction for supported upload formats.
//!
//! Extraction happens entirely in memory: handlers pass the uploaded
//! bytes straight through, no temp files on disk.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::errors::ApiError;

/// Lowercased extension of a filename, without the dot.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// MIME type recorded in chunk metadata, keyed on extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Extract plain text from an uploaded file, dispatching on extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ApiError> {
    let ext = extension_of(filename);
    let text = match ext.as_str() {
        "txt" | "md" => String::from_utf8_lossy(bytes).into_owned(),
        "csv" => extract_csv(bytes),
        "docx" => extract_docx(bytes)?,
        "pdf" => extract_pdf(bytes)?,
        other => {
            return Err(ApiError::BadRequest(format!(
                "Unsupported file type: .{}",
                other
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "No text content found in the document".to_string(),
        ));
    }

    Ok(text)
}

/// CSV rows become lines, cells joined with spaces. Quoted cells are
/// unwrapped; embedded commas inside quotes are preserved.
fn extract_csv(bytes: &[u8]) -> String {
    let raw = String::from_utf8_lossy(bytes);
    let mut out = String::new();

    for line in raw.lines() {
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut in_quotes = false;

        for c in line.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    cells.push(std::mem::take(&mut cell));
                }
                _ => cell.push(c),
            }
        }
        cells.push(cell);

        let row = cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !row.is_empty() {
            out.push_str(&row);
            out.push('\n');
        }
    }

    out
}

/// DOCX is a ZIP container; the document body lives in
/// `word/document.xml`. Paragraph closes become newlines, everything
/// else is stripped down to text runs.
fn extract_docx(bytes: &[u8]) -> Result<String, ApiError> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ApiError::BadRequest(format!("Invalid docx file: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ApiError::BadRequest(format!("Invalid docx file: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(ApiError::internal)?;

    Ok(strip_xml_tags(&xml))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ApiError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ApiError::BadRequest(format!("Failed to extract PDF text: {}", e)))
}

static TAG_RE: OnceLock<Regex> = OnceLock::new();

fn strip_xml_tags(xml: &str) -> String {
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"));

    // Paragraph ends separate blocks of text.
    let with_breaks = xml.replace("</w:p>", "\n");
    let stripped = re.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}
