//! Primitive extraction: walk each page's content stream and count the
//! drawing operators that feed the classifier.
//!
//! ## What gets counted
//!
//! | operator       | meaning              | counted as   |
//! |----------------|----------------------|--------------|
//! | `l`            | straight segment     | `line_count` |
//! | `c`, `v`, `y`  | Bézier segment       | `curve_count`|
//! | `re`           | rectangle subpath    | `rect_count` |
//! | `Tj`, `'`, `"`, `TJ` | show text      | `char_count` |
//!
//! Shown text length is approximated by the operand string byte length,
//! which is exact for the simple encodings that dominate real documents.
//! `text_length` comes from lopdf's full text extraction instead, because
//! it resolves encodings and is what a human would call "the page text".
//!
//! ## Failure granularity
//!
//! A document that cannot be opened at all is a fatal
//! [`VectorCheckError::DocumentParse`]. A single page whose content stream
//! is missing or undecodable yields a [`PageError`] in its slot of the
//! result vector; the other pages are still extracted.

use crate::classify::PageMetrics;
use crate::error::{PageError, VectorCheckError};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info};

/// Per-page extraction outcomes, in document order.
pub type PageOutcomes = Vec<Result<PageMetrics, PageError>>;

/// Parse the PDF and extract per-page metrics.
///
/// Runs inside `spawn_blocking`: lopdf parsing is CPU-bound and a large
/// document would otherwise stall the async worker threads.
pub async fn extract_pages(bytes: Vec<u8>) -> Result<PageOutcomes, VectorCheckError> {
    tokio::task::spawn_blocking(move || extract_pages_blocking(&bytes))
        .await
        .map_err(|e| VectorCheckError::Internal(format!("extraction task panicked: {e}")))?
}

/// Blocking implementation of document parsing and per-page extraction.
pub fn extract_pages_blocking(bytes: &[u8]) -> Result<PageOutcomes, VectorCheckError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(VectorCheckError::NotAPdf { magic });
    }

    let doc = Document::load_mem(bytes).map_err(|e| VectorCheckError::DocumentParse {
        detail: e.to_string(),
    })?;

    if doc.is_encrypted() {
        return Err(VectorCheckError::DocumentParse {
            detail: "document is encrypted".into(),
        });
    }

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    info!(pages = pages.len(), "PDF loaded");

    let outcomes = pages
        .into_iter()
        .map(|(page_no, page_id)| extract_page(&doc, page_no, page_id))
        .collect();

    Ok(outcomes)
}

/// Extract one page's metrics from its decoded content stream.
fn extract_page(
    doc: &Document,
    page_no: u32,
    page_id: ObjectId,
) -> Result<PageMetrics, PageError> {
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| PageError::ContentUnreadable {
            page: page_no,
            detail: e.to_string(),
        })?;

    let content = Content::decode(&data).map_err(|e| PageError::ContentUndecodable {
        page: page_no,
        detail: e.to_string(),
    })?;

    let mut line_count: u32 = 0;
    let mut curve_count: u32 = 0;
    let mut rect_count: u32 = 0;
    let mut char_count: u32 = 0;

    for op in &content.operations {
        match op.operator.as_str() {
            "l" => line_count = line_count.saturating_add(1),
            "c" | "v" | "y" => curve_count = curve_count.saturating_add(1),
            "re" => rect_count = rect_count.saturating_add(1),
            "Tj" | "'" | "\"" | "TJ" => {
                char_count = char_count.saturating_add(shown_chars(op));
            }
            _ => {}
        }
    }

    // Text extraction failures (exotic fonts, broken ToUnicode) leave the
    // primitive counts intact; the page is scored with empty text.
    let text = doc.extract_text(&[page_no]).unwrap_or_default();
    let text_length = u32::try_from(text.trim().chars().count()).unwrap_or(u32::MAX);

    let metrics = PageMetrics {
        line_count,
        curve_count,
        rect_count,
        char_count,
        text_length,
    };
    debug!(page = page_no, ?metrics, "page extracted");
    Ok(metrics)
}

/// Character count shown by a single text operator.
fn shown_chars(op: &Operation) -> u32 {
    let n = match op.operator.as_str() {
        // Tj and ' take the string as the only operand.
        "Tj" | "'" => op.operands.first().map_or(0, string_len),
        // " takes (word-spacing, char-spacing, string).
        "\"" => op.operands.get(2).map_or(0, string_len),
        // TJ takes an array interleaving strings and kerning numbers.
        "TJ" => op.operands.first().map_or(0, |obj| match obj {
            Object::Array(items) => items.iter().map(string_len).sum(),
            _ => 0,
        }),
        _ => 0,
    };
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn string_len(obj: &Object) -> usize {
    match obj {
        Object::String(bytes, _) => bytes.len(),
        _ => 0,
    }
}
