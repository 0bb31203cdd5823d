// ============================================================
// Layer 4 — PDF Text Extractor
// ============================================================
// Extracts plain text from PDF files using the lopdf crate.
//
// How PDF text extraction works here:
//   A PDF is a tree of numbered objects; each page object
//   references content streams holding the drawing operators.
//   lopdf parses the object tree and its extract_text() walks
//   the text-showing operators of the requested pages.
//
// We extract page by page, in page order, and join the page
// texts with newlines to form the full document text.
//
// Failure handling:
//   Corrupt files, encrypted files, unsupported encodings and
//   missing files all surface as errors from lopdf. The trait
//   contract converts ALL of them into None — one log line,
//   no retry, and the caller skips the document. This is the
//   pipeline's only recoverable failure mode.
//
// Reference: lopdf crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::traits::TextExtractor;

/// Extracts text from PDF files. Stateless — one instance can
/// serve the whole run.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Option<String> {
        match extract_pdf_text(path) {
            Ok(text) => Some(text),
            // Log a warning but keep going — one bad file must
            // never take down a whole training or screening run
            Err(e) => {
                tracing::warn!("Skipping '{}': {:#}", path.display(), e);
                None
            }
        }
    }
}

/// Parse a single PDF and return its concatenated page text.
/// Page texts are joined with newlines, mirroring reading order.
fn extract_pdf_text(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path)
        .with_context(|| format!("Cannot parse PDF '{}'", path.display()))?;

    let mut pages: Vec<String> = Vec::new();

    // get_pages() returns a BTreeMap keyed by 1-based page number,
    // so iteration order is page order
    for (page_number, _object_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_number])
            .with_context(|| {
                format!("Cannot extract text from page {} of '{}'", page_number, path.display())
            })?;
        pages.push(page_text);
    }

    Ok(pages.join("\n"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_returns_none() {
        let extractor = PdfExtractor::new();
        let result = extractor.extract(Path::new("does/not/exist.pdf"));
        assert!(result.is_none());
    }

    #[test]
    fn test_corrupt_file_returns_none() {
        // Write garbage bytes with a .pdf name — lopdf must reject it
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"this is not a pdf at all").unwrap();

        let extractor = PdfExtractor::new();
        assert!(extractor.extract(&path).is_none());
    }
}
