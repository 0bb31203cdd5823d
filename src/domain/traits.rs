// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - PdfExtractor implements TextExtractor
//   - Tests implement TextExtractor with an in-memory stub,
//     so the dataset pipeline is testable without any PDFs
//   - The same applies to Embedder: the real implementation
//     needs an ONNX model on disk, the test one does not
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use std::path::Path;

// ─── TextExtractor ────────────────────────────────────────────────────────────
/// Any component that can pull plain text out of a document file.
///
/// Implementations:
///   - PdfExtractor → extracts page text from PDFs via lopdf
///   - (tests)      → stub returning canned text or None
pub trait TextExtractor {
    /// Extract the full text of the document at `path`.
    ///
    /// Returns None when the document cannot be read or parsed —
    /// this is the pipeline's single recoverable failure, and
    /// every caller treats None as "skip this document".
    fn extract(&self, path: &Path) -> Option<String>;
}

// ─── Embedder ─────────────────────────────────────────────────────────────────
/// Any component that maps a text to a fixed-length dense vector.
///
/// Implementations:
///   - MiniLmEmbedder → sentence-transformer ONNX model
///   - (tests)        → deterministic hash-based stub
pub trait Embedder {
    /// Embed one text into a vector of exactly dim() floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The fixed dimensionality of every vector this embedder
    /// produces. Feature-vector width is 13 + dim().
    fn dim(&self) -> usize;
}
