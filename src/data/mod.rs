// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from PDF files on disk all
// the way to the flat numeric matrix the classifier consumes.
//
// The pipeline flows in this order:
//
//   *.pdf files
//       │
//       ▼
//   PdfExtractor       → reads files, extracts raw page text
//       │
//       ▼
//   StructuralFeatureExtractor → 13-field schema from raw text
//       │
//       ▼
//   Normalizer         → stopword-free content tokens
//       │
//       ▼
//   Embedder (Layer 5) → dense sentence vector
//       │
//       ▼
//   DatasetBuilder     → assembled rows + labels + skip report
//       │
//       ▼
//   stratified_split   → reproducible train/test partitions
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Extracts raw text from PDFs via lopdf
pub mod extractor;

/// Cleans raw text down to content-bearing tokens
pub mod normalizer;

/// Computes the 13 structural features from raw text
pub mod features;

/// Assembles feature vectors and builds the labeled matrix
pub mod dataset;

/// Seeded, label-stratified train/test splitting
pub mod splitter;
