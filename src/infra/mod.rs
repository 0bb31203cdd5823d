// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the cross-cutting concerns that don't belong in
// any specific business layer:
//
//   manifest.rs      — Ground-truth manifest loading
//                      Reads the paper_id,label CSV and
//                      resolves ids against the papers
//                      directory.
//
//   metrics.rs       — Classification metrics
//                      Precision/recall/F1 per class with a
//                      printable report; degenerate cases
//                      report 0.0 instead of panicking.
//
//   report_writer.rs — Results persistence
//                      Writes the batch verdicts as the
//                      paper_id,publishable,confidence CSV,
//                      recreated on every run.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Labeled training manifest (CSV) loading
pub mod manifest;

/// Precision/recall/F1 computation and reporting
pub mod metrics;

/// Batch results CSV writer
pub mod report_writer;
