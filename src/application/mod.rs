// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, or the full screening batch).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No direct file parsing here (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training + evaluation workflow
pub mod train_use_case;

// The train-then-screen-a-directory batch workflow
pub mod screen_use_case;
