// ============================================================
// Layer 3 — Paper Domain Types
// ============================================================
// Represents one ground-truth training example: a PDF on disk
// plus its binary publishability label.
//
// Using #[derive(Debug, Clone)] gives us:
//   - Debug: lets us print the struct with {:?}
//   - Clone: lets us make copies of the struct
//   - Serialize/Deserialize: lets us save/load as JSON
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §10 (Derive Macros)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One labeled training example (1 = publishable, 0 = not).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledPaper {
    /// Full path to the PDF file
    pub path: PathBuf,

    /// Ground-truth label — always 0 or 1
    pub label: usize,
}

impl LabeledPaper {
    pub fn new(path: impl Into<PathBuf>, label: usize) -> Self {
        Self { path: path.into(), label }
    }

    /// The filename portion of the path, used as the paper id
    /// so every prediction can be tied back to its source file
    pub fn paper_id(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_id_is_the_filename() {
        let paper = LabeledPaper::new("corpus/sub/paper_07.pdf", 1);
        assert_eq!(paper.paper_id(), "paper_07.pdf");
    }
}
