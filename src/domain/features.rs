// ============================================================
// Layer 3 — Structural Feature Schema
// ============================================================
// The fixed, explicit schema for the hand-crafted features.
//
// Why an explicit schema instead of a HashMap?
//   The classifier consumes flat numeric vectors, so the
//   ORDER of the features is part of the contract between
//   the extractor and the assembler. A map would make that
//   order implicit (insertion order) and easy to break by
//   accident. A struct with a to_vector() method makes the
//   ordering a single, compiler-checked authority.
//
// The schema has exactly 13 entries:
//   5 section-presence flags, 4 reference counts,
//   3 readability/length numbers, 1 density ratio.
//
// Reference: Rust Book §5 (Structs)

/// Number of structural features — the width of the
/// hand-crafted block in every assembled feature vector.
pub const FEATURE_COUNT: usize = 13;

/// Names of the structural features, in vector order.
/// Position i of this array names position i of to_vector().
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "has_abstract",
    "has_introduction",
    "has_methodology",
    "has_results",
    "has_conclusion",
    "citation_count",
    "equation_count",
    "figure_count",
    "table_count",
    "readability",
    "word_count",
    "avg_word_length",
    "technical_word_ratio",
];

/// The 13 hand-crafted structural features of one paper.
///
/// Presence flags are stored as 0.0/1.0 and counts as whole
/// numbers so the struct can flatten into the classifier's
/// f64 vector without a conversion table.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralFeatures {
    /// 1.0 if the text mentions an abstract section
    pub has_abstract: f64,
    /// 1.0 if the text mentions an introduction section
    pub has_introduction: f64,
    /// 1.0 if the text mentions methods / methodology / approach
    pub has_methodology: f64,
    /// 1.0 if the text mentions a results section
    pub has_results: f64,
    /// 1.0 if the text mentions a conclusion section
    pub has_conclusion: f64,

    /// Number of bracketed numeric citation groups, e.g. [12]
    pub citation_count: f64,
    /// Number of numbered equation references, e.g. "eq. (3)"
    pub equation_count: f64,
    /// Number of numbered figure references, e.g. "figure 2"
    pub figure_count: f64,
    /// Number of numbered table references, e.g. "table 1"
    pub table_count: f64,

    /// Flesch reading-ease score of the raw text
    pub readability: f64,
    /// Whitespace-delimited word count
    pub word_count: f64,
    /// Mean characters per word — 0.0 when there are no words
    pub avg_word_length: f64,

    /// Technical-vocabulary hits / max(1, word_count), in [0, 1]
    pub technical_word_ratio: f64,
}

impl StructuralFeatures {
    /// Flatten into the fixed schema order.
    /// This is the ONLY place the ordering is defined —
    /// the assembler and all tests go through here.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.has_abstract,
            self.has_introduction,
            self.has_methodology,
            self.has_results,
            self.has_conclusion,
            self.citation_count,
            self.equation_count,
            self.figure_count,
            self.table_count,
            self.readability,
            self.word_count,
            self.avg_word_length,
            self.technical_word_ratio,
        ]
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuralFeatures {
        StructuralFeatures {
            has_abstract:         1.0,
            has_introduction:     1.0,
            has_methodology:      0.0,
            has_results:          1.0,
            has_conclusion:       0.0,
            citation_count:       7.0,
            equation_count:       2.0,
            figure_count:         3.0,
            table_count:          1.0,
            readability:          41.5,
            word_count:           2400.0,
            avg_word_length:      5.1,
            technical_word_ratio: 0.12,
        }
    }

    #[test]
    fn test_schema_width_matches_names() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(sample().to_vector().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_vector_follows_schema_order() {
        let v = sample().to_vector();
        // Spot-check a few positions against FEATURE_NAMES
        assert_eq!(v[0], 1.0);   // has_abstract
        assert_eq!(v[5], 7.0);   // citation_count
        assert_eq!(v[10], 2400.0); // word_count
        assert_eq!(v[12], 0.12); // technical_word_ratio
    }
}
