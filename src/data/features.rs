// ============================================================
// Layer 4 — Structural Feature Extractor
// ============================================================
// Scans RAW paper text (before normalisation) and fills the
// 13-field StructuralFeatures schema from Layer 3.
//
// Why raw text and not normalised text?
//   Almost everything measured here lives in exactly the parts
//   the normaliser throws away: citation markers, section
//   headings, "Figure 3" references, sentence punctuation for
//   the readability score. The embedder gets the cleaned text;
//   this extractor gets the original.
//
// All keyword matching is case-insensitive. All counts come
// from compiled regexes so a 50-page paper is one pass per
// pattern, not a hand-written scanner.
//
// Edge cases, decided explicitly:
//   - empty text       → word_count = 0, avg_word_length = 0.0
//   - zero words       → technical_word_ratio divides by
//                        max(1, word_count), so it is 0.0
//   - readability of an empty text is defined as 0.0
//
// Reference: Flesch (1948) "A new readability yardstick"
//            regex crate documentation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::features::StructuralFeatures;

/// Bracketed numeric citation groups: [3], [1, 2], [4-7]
static CITATION_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+(?:\s*[,;–-]\s*\d+)*\]").unwrap());

/// Numbered equation references: "equation 4", "eq. (3)", "Eq 12"
static EQUATION_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\beq(?:uation)?s?\.?\s*\(?\d+").unwrap());

/// Numbered figure references: "figure 2", "Fig. 5"
static FIGURE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfig(?:ure)?s?\.?\s*\d+").unwrap());

/// Numbered table references: "table 1", "Tables 2"
static TABLE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btables?\s*\d+").unwrap());

/// Sentence terminators for the readability estimate
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Vocabulary that marks technical/academic register.
/// Matched against lowercased, punctuation-trimmed tokens.
const TECHNICAL_TERMS: &[&str] = &[
    "accuracy", "algorithm", "analysis", "approach", "baseline", "benchmark",
    "classification", "cluster", "coefficient", "convergence", "correlation",
    "data", "dataset", "distribution", "empirical", "estimation", "evaluation",
    "experiment", "framework", "function", "gradient", "hypothesis",
    "inference", "iteration", "matrix", "method", "methodology", "metric",
    "model", "network", "neural", "optimization", "parameter", "precision",
    "probability", "regression", "significance", "simulation", "statistical",
    "stochastic", "theorem", "training", "validation", "variable", "variance",
    "vector",
];

/// Computes the 13 structural features of one paper.
/// Stateless; the compiled regexes above are process-wide.
pub struct StructuralFeatureExtractor;

impl StructuralFeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> StructuralFeatures {
        let lowered = text.to_lowercase();

        // ── Section-presence flags ────────────────────────────────────────────
        // Substring presence is enough here: a paper that never
        // says "introduction" anywhere is the signal we want.
        let has_abstract     = flag(lowered.contains("abstract"));
        let has_introduction = flag(lowered.contains("introduction"));
        let has_methodology  = flag(
            lowered.contains("method")
                || lowered.contains("methodology")
                || lowered.contains("approach"),
        );
        let has_results    = flag(lowered.contains("results"));
        let has_conclusion = flag(lowered.contains("conclusion"));

        // ── Reference counts ──────────────────────────────────────────────────
        let citation_count = CITATION_REF.find_iter(text).count() as f64;
        let equation_count = EQUATION_REF.find_iter(text).count() as f64;
        let figure_count   = FIGURE_REF.find_iter(text).count() as f64;
        let table_count    = TABLE_REF.find_iter(text).count() as f64;

        // ── Word statistics ───────────────────────────────────────────────────
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();

        // Mean of an empty sequence is undefined — define it as 0.0
        let avg_word_length = if word_count == 0 {
            0.0
        } else {
            let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
            total_chars as f64 / word_count as f64
        };

        // ── Technical-term density ────────────────────────────────────────────
        // max(1, word_count) guards the empty-text division
        let technical_hits = words
            .iter()
            .filter(|w| {
                let t = w.to_lowercase();
                let t = t.trim_matches(|c: char| !c.is_alphanumeric());
                TECHNICAL_TERMS.contains(&t)
            })
            .count();
        let technical_word_ratio = technical_hits as f64 / word_count.max(1) as f64;

        StructuralFeatures {
            has_abstract,
            has_introduction,
            has_methodology,
            has_results,
            has_conclusion,
            citation_count,
            equation_count,
            figure_count,
            table_count,
            readability: flesch_reading_ease(text, &words),
            word_count: word_count as f64,
            avg_word_length,
            technical_word_ratio,
        }
    }
}

impl Default for StructuralFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}

/// Flesch reading ease:
///   206.835 − 1.015·(words/sentences) − 84.6·(syllables/words)
///
/// Higher is easier to read; research prose usually lands well
/// below 50. Returns 0.0 for empty text.
fn flesch_reading_ease(text: &str, words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    // At least one sentence once we know there are words —
    // a fragment without terminal punctuation still reads as one
    let sentences = SENTENCE_END.find_iter(text).count().max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;

    206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}

/// Vowel-group syllable heuristic: each maximal run of vowels
/// counts as one syllable, minimum one per word. Crude, but it
/// only needs to be stable and monotone with word complexity.
fn count_syllables(word: &str) -> usize {
    let mut count = 0usize;
    let mut in_vowel_run = false;

    for c in word.to_lowercase().chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_vowel_run {
            count += 1;
        }
        in_vowel_run = is_vowel;
    }

    count.max(1)
}
