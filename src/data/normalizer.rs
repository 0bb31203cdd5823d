// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Reduces raw extracted text to the content-bearing tokens the
// embedding model should see.
//
// Why do we need to normalise?
//   Raw PDF text is noisy:
//   - Line breaks fall mid-sentence wherever the page layout
//     happened to wrap
//   - Citation markers like [12] or [3, 4] carry no semantic
//     content but are everywhere in academic writing
//   - Function words ("the", "of", "and") dominate the token
//     stream without distinguishing one paper from another
//
// Normalisation steps (applied in order):
//   1. Collapse every run of whitespace to a single space
//   2. Remove bracketed numeric citation groups
//   3. Split into tokens, lowercase each one
//   4. Drop stopwords, pure-punctuation tokens, empty strings
//   5. Rejoin with single spaces
//
// Contract: empty or whitespace-only input returns an empty
// string — never an error.
//
// Reference: regex crate documentation
//            Rust Book §13 (Iterators)

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of whitespace, including newlines from PDF layout
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Bracketed numeric citation groups: [3], [1, 2], [4-7], [5; 9]
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+(?:\s*[,;–-]\s*\d+)*\]").unwrap());

/// English stopwords dropped from the token stream.
/// Kept deliberately small and static so normalisation is
/// deterministic across runs and machines.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am",
    "an", "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "cannot", "could",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise raw text for the embedder.
    /// Takes a &str and returns an owned String.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        // ── Step 1: Collapse whitespace runs ──────────────────────────────────
        let collapsed = WHITESPACE_RUN.replace_all(text, " ");

        // ── Step 2: Strip citation markers ────────────────────────────────────
        let stripped = CITATION_MARKER.replace_all(&collapsed, " ");

        // ── Step 3–5: Tokenise, filter, rejoin ────────────────────────────────
        // A token survives only if, after lowercasing and trimming
        // punctuation from its edges, it is non-empty and not a stopword.
        let tokens: Vec<String> = stripped
            .split_whitespace()
            .filter_map(|raw| {
                let token = raw
                    .to_lowercase()
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_string();

                if token.is_empty() || STOPWORDS.contains(&token.as_str()) {
                    None
                } else {
                    Some(token)
                }
            })
            .collect();

        tokens.join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_empty_output() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   \n\t  "), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("deep   neural\n\nnetworks"), "deep neural networks");
    }

    #[test]
    fn test_removes_citation_markers() {
        let n = Normalizer::new();
        let out = n.normalize("transformers [1] outperform baselines [2, 3] clearly [4-7]");
        assert_eq!(out, "transformers outperform baselines clearly");
    }

    #[test]
    fn test_drops_stopwords_and_punctuation() {
        let n = Normalizer::new();
        // "the", "of", "and" are stopwords; "---" is pure punctuation
        let out = n.normalize("the accuracy of --- training and evaluation");
        assert_eq!(out, "accuracy training evaluation");
    }

    #[test]
    fn test_lowercases_tokens() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("Bayesian Inference"), "bayesian inference");
    }
}
