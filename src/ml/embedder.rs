// ============================================================
// Layer 5 — Semantic Embedder (ONNX)
// ============================================================
// Maps normalised text to a fixed-length dense vector using a
// sentence-transformer model (all-MiniLM-L6-v2 class, 384-dim)
// running under ONNX Runtime.
//
// Inference only — no fine-tuning. The session and tokenizer
// are loaded ONCE when the embedder is constructed and reused
// for every document in the run.
//
// Pipeline per text:
//   1. Tokenise with the HuggingFace tokenizer (truncated to
//      max_length so long papers don't blow up the sequence)
//   2. Run the model with input_ids / attention_mask /
//      token_type_ids, all shaped [1, seq_len]
//   3. Mean-pool the last hidden state, weighted by the
//      attention mask so padding never contributes
//   4. L2-normalise so cosine similarity equals dot product
//
// Deterministic: same model + same input → same vector.
//
// Reference: Reimers & Gurevych (2019) Sentence-BERT
//            ort crate documentation

use anyhow::{Context, Result};
use ort::{session::Session, value::Tensor};
use std::cell::RefCell;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::domain::traits::Embedder;

/// Where the model lives and how to run it.
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Path to the ONNX model file
    pub model_path: PathBuf,
    /// Path to the matching tokenizer.json
    pub tokenizer_path: PathBuf,
    /// Output width of the model (384 for MiniLM-L6-v2)
    pub dim: usize,
    /// Token budget per document — longer inputs are truncated
    pub max_length: usize,
}

/// Sentence-transformer embedder backed by an ort session.
pub struct MiniLmEmbedder {
    // RefCell because Session::run takes &mut self while the
    // Embedder trait exposes &self. The pipeline is strictly
    // sequential, so there is never a second borrower.
    session:   RefCell<Session>,
    tokenizer: Tokenizer,
    config:    EmbedderConfig,
}

impl MiniLmEmbedder {
    /// Load the model and tokenizer from disk. Called once at
    /// startup; failures here are fatal for the run.
    pub fn new(config: EmbedderConfig) -> Result<Self> {
        tracing::info!("Loading embedding model from '{}'", config.model_path.display());

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&config.model_path)
            .with_context(|| {
                format!("Failed to load ONNX model from '{}'", config.model_path.display())
            })?;

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load tokenizer from '{}': {e}",
                config.tokenizer_path.display()
            )
        })?;

        Ok(Self {
            session: RefCell::new(session),
            tokenizer,
            config,
        })
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // ── Step 1: Tokenise ──────────────────────────────────────────────────
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {e}"))?;

        let seq_len = encoding.get_ids().len().min(self.config.max_length);

        let input_ids: Vec<i64> = encoding.get_ids()[..seq_len]
            .iter()
            .map(|&t| i64::from(t))
            .collect();
        let attention_mask: Vec<i64> = encoding.get_attention_mask()[..seq_len]
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let token_type_ids = vec![0i64; seq_len];

        // ── Step 2: Run the model ─────────────────────────────────────────────
        // All inputs are shaped [1, seq_len]
        let input_ids_tensor = Tensor::from_array(([1, seq_len], input_ids))
            .context("Failed to build input_ids tensor")?;
        let attention_tensor = Tensor::from_array(([1, seq_len], attention_mask.clone()))
            .context("Failed to build attention_mask tensor")?;
        let token_type_tensor = Tensor::from_array(([1, seq_len], token_type_ids))
            .context("Failed to build token_type_ids tensor")?;

        let mut session = self.session.borrow_mut();
        let outputs = session
            .run(ort::inputs![input_ids_tensor, attention_tensor, token_type_tensor])
            .context("ONNX inference failed")?;

        // Last hidden state: [1, seq_len, hidden_dim]
        let (shape, hidden_states) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract hidden states")?;
        let hidden_dim = shape[2] as usize;

        // ── Step 3: Attention-masked mean pooling ─────────────────────────────
        let mut pooled = vec![0.0f32; hidden_dim];
        let mut mask_sum = 0.0f32;

        for (pos, &mask) in attention_mask.iter().enumerate() {
            let weight = mask as f32;
            mask_sum += weight;
            for (j, slot) in pooled.iter_mut().enumerate() {
                *slot += hidden_states[pos * hidden_dim + j] * weight;
            }
        }

        if mask_sum > 0.0 {
            for v in &mut pooled {
                *v /= mask_sum;
            }
        }

        // ── Step 4: L2 normalisation ──────────────────────────────────────────
        normalize_vector(&mut pooled);

        Ok(pooled)
    }

    fn dim(&self) -> usize {
        self.config.dim
    }
}

/// Scale a vector to unit length. Zero vectors pass through.
fn normalize_vector(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_vector_unit_length() {
        let mut v = vec![3.0f32, 4.0];
        normalize_vector(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let mut v = vec![0.0f32; 4];
        normalize_vector(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }
}
