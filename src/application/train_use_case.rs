// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the labeled manifest   (Layer 6 - infra)
//   Step 2: Load the embedding model    (Layer 5 - ml)
//   Step 3: Build the feature dataset   (Layer 4 - data)
//   Step 4: Split / scale / fit / eval  (Layer 5 - ml)
//
// The use case RETURNS the fitted model so the caller decides
// what to do with it (report the F1, or go on to screen a
// directory). Nothing is stored globally.
//
// Reference: Clean Architecture pattern

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::dataset::DatasetBuilder;
use crate::data::extractor::PdfExtractor;
use crate::domain::traits::{Embedder, TextExtractor};
use crate::infra::manifest::load_manifest;
use crate::ml::embedder::{EmbedderConfig, MiniLmEmbedder};
use crate::ml::trainer::{run_training, TrainOutcome};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. Serialisable so a run's exact
// configuration can be dumped for the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub manifest:       String,
    pub papers_dir:     String,
    pub model_path:     String,
    pub tokenizer_path: String,
    pub embedding_dim:  usize,
    pub max_length:     usize,
    pub train_fraction: f64,
    pub trees:          usize,
    pub max_depth:      Option<usize>,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            manifest:       "data/manifest.csv".to_string(),
            papers_dir:     "data/papers".to_string(),
            model_path:     "models/all_minilm_l6_v2.onnx".to_string(),
            tokenizer_path: "models/tokenizer.json".to_string(),
            embedding_dim:  384,
            max_length:     256,
            train_fraction: 0.8,
            trees:          100,
            max_depth:      None,
            seed:           42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the training pipeline end to end.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Load the real components and train. This is what the
    /// CLI calls.
    pub fn execute(&self) -> Result<TrainOutcome> {
        let extractor = PdfExtractor::new();
        let embedder  = MiniLmEmbedder::new(EmbedderConfig {
            model_path:     PathBuf::from(&self.config.model_path),
            tokenizer_path: PathBuf::from(&self.config.tokenizer_path),
            dim:            self.config.embedding_dim,
            max_length:     self.config.max_length,
        })?;

        self.execute_with(&extractor, &embedder)
    }

    /// Train with caller-supplied pipeline components.
    ///
    /// Split out from execute() for two reasons: the screening
    /// use case must reuse ONE loaded embedder for training and
    /// prediction, and tests substitute stubs here.
    pub fn execute_with<X: TextExtractor, E: Embedder>(
        &self,
        extractor: &X,
        embedder:  &E,
    ) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // Dump the exact run configuration for the record
        if let Ok(json) = serde_json::to_string(cfg) {
            tracing::debug!("Run configuration: {json}");
        }

        // ── Step 1: Load the labeled manifest ─────────────────────────────────
        tracing::info!("Loading manifest '{}'", cfg.manifest);
        let papers = load_manifest(Path::new(&cfg.manifest), Path::new(&cfg.papers_dir))?;

        // ── Step 3: Build the feature dataset ─────────────────────────────────
        // (Step 2, loading the embedder, happened before we got here)
        let builder = DatasetBuilder::new(extractor, embedder);
        let dataset = builder.build(&papers)?;

        if !dataset.skipped.is_empty() {
            tracing::warn!(
                "{} of {} labeled documents were skipped: {}",
                dataset.skipped.len(),
                papers.len(),
                dataset.skipped.join(", "),
            );
        }

        // ── Step 4: Split, scale, fit, evaluate ───────────────────────────────
        run_training(cfg, dataset)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::tests::{StubEmbedder, StubExtractor};
    use std::io::Write;

    fn write_manifest(dir: &Path, rows: &[(&str, usize)]) -> String {
        let path = dir.join("manifest.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "paper_id,label").unwrap();
        for (id, label) in rows {
            writeln!(f, "{id},{label}").unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_trains_from_manifest_with_stub_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<(String, usize)> = (0..15)
            .map(|i| (format!("p{i:02}.pdf"), usize::from(i >= 5)))
            .collect();
        let rows_ref: Vec<(&str, usize)> =
            rows.iter().map(|(s, l)| (s.as_str(), *l)).collect();

        let config = TrainConfig {
            manifest: write_manifest(dir.path(), &rows_ref),
            papers_dir: dir.path().to_string_lossy().into_owned(),
            trees: 10,
            max_depth: Some(8),
            ..TrainConfig::default()
        };

        let outcome = TrainUseCase::new(config)
            .execute_with(&StubExtractor, &StubEmbedder)
            .unwrap();
        assert!((0.0..=1.0).contains(&outcome.f1));
    }

    #[test]
    fn test_missing_manifest_fails() {
        let config = TrainConfig {
            manifest: "no/such/manifest.csv".to_string(),
            ..TrainConfig::default()
        };
        let result = TrainUseCase::new(config).execute_with(&StubExtractor, &StubEmbedder);
        assert!(result.is_err());
    }
}
