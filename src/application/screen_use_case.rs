// ============================================================
// Layer 2 — ScreenUseCase
// ============================================================
// The batch workflow: train once, then screen a directory.
//
//   Step 1: Load the embedding model ONCE
//   Step 2: Train on the manifest (TrainUseCase)
//   Step 3: Collect every *.pdf in the input directory
//   Step 4: Predict each document, strictly sequentially
//   Step 5: Write the results CSV
//   Step 6: Print a completion summary, including exactly
//           which documents were skipped and why that can
//           happen (unreadable PDFs)
//
// Skipped documents are counted and named in the summary —
// a batch that quietly loses files is worse than one that
// fails loudly.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::data::extractor::PdfExtractor;
use crate::domain::traits::{Embedder, TextExtractor};
use crate::infra::report_writer::write_results;
use crate::ml::embedder::{EmbedderConfig, MiniLmEmbedder};
use crate::ml::predictor::Predictor;

/// Configuration for a screening run: everything training
/// needs, plus where the batch lives and where results go.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub train:     TrainConfig,
    pub input_dir: String,
    pub output:    String,
}

/// What the batch run accomplished.
#[derive(Debug)]
pub struct ScreenSummary {
    /// Held-out F1 from the training step
    pub f1: f64,
    /// Documents successfully screened
    pub screened: usize,
    /// Paper ids that had to be skipped
    pub skipped: Vec<String>,
}

pub struct ScreenUseCase {
    config: ScreenConfig,
}

impl ScreenUseCase {
    pub fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    /// Load the real components and run the batch. This is
    /// what the CLI calls.
    pub fn execute(&self) -> Result<ScreenSummary> {
        let cfg = &self.config.train;

        // ── Step 1: Load the embedder once for the whole run ──────────────────
        let extractor = PdfExtractor::new();
        let embedder  = MiniLmEmbedder::new(EmbedderConfig {
            model_path:     PathBuf::from(&cfg.model_path),
            tokenizer_path: PathBuf::from(&cfg.tokenizer_path),
            dim:            cfg.embedding_dim,
            max_length:     cfg.max_length,
        })?;

        self.execute_with(&extractor, &embedder)
    }

    /// Run the batch with caller-supplied components (the same
    /// instances are used for training and screening).
    pub fn execute_with<X: TextExtractor, E: Embedder>(
        &self,
        extractor: &X,
        embedder:  &E,
    ) -> Result<ScreenSummary> {
        // ── Step 2: Train ─────────────────────────────────────────────────────
        let outcome = TrainUseCase::new(self.config.train.clone())
            .execute_with(extractor, embedder)?;

        // ── Step 3: Collect the batch ─────────────────────────────────────────
        let batch = collect_pdfs(Path::new(&self.config.input_dir))?;
        tracing::info!(
            "Screening {} documents from '{}'",
            batch.len(),
            self.config.input_dir,
        );

        // ── Step 4: Predict sequentially ──────────────────────────────────────
        let predictor = Predictor::new(extractor, embedder, &outcome.model);

        let mut predictions = Vec::with_capacity(batch.len());
        let mut skipped = Vec::new();

        for path in &batch {
            match predictor.predict_file(path)? {
                Some(prediction) => predictions.push(prediction),
                None => skipped.push(
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                ),
            }
        }

        // ── Step 5: Persist the table ─────────────────────────────────────────
        write_results(Path::new(&self.config.output), &predictions)?;

        // ── Step 6: Summarise ─────────────────────────────────────────────────
        println!(
            "\nScreened {} of {} documents → '{}'",
            predictions.len(),
            batch.len(),
            self.config.output,
        );
        if !skipped.is_empty() {
            println!(
                "Skipped {} unreadable document(s): {}",
                skipped.len(),
                skipped.join(", "),
            );
        }

        Ok(ScreenSummary {
            f1: outcome.f1,
            screened: predictions.len(),
            skipped,
        })
    }
}

/// Every *.pdf directly inside `dir`, sorted by path so the
/// batch order (and therefore the output row order) is stable.
fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Cannot read input directory '{}'", dir.display()))?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    pdfs.sort();
    Ok(pdfs)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::tests::{StubEmbedder, StubExtractor};
    use std::io::Write;

    /// Manifest + empty placeholder PDFs on disk. The stub
    /// extractor never reads file contents, so touching the
    /// files is enough for the directory walk.
    fn setup(dir: &Path, batch_names: &[&str]) -> ScreenConfig {
        let manifest_path = dir.join("manifest.csv");
        let mut f = std::fs::File::create(&manifest_path).unwrap();
        writeln!(f, "paper_id,label").unwrap();
        for i in 0..12 {
            writeln!(f, "train_{i:02}.pdf,{}", usize::from(i >= 4)).unwrap();
        }

        let input_dir = dir.join("batch");
        std::fs::create_dir(&input_dir).unwrap();
        for name in batch_names {
            std::fs::File::create(input_dir.join(name)).unwrap();
        }

        ScreenConfig {
            train: TrainConfig {
                manifest:   manifest_path.to_string_lossy().into_owned(),
                papers_dir: dir.to_string_lossy().into_owned(),
                trees:      10,
                max_depth:  Some(8),
                ..TrainConfig::default()
            },
            input_dir: input_dir.to_string_lossy().into_owned(),
            output:    dir.join("results.csv").to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn test_batch_produces_one_row_per_valid_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), &["a.pdf", "b.pdf", "c.pdf", "notes.txt"]);
        let output = config.output.clone();

        let summary = ScreenUseCase::new(config)
            .execute_with(&StubExtractor, &StubEmbedder)
            .unwrap();

        // notes.txt is not a PDF; the three PDFs all screen
        assert_eq!(summary.screened, 3);
        assert!(summary.skipped.is_empty());

        let contents = std::fs::read_to_string(output).unwrap();
        assert_eq!(contents.lines().count(), 4); // header + 3 rows
        for line in contents.lines().skip(1) {
            let label = line.split(',').nth(1).unwrap();
            assert!(label == "0" || label == "1");
        }
    }

    #[test]
    fn test_unreadable_pdf_is_skipped_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), &["fine.pdf", "broken.pdf"]);
        let output = config.output.clone();

        let summary = ScreenUseCase::new(config)
            .execute_with(&StubExtractor, &StubEmbedder)
            .unwrap();

        assert_eq!(summary.screened, 1);
        assert_eq!(summary.skipped, vec!["broken.pdf".to_string()]);

        // The skipped document must not appear in the table
        let contents = std::fs::read_to_string(output).unwrap();
        assert!(!contents.contains("broken.pdf"));
        assert!(contents.contains("fine.pdf"));
    }
}
