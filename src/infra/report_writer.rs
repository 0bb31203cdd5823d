// ============================================================
// Layer 6 — Results Writer
// ============================================================
// Persists the batch-screening verdicts as a CSV table:
//
//   paper_id,publishable,confidence
//   paper_01.pdf,1,0.8700
//   paper_02.pdf,0,0.2100
//
// The file is recreated on every run — the table is a report,
// not a log, so stale rows from a previous run must not
// survive.

use anyhow::{Context, Result};
use std::path::Path;

use crate::ml::predictor::Prediction;

/// Write all predictions to `path`, overwriting any previous
/// file. One row per successfully screened document.
pub fn write_results(path: &Path, predictions: &[Prediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create results file '{}'", path.display()))?;

    writer.write_record(["paper_id", "publishable", "confidence"])?;

    for p in predictions {
        writer.write_record([
            p.paper_id.clone(),
            p.label.to_string(),
            format!("{:.4}", p.confidence),
        ])?;
    }

    writer.flush().context("Cannot flush results file")?;
    tracing::info!("Wrote {} rows to '{}'", predictions.len(), path.display());
    Ok(())
}
