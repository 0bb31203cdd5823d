// ============================================================
// Layer 6 — Labeled Manifest Loader
// ============================================================
// The training set is an external CSV manifest, not a literal
// baked into the binary:
//
//   paper_id,label
//   paper_01.pdf,1
//   paper_02.pdf,0
//   ...
//
// Each paper_id is resolved against the papers directory to
// produce the (path, label) pairs the dataset builder wants.
// Labels must be 0 or 1 — anything else is a data-entry error
// worth failing loudly on, not coercing.
//
// Reference: csv crate documentation
//            Rust Book §12 (Reading Files)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use crate::domain::document::LabeledPaper;

/// One row of the manifest file, as serde sees it.
#[derive(Debug, Deserialize)]
struct ManifestRecord {
    paper_id: String,
    label:    usize,
}

/// Read the manifest at `manifest_path` and resolve every
/// paper_id against `papers_dir`.
pub fn load_manifest(manifest_path: &Path, papers_dir: &Path) -> Result<Vec<LabeledPaper>> {
    let file = File::open(manifest_path)
        .with_context(|| format!("Cannot open manifest '{}'", manifest_path.display()))?;

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut papers = Vec::new();
    for (line, record) in reader.deserialize::<ManifestRecord>().enumerate() {
        let record = record
            .with_context(|| format!("Malformed manifest row {}", line + 2))?;

        if record.label > 1 {
            bail!(
                "Manifest row {} has label {} — labels must be 0 or 1",
                line + 2,
                record.label,
            );
        }

        papers.push(LabeledPaper::new(papers_dir.join(&record.paper_id), record.label));
    }

    if papers.is_empty() {
        bail!("Manifest '{}' contains no rows", manifest_path.display());
    }

    tracing::info!("Manifest loaded: {} labeled papers", papers.len());
    Ok(papers)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("manifest.csv");
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_and_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_manifest(
            dir.path(),
            "paper_id,label\na.pdf,1\nb.pdf,0\n",
        );

        let papers = load_manifest(&manifest, Path::new("corpus")).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].path, Path::new("corpus").join("a.pdf"));
        assert_eq!(papers[0].label, 1);
        assert_eq!(papers[1].label, 0);
    }

    #[test]
    fn test_rejects_out_of_range_label() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_manifest(dir.path(), "paper_id,label\na.pdf,3\n");
        assert!(load_manifest(&manifest, Path::new(".")).is_err());
    }

    #[test]
    fn test_rejects_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_manifest(dir.path(), "paper_id,label\n");
        assert!(load_manifest(&manifest, Path::new(".")).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_manifest(Path::new("nope/manifest.csv"), Path::new("."));
        assert!(result.is_err());
    }
}
