// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `screen`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::screen_use_case::ScreenConfig;
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the publishability classifier and report its F1
    Train(TrainArgs),

    /// Train, then screen every PDF in a directory
    Screen(ScreenArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV manifest of labeled papers: paper_id,label
    #[arg(long, default_value = "data/manifest.csv")]
    pub manifest: String,

    /// Directory containing the manifest's PDF files
    #[arg(long, default_value = "data/papers")]
    pub papers_dir: String,

    /// Path to the sentence-embedding ONNX model
    #[arg(long, default_value = "models/all_minilm_l6_v2.onnx")]
    pub embedding_model: String,

    /// Path to the matching tokenizer.json
    #[arg(long, default_value = "models/tokenizer.json")]
    pub tokenizer: String,

    /// Output width of the embedding model
    #[arg(long, default_value_t = 384)]
    pub embedding_dim: usize,

    /// Token budget per document — longer texts are truncated
    #[arg(long, default_value_t = 256)]
    pub max_length: usize,

    /// Fraction of labeled papers used for training,
    /// the rest is held out for evaluation
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Number of trees in the bagged ensemble
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Depth cap per tree; omit to let trees grow out fully
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Seed for the split and the bootstrap sampling —
    /// the same seed reproduces the same model and F1
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            manifest:       a.manifest,
            papers_dir:     a.papers_dir,
            model_path:     a.embedding_model,
            tokenizer_path: a.tokenizer,
            embedding_dim:  a.embedding_dim,
            max_length:     a.max_length,
            train_fraction: a.train_fraction,
            trees:          a.trees,
            max_depth:      a.max_depth,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `screen` command
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Everything training needs — screening trains first
    #[command(flatten)]
    pub train: TrainArgs,

    /// Directory whose *.pdf files form the screening batch
    #[arg(long, default_value = "data/unlabeled")]
    pub input_dir: String,

    /// Where to write the results table (overwritten each run)
    #[arg(long, default_value = "results.csv")]
    pub output: String,
}

impl From<ScreenArgs> for ScreenConfig {
    fn from(a: ScreenArgs) -> Self {
        ScreenConfig {
            train:     a.train.into(),
            input_dir: a.input_dir,
            output:    a.output,
        }
    }
}
