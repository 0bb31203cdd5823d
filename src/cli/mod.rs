// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`  — trains the classifier and reports its F1
//   2. `screen` — trains, then classifies a directory of PDFs
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ScreenArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "paper-triage",
    version = "0.1.0",
    about = "Screen research-paper PDFs for publishability with a trained tree ensemble."
)]
pub struct Cli {
    /// The subcommand to run (train or screen)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => Self::run_train(args),
            Commands::Screen(args) => Self::run_screen(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training from manifest: {}", args.manifest);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        let outcome  = use_case.execute()?;

        println!("\nTraining complete. Held-out F1 = {:.4}", outcome.f1);
        Ok(())
    }

    /// Handles the `screen` subcommand.
    /// Trains, screens the input directory, and reports the summary.
    fn run_screen(args: ScreenArgs) -> Result<()> {
        use crate::application::screen_use_case::ScreenUseCase;

        tracing::info!("Starting batch screening of: {}", args.input_dir);

        let use_case = ScreenUseCase::new(args.into());
        let summary  = use_case.execute()?;

        println!("Screening complete. {} document(s) classified.", summary.screened);
        Ok(())
    }
}
