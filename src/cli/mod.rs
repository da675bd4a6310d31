// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All work is delegated to Layer 2 (application).
//
//   1. `train` — trains the pointer network on permutations
//   2. `sort`  — loads a checkpoint and sorts one sequence
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, SortArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "pointer-sort",
    version = "0.1.0",
    about = "Train a pointer network to sort token sequences, then use it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Sort(args)  => Self::run_sort(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!(
            "Starting training: sequence_length={}, checkpoints in '{}'",
            args.sequence_length,
            args.checkpoint_dir,
        );

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_sort(args: SortArgs) -> Result<()> {
        use crate::application::sort_use_case::SortUseCase;

        let use_case   = SortUseCase::new(args.checkpoint_dir.clone())?;
        let prediction = use_case.sort(&args.input, args.steps)?;

        println!("\nPointers:   {:?}", prediction.pointers);
        println!("Sorted:     {:?}", prediction.sorted);
        println!("Confidence: {:.4}", prediction.confidence);
        Ok(())
    }
}
