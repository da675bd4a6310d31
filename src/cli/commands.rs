// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `sort`, and all
// their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the pointer network on random permutations
    Train(TrainArgs),

    /// Sort a sequence using a trained checkpoint
    Sort(SortArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory to save model checkpoints, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Length of every training sequence; tokens are drawn from [0, L)
    #[arg(long, default_value_t = 10)]
    pub sequence_length: usize,

    /// Number of permutations to synthesize
    #[arg(long, default_value_t = 10_000)]
    pub num_samples: usize,

    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 4)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the encoder/decoder LSTMs and attention projections
    #[arg(long, default_value_t = 512)]
    pub hidden_units: usize,

    /// Share of samples used for training; the rest validates
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for permutation synthesis and shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            checkpoint_dir:  a.checkpoint_dir,
            sequence_length: a.sequence_length,
            num_samples:     a.num_samples,
            batch_size:      a.batch_size,
            epochs:          a.epochs,
            lr:              a.lr,
            hidden_units:    a.hidden_units,
            train_fraction:  a.train_fraction,
            seed:            a.seed,
        }
    }
}

/// All arguments for the `sort` command
#[derive(Args, Debug)]
pub struct SortArgs {
    /// Comma-separated tokens, e.g. 3,0,1,4
    #[arg(long, value_delimiter = ',', required = true)]
    pub input: Vec<usize>,

    /// Number of decode steps (defaults to the input length)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
