// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Synthesize permutations + labels  (Layer 4 - data)
//   Step 2: Split train/validation            (Layer 4 - data)
//   Step 3: Build datasets                    (Layer 4 - data)
//   Step 4: Save config                       (Layer 6 - infra)
//   Step 5: Run training loop                 (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::PointerDataset,
    splitter::split_train_val,
    synth::PermutationSynthesizer,
};
use crate::domain::traits::SampleSource;
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::model::PointerNetworkConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub checkpoint_dir:  String,
    pub sequence_length: usize,
    pub num_samples:     usize,
    pub batch_size:      usize,
    pub epochs:          usize,
    pub lr:              f64,
    pub hidden_units:    usize,
    pub train_fraction:  f64,
    pub seed:            u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir:  "checkpoints".to_string(),
            sequence_length: 10,
            num_samples:     10_000,
            batch_size:      128,
            epochs:          4,
            lr:              1e-3,
            hidden_units:    512,
            train_fraction:  0.8,
            seed:            42,
        }
    }
}

impl TrainConfig {
    pub fn model_config(&self) -> PointerNetworkConfig {
        PointerNetworkConfig::new(self.sequence_length).with_hidden_units(self.hidden_units)
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        ensure!(cfg.sequence_length > 0, "sequence_length must be at least 1");
        ensure!(cfg.batch_size > 0, "batch_size must be at least 1");

        // ── Step 1: Synthesize samples ────────────────────────────────────────
        let mut source = PermutationSynthesizer::new(cfg.sequence_length, cfg.seed);
        let samples    = source.samples(cfg.num_samples);
        tracing::info!(
            "Built {} permutations of length {}",
            samples.len(),
            cfg.sequence_length,
        );

        // ── Step 2: Train / validation split ──────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed.wrapping_add(1));
        let (train_samples, val_samples) = split_train_val(samples, cfg.train_fraction, &mut rng);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );
        ensure!(!train_samples.is_empty(), "No training samples left after the split");

        // ── Step 3: Build Burn datasets ───────────────────────────────────────
        let train_dataset = PointerDataset::new(train_samples);
        let val_dataset   = PointerDataset::new(val_samples);

        // ── Step 4: Save config for inference ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir)?;
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        tracing::info!("Writing metrics to '{}'", metrics.csv_path().display());

        // ── Step 5: Run training loop (Layer 5) ───────────────────────────────
        if let Some(last) = run_training(cfg, train_dataset, val_dataset, ckpt_manager, metrics)? {
            tracing::info!(
                "Final epoch {}: val_acc={:.3}, sorted_rate={:.3}",
                last.epoch,
                last.val_acc,
                last.sorted_rate,
            );
        }

        Ok(())
    }
}
