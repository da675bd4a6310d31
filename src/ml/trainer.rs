// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on an AutodiffBackend for gradients
//   - model.valid() returns the model on the inner backend
//   - Validation batcher must also use the inner backend
//   - Validation measures both teacher-forced accuracy and
//     how often greedy decoding reproduces the whole label
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::PointerBatcher, dataset::PointerDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{exact_rows, pointer_hits, pointer_nll, PointerNetwork};

type MyBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: PointerDataset,
    val_dataset:   PointerDataset,
    ckpt_manager:  CheckpointManager,
    metrics:       MetricsLogger,
) -> Result<Option<EpochMetrics>> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop::<MyBackend>(cfg, train_dataset, val_dataset, &ckpt_manager, &metrics, device)
}

/// Runs every epoch and returns the metrics of the last one
/// (`None` when `cfg.epochs` is zero).
pub fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    train_dataset: PointerDataset,
    val_dataset:   PointerDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        B::Device,
) -> Result<Option<EpochMetrics>> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = cfg.model_config();
    let mut model: PointerNetwork<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: sequence_length={}, hidden_units={}",
        model_cfg.sequence_length, model_cfg.hidden_units,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-7);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = PointerBatcher::<B>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = PointerBatcher::<B::InnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut last          = None;
    let mut best_val_loss = f64::INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum  = 0.0f64;
        let mut train_batches   = 0usize;
        let mut train_hits      = 0usize;
        let mut train_positions = 0usize;

        for batch in train_loader.iter() {
            let [rows, steps] = batch.targets.dims();
            let output = model.forward_loss(batch.inputs, batch.shifted, batch.targets.clone());

            train_loss_sum  += output.loss.clone().into_scalar().elem::<f64>();
            train_batches   += 1;
            train_hits      += pointer_hits(output.distributions, batch.targets);
            train_positions += rows * steps;

            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = ratio(train_loss_sum, train_batches, f64::NAN);
        let train_acc  = ratio(train_hits as f64, train_positions, 0.0);

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut val_hits      = 0usize;
        let mut val_positions = 0usize;
        let mut sorted_rows   = 0usize;
        let mut total_rows    = 0usize;

        for batch in val_loader.iter() {
            let [rows, steps] = batch.targets.dims();

            let distributions = model_valid.forward_train(batch.inputs.clone(), batch.shifted);
            val_loss_sum  += pointer_nll(distributions.clone(), batch.targets.clone())
                .into_scalar()
                .elem::<f64>();
            val_batches   += 1;
            val_hits      += pointer_hits(distributions, batch.targets.clone());
            val_positions += rows * steps;

            // Greedy decoding never sees the label
            let greedy = model_valid.infer(batch.inputs, steps);
            sorted_rows += exact_rows(greedy.pointers(), batch.targets);
            total_rows  += rows;
        }

        let row = EpochMetrics::new(
            epoch,
            train_loss,
            ratio(val_loss_sum, val_batches, f64::NAN),
            train_acc,
            ratio(val_hits as f64, val_positions, 0.0),
            ratio(sorted_rows as f64, total_rows, 0.0),
        );

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | train_acc={:.1}% | val_acc={:.1}% | sorted={:.1}%",
            epoch, cfg.epochs, row.train_loss, row.val_loss,
            row.train_acc * 100.0, row.val_acc * 100.0, row.sorted_rate * 100.0,
        );

        metrics.log(&row)?;
        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);

        if row.is_improvement(best_val_loss) {
            tracing::info!("val_loss improved: {:.4} -> {:.4}", best_val_loss, row.val_loss);
            best_val_loss = row.val_loss;
        }
        last = Some(row);
    }

    tracing::info!("Training complete!");
    Ok(last)
}

fn ratio(sum: f64, count: usize, empty: f64) -> f64 {
    if count > 0 { sum / count as f64 } else { empty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synth::PermutationSynthesizer;
    use crate::domain::traits::SampleSource;
    use burn::backend::{Autodiff, NdArray};

    #[test]
    fn test_short_run_writes_checkpoint_and_metrics() {
        let dir = std::env::temp_dir().join(format!("pointer-sort-train-{}", std::process::id()));
        let cfg = TrainConfig {
            checkpoint_dir: dir.display().to_string(),
            sequence_length: 4,
            num_samples: 24,
            batch_size: 8,
            epochs: 2,
            lr: 1e-2,
            hidden_units: 8,
            train_fraction: 0.75,
            seed: 3,
        };

        let mut synth = PermutationSynthesizer::new(cfg.sequence_length, cfg.seed);
        let train = PointerDataset::new(synth.samples(18));
        let val   = PointerDataset::new(synth.samples(6));
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir).unwrap();
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();

        let last = train_loop::<Autodiff<NdArray>>(&cfg, train, val, &ckpt, &metrics, Default::default())
            .unwrap()
            .unwrap();

        assert_eq!(last.epoch, 2);
        assert!(last.train_loss.is_finite());
        assert!(last.val_loss.is_finite());
        assert!((0.0..=1.0).contains(&last.val_acc));
        assert!((0.0..=1.0).contains(&last.sorted_rate));

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(dir.join("latest_epoch.json").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
