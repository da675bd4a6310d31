// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::infra::checkpoint::CheckpointManager;
use crate::domain::pointer::PointerLabel;
use crate::ml::model::PointerNetwork;
use crate::ml::one_hot::token_id;

pub type InferBackend = burn::backend::Wgpu;

/// Greedy decoding result for one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Chosen input position per decode step
    pub pointers:   Vec<usize>,
    /// Input read in pointer order
    pub sorted:     Vec<usize>,
    /// Product of the chosen positions' probabilities
    pub confidence: f32,
}

pub struct Inferencer<B: Backend> {
    model:           PointerNetwork<B>,
    sequence_length: usize,
    device:          B::Device,
}

impl Inferencer<InferBackend> {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        Self::load(ckpt_manager, burn::backend::wgpu::WgpuDevice::default())
    }
}

impl<B: Backend> Inferencer<B> {
    pub fn load(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg   = ckpt_manager.load_config()?;
        let model = cfg.model_config().init::<B>(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self::new(model, cfg.sequence_length, device))
    }

    pub fn new(model: PointerNetwork<B>, sequence_length: usize, device: B::Device) -> Self {
        Self { model, sequence_length, device }
    }

    /// Greedily decode `steps` pointers into `sequence`.
    ///
    /// Lengths other than the trained one are accepted; the result is
    /// well-formed but has no accuracy guarantee.
    pub fn predict(&self, sequence: &[usize], steps: usize) -> Result<Prediction> {
        ensure!(!sequence.is_empty(), "Cannot sort an empty sequence");
        ensure!(steps > 0, "Decode step budget must be at least 1");

        if sequence.len() != self.sequence_length {
            tracing::warn!(
                "Input length {} differs from trained length {}; output is not reliable",
                sequence.len(),
                self.sequence_length,
            );
        }

        let flat: Vec<i32> = sequence.iter().map(|&x| token_id(x)).collect();
        let inputs = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([1, sequence.len()]);

        let output = self.model.infer(inputs, steps);

        let pointers: Vec<usize> = output
            .pointers()
            .into_data()
            .iter::<i64>()
            .map(|p| p as usize)
            .collect();
        let probs: Vec<f32> = output.distributions.into_data().iter::<f32>().collect();

        let confidence = probs
            .chunks(sequence.len())
            .zip(&pointers)
            .map(|(row, &p)| row[p])
            .product::<f32>();
        let label  = PointerLabel::from_indices(pointers);
        let sorted = label.apply(sequence);
        if !label.is_permutation() {
            tracing::debug!("Greedy pointers {:?} repeat a position", label.indices());
        }

        tracing::debug!("Pointers {:?} conf={:.4}", label.indices(), confidence);

        Ok(Prediction { pointers: label.indices().to_vec(), sorted, confidence })
    }
}
