// ============================================================
// Layer 4 — Pointer Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<PointerItem>
// into integer tensors of shape [batch_size, L].
//
// All sequences in a batch share the same length L, so each
// row is flattened in order and reshaped:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::PointerItem;
use crate::ml::one_hot::token_id;

// ─── PointerBatch ─────────────────────────────────────────────────────────────
/// A batch of sort samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct PointerBatch<B: Backend> {
    /// Input token sequences — shape: [batch_size, L]
    pub inputs: Tensor<B, 2, Int>,

    /// Teacher-forcing decoder inputs — shape: [batch_size, L]
    /// Column 0 is always the start token
    pub shifted: Tensor<B, 2, Int>,

    /// Ground truth pointers — shape: [batch_size, L]
    pub targets: Tensor<B, 2, Int>,
}

// ─── PointerBatcher ───────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct PointerBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PointerBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn stack_rows<'a>(
        &self,
        rows:    impl Iterator<Item = &'a Vec<usize>>,
        batch:   usize,
        seq_len: usize,
    ) -> Tensor<B, 2, Int> {
        // Burn Int tensors are built from i32 and converted to the backend element
        let flat: Vec<i32> = rows
            .flat_map(|row| row.iter().map(|&x| token_id(x)))
            .collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch, seq_len])
    }
}

impl<B: Backend> Batcher<PointerItem, PointerBatch<B>> for PointerBatcher<B> {
    fn batch(&self, items: Vec<PointerItem>) -> PointerBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].input.len();

        let inputs  = self.stack_rows(items.iter().map(|i| &i.input),   batch_size, seq_len);
        let shifted = self.stack_rows(items.iter().map(|i| &i.shifted), batch_size, seq_len);
        let targets = self.stack_rows(items.iter().map(|i| &i.target),  batch_size, seq_len);

        PointerBatch { inputs, shifted, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_batch_shapes_and_rows() {
        let items = vec![
            PointerItem { input: vec![3, 0, 1, 4], shifted: vec![5, 1, 2, 0], target: vec![1, 2, 0, 3] },
            PointerItem { input: vec![0, 1, 2, 3], shifted: vec![5, 0, 1, 2], target: vec![0, 1, 2, 3] },
        ];
        let batcher = PointerBatcher::<B>::new(Default::default());
        let batch   = batcher.batch(items);

        assert_eq!(batch.inputs.dims(), [2, 4]);
        assert_eq!(batch.shifted.dims(), [2, 4]);
        assert_eq!(batch.targets.dims(), [2, 4]);

        let shifted: Vec<i64> = batch.shifted.into_data().iter::<i64>().collect();
        assert_eq!(shifted, vec![5, 1, 2, 0, 5, 0, 1, 2]);
        let targets: Vec<i64> = batch.targets.into_data().iter::<i64>().collect();
        assert_eq!(targets, vec![1, 2, 0, 3, 0, 1, 2, 3]);
    }
}
