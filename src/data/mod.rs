// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between "nothing" and tensor batches. None of
// these modules know about the model; they only hand over
// plain values (Sequence, PointerLabel, shifted label).
//
//   PermutationSynthesizer → random permutation + argsort label
//       │
//       ▼
//   shift_right            → start token + label minus its tail
//       │
//       ▼
//   split_train_val        → shuffled train/validation sets
//       │
//       ▼
//   PointerDataset         → implements Burn's Dataset trait
//       │
//       ▼
//   PointerBatcher         → stacks samples into [N, L] tensors
//       │
//       ▼
//   DataLoader             → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Random permutations with their argsort labels
pub mod synth;

/// Right/left label shift for teacher forcing
pub mod shift;

/// Implements Burn's Dataset trait for sort samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
