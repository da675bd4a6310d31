// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn model code. The domain and
// application layers never build tensors themselves.
//
// What's in this layer:
//
//   one_hot.rs    — token → indicator vector expansion
//
//   encoder.rs    — LSTM over the one-hot input sequence,
//                   returns every hidden state plus the
//                   terminal (cell, hidden) pair
//
//   attention.rs  — additive attention; its softmax weights
//                   are the pointer distribution
//
//   decoder.rs    — LSTM seeded with the encoder state that
//                   queries attention once per decode step
//
//   model.rs      — PointerNetwork: train (teacher forcing)
//                   and infer (greedy feedback) entry points
//
//   trainer.rs    — epoch loop, validation, checkpointing
//
//   inferencer.rs — loads a checkpoint and sorts one sequence
//
// Reference: Vinyals et al. (2015) Pointer Networks
//            Burn Book §3 (Building Blocks), §5 (Training)

pub mod one_hot;

pub mod encoder;

/// Additive attention pointer head
pub mod attention;

pub mod decoder;

/// Pointer network config and the two execution modes
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and predicts pointers
pub mod inferencer;
