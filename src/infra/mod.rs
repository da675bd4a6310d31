// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns shared by training and inference:
//
//   checkpoint.rs — Saving and loading model weights
//                   Uses Burn's CompactRecorder to
//                   serialise model parameters to disk.
//                   Also saves/loads TrainConfig as JSON
//                   so inference can rebuild the model.
//
//   metrics.rs    — Training metrics logging
//                   Writes epoch-level loss, pointer
//                   accuracy and greedy sort rate to CSV.
//
// Reference: Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
