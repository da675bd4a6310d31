// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against this trait so the
// training pipeline does not care where its samples come from.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::sample::SortSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled sort samples.
///
/// Implementations:
///   - PermutationSynthesizer → random permutations of [0, L)
pub trait SampleSource {
    /// Produce `count` samples.
    fn samples(&mut self, count: usize) -> Vec<SortSample>;
}

