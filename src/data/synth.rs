// ============================================================
// Layer 4 — Permutation Synthesizer
// ============================================================
// Generates the training corpus: every sample is a random
// permutation of [0, L) together with its argsort label and
// the right-shifted label used for teacher forcing.
//
// The synthesizer is seeded so two runs with the same seed
// see the same data.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::shift::{shift_left, shift_right};
use crate::domain::{pointer::PointerLabel, sample::SortSample, traits::SampleSource};

pub struct PermutationSynthesizer {
    sequence_length: usize,
    start_token:     usize,
    rng:             StdRng,
}

impl PermutationSynthesizer {
    /// The start token is fixed at `sequence_length`, one past the
    /// last valid position.
    pub fn new(sequence_length: usize, seed: u64) -> Self {
        Self {
            sequence_length,
            start_token: sequence_length,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample(&mut self) -> SortSample {
        let mut sequence: Vec<usize> = (0..self.sequence_length).collect();
        sequence.shuffle(&mut self.rng);
        let label   = PointerLabel::from_sequence(&sequence);
        let shifted = shift_right(label.indices(), self.start_token);
        let sample  = SortSample { sequence, label, shifted };

        debug_assert!(sample.sorted().windows(2).all(|w| w[0] < w[1]));
        if let Some(&tail) = sample.label.indices().last() {
            debug_assert_eq!(shift_left(&sample.shifted, tail), sample.label.indices());
        }
        sample
    }
}

impl SampleSource for PermutationSynthesizer {
    fn samples(&mut self, count: usize) -> Vec<SortSample> {
        let samples: Vec<SortSample> = (0..count).map(|_| self.sample()).collect();
        tracing::debug!(
            "Synthesized {} permutations of length {}",
            samples.len(),
            self.sequence_length,
        );
        samples
    }
}
