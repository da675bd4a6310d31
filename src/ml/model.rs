// ============================================================
// Layer 5 — Pointer Network
// ============================================================
// Encoder + Decoder, exposed through two separate operations
// so the execution mode is always an explicit choice:
//
//   forward_train() — teacher forcing. The decoder sees the
//                     whole shifted ground-truth label at once.
//   infer()         — greedy autoregression. Each step's
//                     arg-max pointer is fed into the next step.
//
// Both return distributions laid out [batch, step, position]
// so every decode step is an L-way classification over the
// input positions.
//
// No length or vocabulary checks happen here. A sequence
// whose length differs from `sequence_length` still runs: it
// is one-hot encoded at the trained depth and attention simply
// spans however many positions it has.

use burn::prelude::*;

use crate::ml::decoder::Decoder;
use crate::ml::encoder::Encoder;

/// Probabilities are clamped here before taking the log.
const PROB_EPSILON: f32 = 1e-7;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct PointerNetworkConfig {
    /// Items per sequence (L). Tokens are drawn from [0, L).
    pub sequence_length: usize,
    /// Width of both LSTMs and the attention projections.
    #[config(default = 512)]
    pub hidden_units: usize,
}

impl PointerNetworkConfig {
    /// One-hot depth: every position index plus the start token.
    pub fn vocab_size(&self) -> usize {
        self.sequence_length + 1
    }

    /// Reserved decoder seed, one past the last valid position.
    pub fn start_token(&self) -> usize {
        self.sequence_length
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> PointerNetwork<B> {
        PointerNetwork {
            encoder:     Encoder::new(self, device),
            decoder:     Decoder::new(self, device),
            start_token: self.start_token(),
        }
    }
}

#[derive(Module, Debug)]
pub struct PointerNetwork<B: Backend> {
    pub encoder:     Encoder<B>,
    pub decoder:     Decoder<B>,
    pub start_token: usize,
}

pub struct PointerOutput<B: Backend> {
    pub loss:          Tensor<B, 1>,
    /// [batch, L, L]
    pub distributions: Tensor<B, 3>,
}

/// Result of greedy decoding. Owned by the caller; built fresh per call.
#[derive(Debug, Clone)]
pub struct PointerInference<B: Backend> {
    /// Per-step pointer distributions — [batch, steps, L]
    pub distributions: Tensor<B, 3>,
    /// Decoder input sequence — [batch, steps + 1]
    /// Column 0 is the start token, column i + 1 the arg-max of step i.
    pub feed: Tensor<B, 2, Int>,
}

impl<B: Backend> PointerInference<B> {
    /// Chosen positions — [batch, steps]
    pub fn pointers(&self) -> Tensor<B, 2, Int> {
        let [batch, width] = self.feed.dims();
        self.feed.clone().slice([0..batch, 1..width])
    }
}

impl<B: Backend> PointerNetwork<B> {
    /// inputs, shifted: [batch, L] → [batch, L, L]
    pub fn forward_train(
        &self,
        inputs:  Tensor<B, 2, Int>,
        shifted: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let encoded = self.encoder.forward(inputs);
        self.decoder.forward(shifted, encoded.states, encoded.last)
    }

    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2, Int>,
        shifted: Tensor<B, 2, Int>,
        targets: Tensor<B, 2, Int>,
    ) -> PointerOutput<B> {
        let distributions = self.forward_train(inputs, shifted);
        let loss = pointer_nll(distributions.clone(), targets);
        PointerOutput { loss, distributions }
    }

    /// Greedy decoding for exactly `steps` steps; there is no end token.
    ///
    /// The decoder state is carried from step to step, so each step
    /// costs one LSTM cell update and one attention pass.
    ///
    /// # Panics
    /// If `steps` is zero.
    pub fn infer(&self, inputs: Tensor<B, 2, Int>, steps: usize) -> PointerInference<B> {
        let [batch, _] = inputs.dims();
        let device     = inputs.device();

        let encoded   = self.encoder.forward(inputs);
        let mut state = encoded.last;
        let mut token = Tensor::<B, 2, Int>::full([batch, 1], self.start_token as i64, &device);

        let mut feed          = Vec::with_capacity(steps + 1);
        let mut distributions = Vec::with_capacity(steps);
        feed.push(token.clone());

        for step in 0..steps {
            let (pointer, next) = self.decoder.step(token, encoded.states.clone(), state);
            state = next;

            let [_, positions] = pointer.dims();
            token = pointer.clone().argmax(1);
            feed.push(token.clone());
            distributions.push(pointer.reshape([batch, 1, positions]));

            tracing::trace!("decode step {} of {}", step + 1, steps);
        }

        PointerInference {
            distributions: Tensor::cat(distributions, 1),
            feed:          Tensor::cat(feed, 1),
        }
    }
}

/// Mean negative log-likelihood of the target positions.
///
/// distributions: [batch, T, L] probabilities, targets: [batch, T]
pub fn pointer_nll<B: Backend>(distributions: Tensor<B, 3>, targets: Tensor<B, 2, Int>) -> Tensor<B, 1> {
    let [batch, steps, positions] = distributions.dims();
    let rows = batch * steps;

    distributions
        .reshape([rows, positions])
        .clamp_min(PROB_EPSILON)
        .log()
        .gather(1, targets.reshape([rows, 1]))
        .mean()
        .neg()
}

/// Number of decode positions whose arg-max equals the target.
pub fn pointer_hits<B: Backend>(distributions: Tensor<B, 3>, targets: Tensor<B, 2, Int>) -> usize {
    let [batch, steps, _] = distributions.dims();
    let hits: i64 = distributions
        .argmax(2)
        .reshape([batch, steps])
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    hits as usize
}

/// Number of sequences whose every pointer equals the target row.
pub fn exact_rows<B: Backend>(pointers: Tensor<B, 2, Int>, targets: Tensor<B, 2, Int>) -> usize {
    let [_, steps] = pointers.dims();
    let rows: i64 = pointers
        .equal(targets)
        .int()
        .sum_dim(1)
        .equal_elem(steps as i64)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    rows as usize
}
