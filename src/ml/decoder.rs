// ============================================================
// Layer 5 — Pointer Decoder
// ============================================================
// An LSTM seeded with the encoder's terminal (cell, hidden)
// pair. That seed is the only way encoder context enters the
// recurrent core; the per-position encoder states are read
// exclusively through attention.
//
// Two entry points:
//   forward() — the whole teacher-forced sequence in one call
//   step()    — one self-fed token, returning the next state
//
// Both emit, per decode position, a distribution over the L
// input positions.

use burn::{
    nn::{Initializer, Lstm, LstmConfig, LstmState},
    prelude::*,
};

use crate::ml::attention::AdditiveAttention;
use crate::ml::model::PointerNetworkConfig;
use crate::ml::one_hot::one_hot;

#[derive(Module, Debug)]
pub struct Decoder<B: Backend> {
    lstm:       Lstm<B>,
    attention:  AdditiveAttention<B>,
    vocab_size: usize,
}

impl<B: Backend> Decoder<B> {
    pub fn new(config: &PointerNetworkConfig, device: &B::Device) -> Self {
        let lstm = LstmConfig::new(config.vocab_size(), config.hidden_units, true)
            .with_initializer(Initializer::XavierUniform { gain: 1.0 })
            .init(device);
        let attention = AdditiveAttention::new(config, device);
        Self { lstm, attention, vocab_size: config.vocab_size() }
    }

    /// Teacher-forced decoding.
    ///
    /// shifted: [batch, T], encoder_states: [batch, L, units]
    /// → [batch, T, L], one pointer distribution per decode position.
    pub fn forward(
        &self,
        shifted:        Tensor<B, 2, Int>,
        encoder_states: Tensor<B, 3>,
        initial:        LstmState<B, 2>,
    ) -> Tensor<B, 3> {
        let x = one_hot(shifted, self.vocab_size);
        let (outputs, _) = self.lstm.forward(x, Some(initial));

        let [batch, steps, units] = outputs.dims();
        let [_, positions, _]     = encoder_states.dims();

        let pointers: Vec<Tensor<B, 3>> = (0..steps)
            .map(|t| {
                let query = outputs
                    .clone()
                    .slice([0..batch, t..t + 1, 0..units])
                    .reshape([batch, units]);
                self.attention
                    .forward(query, encoder_states.clone())
                    .weights
                    .reshape([batch, 1, positions])
            })
            .collect();

        Tensor::cat(pointers, 1)
    }

    /// One autoregressive step.
    ///
    /// token: [batch, 1] → ([batch, L] distribution, state after this step)
    pub fn step(
        &self,
        token:          Tensor<B, 2, Int>,
        encoder_states: Tensor<B, 3>,
        state:          LstmState<B, 2>,
    ) -> (Tensor<B, 2>, LstmState<B, 2>) {
        let x = one_hot(token, self.vocab_size);
        let (output, state) = self.lstm.forward(x, Some(state));

        let [batch, _, units] = output.dims();
        let alignment = self
            .attention
            .forward(output.reshape([batch, units]), encoder_states);

        (alignment.weights, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::encoder::Encoder;
    use burn::backend::NdArray;

    type B = NdArray;

    fn ints(values: &[i32], shape: [usize; 2]) -> Tensor<B, 2, Int> {
        Tensor::<B, 1, Int>::from_ints(values, &Default::default()).reshape(shape)
    }

    #[test]
    fn test_forward_emits_one_distribution_per_step() {
        let device  = Default::default();
        let config  = PointerNetworkConfig::new(4).with_hidden_units(8);
        let encoder = Encoder::<B>::new(&config, &device);
        let decoder = Decoder::<B>::new(&config, &device);

        let encoded = encoder.forward(ints(&[3, 0, 1, 2, 0, 1, 2, 3], [2, 4]));
        let out = decoder.forward(
            ints(&[4, 1, 2, 0, 4, 0, 1, 2], [2, 4]),
            encoded.states,
            encoded.last,
        );

        assert_eq!(out.dims(), [2, 4, 4]);
        let sums: Vec<f32> = out.sum_dim(2).into_data().iter::<f32>().collect();
        for s in sums {
            assert!((s - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_step_matches_first_teacher_forced_position() {
        let device  = Default::default();
        let config  = PointerNetworkConfig::new(5).with_hidden_units(8);
        let encoder = Encoder::<B>::new(&config, &device);
        let decoder = Decoder::<B>::new(&config, &device);

        let encoded = encoder.forward(ints(&[4, 2, 0, 3, 1], [1, 5]));
        let seed = || LstmState::new(encoded.last.cell.clone(), encoded.last.hidden.clone());

        let full = decoder.forward(ints(&[5, 2, 4, 1, 3], [1, 5]), encoded.states.clone(), seed());
        let (first, next) = decoder.step(ints(&[5], [1, 1]), encoded.states.clone(), seed());

        assert_eq!(first.dims(), [1, 5]);
        assert_eq!(next.hidden.dims(), [1, 8]);

        let expected: Vec<f32> = full.slice([0..1, 0..1, 0..5]).into_data().iter::<f32>().collect();
        let actual: Vec<f32>   = first.into_data().iter::<f32>().collect();
        for (a, e) in actual.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-5);
        }
    }
}
