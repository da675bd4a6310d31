use burn::{
    nn::{Initializer, Lstm, LstmConfig, LstmState},
    prelude::*,
};

use crate::ml::model::PointerNetworkConfig;
use crate::ml::one_hot::one_hot;

/// Single LSTM run left-to-right over one-hot tokens from a zero state.
#[derive(Module, Debug)]
pub struct Encoder<B: Backend> {
    lstm:       Lstm<B>,
    vocab_size: usize,
}

pub struct EncoderOutput<B: Backend> {
    /// One hidden vector per input position — [batch, L, units]
    pub states: Tensor<B, 3>,
    /// Terminal (cell, hidden) pair — each [batch, units]
    pub last: LstmState<B, 2>,
}

impl<B: Backend> Encoder<B> {
    pub fn new(config: &PointerNetworkConfig, device: &B::Device) -> Self {
        let lstm = LstmConfig::new(config.vocab_size(), config.hidden_units, true)
            .with_initializer(Initializer::XavierUniform { gain: 1.0 })
            .init(device);
        Self { lstm, vocab_size: config.vocab_size() }
    }

    /// tokens: [batch, L]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>) -> EncoderOutput<B> {
        let x = one_hot(tokens, self.vocab_size);
        let (states, last) = self.lstm.forward(x, None);
        EncoderOutput { states, last }
    }
}
