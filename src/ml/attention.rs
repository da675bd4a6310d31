// ============================================================
// Layer 5 — Additive Attention (pointer head)
// ============================================================
// score_i = V(tanh(W1·query + W2·key_i))
// weights = softmax(score) over the L input positions
//
// In a pointer network the weights ARE the prediction: the
// decode step "points" at whichever position gets the most
// mass. The context vector is still computed so the layer is
// a complete attention block, but nothing downstream reads it.
//
// Reference: Bahdanau et al. (2015)
//            Vinyals et al. (2015) Pointer Networks

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation,
};

use crate::ml::model::PointerNetworkConfig;

#[derive(Module, Debug)]
pub struct AdditiveAttention<B: Backend> {
    /// Projects the decoder state
    w1: Linear<B>,
    /// Projects every encoder state
    w2: Linear<B>,
    /// Collapses the shared width to one score
    v:  Linear<B>,
}

pub struct Alignment<B: Backend> {
    /// Distribution over input positions — [batch, L]
    pub weights: Tensor<B, 2>,
    /// Weighted sum of encoder states — [batch, units]
    #[allow(dead_code)]
    pub context: Tensor<B, 2>,
}

impl<B: Backend> AdditiveAttention<B> {
    pub fn new(config: &PointerNetworkConfig, device: &B::Device) -> Self {
        let units = config.hidden_units;
        Self {
            w1: LinearConfig::new(units, units).init(device),
            w2: LinearConfig::new(units, units).init(device),
            v:  LinearConfig::new(units, 1).init(device),
        }
    }

    /// query: [batch, units], keys: [batch, L, units]
    pub fn forward(&self, query: Tensor<B, 2>, keys: Tensor<B, 3>) -> Alignment<B> {
        let [batch, positions, units] = keys.dims();

        let projected_query = self.w1.forward(query);
        let [_, width] = projected_query.dims();
        let projected_query = projected_query
            .reshape([batch, 1, width])
            .expand([batch, positions, width]);
        let projected_keys = self.w2.forward(keys.clone());

        // [batch, L, 1]
        let scores  = self.v.forward(activation::tanh(projected_query + projected_keys));
        let weights = activation::softmax(scores, 1);

        let context = (weights.clone().expand([batch, positions, units]) * keys)
            .sum_dim(1)
            .reshape([batch, units]);

        Alignment {
            weights: weights.reshape([batch, positions]),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type B = NdArray;

    #[test]
    fn test_weights_are_a_distribution() {
        let device    = Default::default();
        let config    = PointerNetworkConfig::new(7).with_hidden_units(12);
        let attention = AdditiveAttention::<B>::new(&config, &device);

        let query = Tensor::<B, 2>::random([3, 12], Distribution::Normal(0.0, 1.0), &device);
        let keys  = Tensor::<B, 3>::random([3, 7, 12], Distribution::Normal(0.0, 1.0), &device);
        let alignment = attention.forward(query, keys);

        assert_eq!(alignment.weights.dims(), [3, 7]);
        assert_eq!(alignment.context.dims(), [3, 12]);

        let weights: Vec<f32> = alignment.weights.into_data().iter::<f32>().collect();
        assert!(weights.iter().all(|&w| w >= 0.0));
        for row in weights.chunks(7) {
            let total: f32 = row.iter().sum();
            assert!((total - 1.0).abs() < 1e-5, "row sums to {total}");
        }
    }

    #[test]
    fn test_context_of_identical_keys_is_that_key() {
        let device    = Default::default();
        let config    = PointerNetworkConfig::new(3).with_hidden_units(4);
        let attention = AdditiveAttention::<B>::new(&config, &device);

        // Every position holds the same vector, so any convex
        // combination of them is that vector again.
        let key   = Tensor::<B, 1>::from_floats([0.5, -1.0, 2.0, 0.25], &device);
        let keys  = key.clone().reshape([1, 1, 4]).expand([1, 3, 4]);
        let query = Tensor::<B, 2>::ones([1, 4], &device);

        let alignment = attention.forward(query, keys);
        let context: Vec<f32> = alignment.context.into_data().iter::<f32>().collect();
        let expected: Vec<f32> = key.into_data().iter::<f32>().collect();
        for (c, e) in context.iter().zip(&expected) {
            assert!((c - e).abs() < 1e-5);
        }

        let weights: Vec<f32> = alignment.weights.into_data().iter::<f32>().collect();
        for w in weights {
            assert!((w - 1.0 / 3.0).abs() < 1e-5);
        }
    }
}
