use burn::prelude::*;

/// Host token → tensor id. Values that do not fit in an i32 saturate
/// to `i32::MAX`, which lies outside every one-hot depth.
pub fn token_id(token: usize) -> i32 {
    i32::try_from(token).unwrap_or(i32::MAX)
}

/// Expand integer tokens [batch, len] into one-hot rows [batch, len, depth].
///
/// There is no learned embedding table: every token enters the
/// recurrent cells as an indicator vector. Tokens outside
/// [0, depth) produce an all-zero row instead of an error.
pub fn one_hot<B: Backend>(tokens: Tensor<B, 2, Int>, depth: usize) -> Tensor<B, 3> {
    let [batch, len] = tokens.dims();
    let classes = Tensor::<B, 1, Int>::arange(0..depth as i64, &tokens.device())
        .reshape([1, 1, depth])
        .expand([batch, len, depth]);

    tokens
        .reshape([batch, len, 1])
        .expand([batch, len, depth])
        .equal(classes)
        .float()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_one_hot_rows() {
        let device = Default::default();
        let tokens = Tensor::<B, 1, Int>::from_ints([2, 0, 3].as_slice(), &device).reshape([1, 3]);
        let encoded = one_hot(tokens, 4);
        assert_eq!(encoded.dims(), [1, 3, 4]);

        let values: Vec<f32> = encoded.into_data().iter::<f32>().collect();
        assert_eq!(values, vec![
            0.0, 0.0, 1.0, 0.0,
            1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
    }

    #[test]
    fn test_out_of_range_token_is_zero_row() {
        let device = Default::default();
        let tokens = Tensor::<B, 1, Int>::from_ints([7, 1].as_slice(), &device).reshape([1, 2]);
        let values: Vec<f32> = one_hot(tokens, 3).into_data().iter::<f32>().collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_oversized_token_is_zero_row_not_truncated() {
        let huge = u32::MAX as usize + 4;
        assert_eq!(token_id(3), 3);
        assert_eq!(token_id(huge), i32::MAX);

        let device = Default::default();
        let ids    = [token_id(huge), token_id(3)];
        let tokens = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &device).reshape([1, 2]);
        let values: Vec<f32> = one_hot(tokens, 4).into_data().iter::<f32>().collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
