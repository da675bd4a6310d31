use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::sample::SortSample;

/// One sample flattened to the three integer rows the batcher stacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerItem {
    pub input:   Vec<usize>,
    pub shifted: Vec<usize>,
    pub target:  Vec<usize>,
}

impl From<SortSample> for PointerItem {
    fn from(s: SortSample) -> Self {
        Self {
            input:   s.sequence,
            shifted: s.shifted,
            target:  s.label.indices().to_vec(),
        }
    }
}

pub struct PointerDataset {
    items: Vec<PointerItem>,
}

impl PointerDataset {
    pub fn new(samples: Vec<SortSample>) -> Self {
        Self { items: samples.into_iter().map(PointerItem::from).collect() }
    }
}

impl Dataset<PointerItem> for PointerDataset {
    fn get(&self, index: usize) -> Option<PointerItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synth::PermutationSynthesizer;
    use crate::domain::traits::SampleSource;

    #[test]
    fn test_item_keeps_rows() {
        let samples = PermutationSynthesizer::new(5, 3).samples(4);
        let first   = samples[0].clone();
        let dataset = PointerDataset::new(samples);

        assert_eq!(dataset.len(), 4);
        let item = dataset.get(0).unwrap();
        assert_eq!(item.input, first.sequence);
        assert_eq!(item.shifted, first.shifted);
        assert_eq!(item.target, first.label.indices());
        assert!(dataset.get(4).is_none());
    }
}
