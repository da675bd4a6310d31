// ============================================================
// Layer 3 — PointerLabel Domain Type
// ============================================================
// A pointer network does not emit tokens from a vocabulary.
// Each decode step points at a POSITION of the input instead.
//
// Example:
//   Sequence:     [3, 0, 1, 4]
//   PointerLabel: [1, 2, 0, 3]
//   Sequence indexed by the label → [0, 1, 3, 4] (sorted)
//
// Reference: Vinyals et al. (2015) Pointer Networks

use serde::{Deserialize, Serialize};

/// Positions into a sequence, listed in the order that sorts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerLabel {
    indices: Vec<usize>,
}

impl PointerLabel {
    /// Argsort of `sequence`. Ties keep their original order.
    pub fn from_sequence(sequence: &[usize]) -> Self {
        let mut indices: Vec<usize> = (0..sequence.len()).collect();
        indices.sort_by_key(|&i| sequence[i]);
        Self { indices }
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// True when every position in [0, len) appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.indices.len()];
        for &i in &self.indices {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Read `sequence` in label order. Out-of-range pointers are skipped.
    pub fn apply(&self, sequence: &[usize]) -> Vec<usize> {
        self.indices
            .iter()
            .filter_map(|&i| sequence.get(i).copied())
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argsort_of_reference_sequence() {
        let label = PointerLabel::from_sequence(&[3, 0, 1, 4]);
        assert_eq!(label.indices(), &[1, 2, 0, 3]);
        assert_eq!(label.apply(&[3, 0, 1, 4]), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_label_is_permutation() {
        let label = PointerLabel::from_sequence(&[5, 2, 9, 0, 7]);
        assert!(label.is_permutation());
        assert!(!PointerLabel::from_indices(vec![0, 0, 1]).is_permutation());
        assert!(!PointerLabel::from_indices(vec![0, 3]).is_permutation());
    }

    #[test]
    fn test_apply_skips_out_of_range() {
        let label = PointerLabel::from_indices(vec![2, 7, 0]);
        assert_eq!(label.apply(&[10, 20, 30]), vec![30, 10]);
    }

    #[test]
    fn test_empty_sequence() {
        let label = PointerLabel::from_sequence(&[]);
        assert!(label.indices().is_empty());
        assert!(label.is_permutation());
    }
}
