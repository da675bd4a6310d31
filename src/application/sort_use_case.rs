// ============================================================
// Layer 2 — Sort Use Case
// ============================================================
// Loads the latest checkpoint and sorts one caller-supplied
// sequence by greedy pointer decoding. The step budget
// defaults to the sequence length.

use anyhow::Result;

use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::{InferBackend, Inferencer, Prediction};

pub struct SortUseCase {
    inferencer: Inferencer<InferBackend>,
}

impl SortUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let ckpt       = CheckpointManager::new(&checkpoint_dir)?;
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;
        Ok(Self { inferencer })
    }

    pub fn sort(&self, sequence: &[usize], steps: Option<usize>) -> Result<Prediction> {
        self.inferencer.predict(sequence, decode_steps(sequence, steps))
    }
}

/// One pointer per input element unless the caller asks otherwise.
fn decode_steps(sequence: &[usize], steps: Option<usize>) -> usize {
    steps.unwrap_or(sequence.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_default_to_sequence_length() {
        assert_eq!(decode_steps(&[4, 1, 3, 0, 2], None), 5);
        assert_eq!(decode_steps(&[7], None), 1);
    }

    #[test]
    fn test_explicit_steps_win() {
        assert_eq!(decode_steps(&[4, 1, 3, 0, 2], Some(3)), 3);
        assert_eq!(decode_steps(&[4, 1], Some(6)), 6);
    }

    #[test]
    fn test_missing_checkpoint_fails_to_load() {
        let dir = std::env::temp_dir().join(format!("pointer-sort-sort-{}", std::process::id()));
        assert!(SortUseCase::new(dir.display().to_string()).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
