use serde::{Deserialize, Serialize};

use crate::domain::pointer::PointerLabel;

/// One supervised example: a sequence, its argsort, and the
/// right-shifted argsort the decoder consumes under teacher forcing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSample {
    pub sequence: Vec<usize>,
    pub label:    PointerLabel,
    pub shifted:  Vec<usize>,
}

impl SortSample {
    pub fn sorted(&self) -> Vec<usize> {
        self.label.apply(&self.sequence)
    }
}
