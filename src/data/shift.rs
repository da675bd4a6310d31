// ============================================================
// Layer 4 — Label Shift Transform
// ============================================================
// Teacher forcing feeds the decoder the PREVIOUS ground-truth
// pointer at every step. The decoder input is therefore the
// label moved one slot to the right, with a start token in
// front and the final pointer dropped:
//
//   label:   [1, 2, 0, 3]
//   shifted: [S, 1, 2, 0]      S = start token = L
//
// The start token lies one past the valid index range so it
// can never be confused with a real position.

/// Prepend `start_token` and drop the last element.
/// Output length always equals input length.
pub fn shift_right(label: &[usize], start_token: usize) -> Vec<usize> {
    if label.is_empty() {
        return Vec::new();
    }
    let mut shifted = Vec::with_capacity(label.len());
    shifted.push(start_token);
    shifted.extend_from_slice(&label[..label.len() - 1]);
    shifted
}

/// Inverse of [`shift_right`]: drop the start token and append
/// the element that was dropped on the way in.
pub fn shift_left(shifted: &[usize], dropped: usize) -> Vec<usize> {
    if shifted.is_empty() {
        return Vec::new();
    }
    let mut label = Vec::with_capacity(shifted.len());
    label.extend_from_slice(&shifted[1..]);
    label.push(dropped);
    label
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_right_inserts_start_token() {
        let shifted = shift_right(&[1, 2, 0, 3], 4);
        assert_eq!(shifted, vec![4, 1, 2, 0]);
    }

    #[test]
    fn test_round_trip_restores_label() {
        let labels: [&[usize]; 4] = [&[0], &[1, 0], &[1, 2, 0, 3], &[4, 3, 2, 1, 0]];
        for label in labels {
            let start   = label.len();
            let shifted = shift_right(label, start);
            assert_eq!(shifted.len(), label.len());
            assert_eq!(shifted[0], start);
            let restored = shift_left(&shifted, *label.last().unwrap());
            assert_eq!(restored, label);
        }
    }

    #[test]
    fn test_empty_label() {
        assert!(shift_right(&[], 0).is_empty());
        assert!(shift_left(&[], 0).is_empty());
    }
}
