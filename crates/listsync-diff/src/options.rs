//! Tuning knobs for a diff computation.

use serde::Deserialize;

/// Options controlling [`compute_diff`](crate::compute_diff).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Pair removed and inserted items of equal identity into moves.
    ///
    /// Costs extra identity checks proportional to the number of unmatched
    /// items on each side.
    pub detect_moves: bool,
    /// Reject inputs where either sequence is longer than this.
    pub max_len: Option<usize>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable move detection.
    pub fn detect_moves(mut self, detect_moves: bool) -> Self {
        self.detect_moves = detect_moves;
        self
    }

    /// Cap the accepted sequence length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let opts = DiffOptions::default();
        assert!(!opts.detect_moves);
        assert_eq!(opts.max_len, None);
    }

    #[test]
    fn builder_sets_fields() {
        let opts = DiffOptions::new().detect_moves(true).max_len(10);
        assert!(opts.detect_moves);
        assert_eq!(opts.max_len, Some(10));
    }
}
