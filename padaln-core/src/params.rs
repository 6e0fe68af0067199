//! Scoring parameters and the structures derived from them

use crate::alphabet::{DNA_ALPHABET_SIZE, AMBIGUITY_RANK};
use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};

/// Largest accepted magnitude for a score or penalty
pub const MAX_SCORE_VALUE: i32 = 1 << 16;

/// Tunable parameters for global alignment.
///
/// All values are magnitudes: the mismatch and gap values are subtracted
/// from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentParams {
    /// Score for a matching pair of bases
    pub match_score: i32,
    /// Penalty for a mismatching pair
    pub mismatch_penalty: i32,
    /// Penalty charged once when a gap opens
    pub gap_open: i32,
    /// Penalty charged per gap symbol
    pub gap_extend: i32,
    /// Maximum deviation from the main diagonal
    pub bandwidth: usize,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_penalty: 3,
            gap_open: 5,
            gap_extend: 2,
            bandwidth: 50,
        }
    }
}

impl AlignmentParams {
    /// Cheap gaps and expensive mismatches, for reads dominated by indel errors
    pub fn indel_tolerant() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: 5,
            gap_open: 2,
            gap_extend: 1,
            bandwidth: 50,
        }
    }

    pub fn validate(&self) -> AlignResult<()> {
        let fields = [
            ("match_score", self.match_score),
            ("mismatch_penalty", self.mismatch_penalty),
            ("gap_open", self.gap_open),
            ("gap_extend", self.gap_extend),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| *value < 0) {
            return Err(AlignError::InvalidParams(format!(
                "{} must be non-negative, got {}",
                name, value
            )));
        }
        if let Some((name, value)) = fields.iter().find(|(_, value)| *value > MAX_SCORE_VALUE) {
            return Err(AlignError::InvalidParams(format!(
                "{} must be at most {}, got {}",
                name, MAX_SCORE_VALUE, value
            )));
        }
        if self.gap_extend == 0 {
            return Err(AlignError::InvalidParams(
                "gap_extend must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Substitution matrix: `match_score` on the diagonal for the four bases,
    /// `-mismatch_penalty` everywhere else (including `N` against `N`)
    pub fn score_matrix(&self) -> ScoreMatrix {
        let mut cells = [-self.mismatch_penalty; DNA_ALPHABET_SIZE * DNA_ALPHABET_SIZE];
        for rank in 0..AMBIGUITY_RANK as usize {
            cells[rank * DNA_ALPHABET_SIZE + rank] = self.match_score;
        }
        ScoreMatrix { cells }
    }

    /// Gap descriptor; leading and trailing gaps open like internal ones and
    /// extend at the `end` rate, which is always the extend penalty
    pub fn gap_penalties(&self) -> GapPenalties {
        GapPenalties {
            open: self.gap_open,
            extend: self.gap_extend,
            end: self.gap_extend,
            band_width: self.bandwidth,
        }
    }
}

/// Square substitution matrix keyed by a pair of ranks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    cells: [i32; DNA_ALPHABET_SIZE * DNA_ALPHABET_SIZE],
}

impl ScoreMatrix {
    /// Number of ranks per row
    pub const ROW: usize = DNA_ALPHABET_SIZE;

    #[inline]
    pub fn score(&self, target_rank: u8, query_rank: u8) -> i32 {
        self.cells[target_rank as usize * Self::ROW + query_rank as usize]
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }
}

/// Gap penalties handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPenalties {
    pub open: i32,
    pub extend: i32,
    /// Per-symbol cost of leading and trailing gaps, charged after `open`
    pub end: i32,
    pub band_width: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(AlignmentParams::default().validate().is_ok());
        assert!(AlignmentParams::indel_tolerant().validate().is_ok());
    }

    #[test]
    fn test_zero_gap_extend_rejected() {
        let params = AlignmentParams { gap_extend: 0, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("gap_extend"));
    }

    #[test]
    fn test_negative_value_rejected() {
        let params = AlignmentParams { mismatch_penalty: -1, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("mismatch_penalty"));
    }

    #[test]
    fn test_oversized_value_rejected() {
        let params = AlignmentParams { gap_open: i32::MAX, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("gap_open"));

        let params = AlignmentParams { match_score: MAX_SCORE_VALUE, ..Default::default() };
        assert!(params.validate().is_ok());
        let params = AlignmentParams { match_score: MAX_SCORE_VALUE + 1, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_score_matrix_layout() {
        let params = AlignmentParams { match_score: 2, mismatch_penalty: 3, ..Default::default() };
        let matrix = params.score_matrix();

        for a in 0..5u8 {
            for b in 0..5u8 {
                let expected = if a == b && a < AMBIGUITY_RANK { 2 } else { -3 };
                assert_eq!(matrix.score(a, b), expected, "cell ({a}, {b})");
            }
        }
        assert_eq!(matrix.cells().len(), 25);
    }

    #[test]
    fn test_end_gap_follows_extend() {
        let params = AlignmentParams { gap_open: 7, gap_extend: 3, bandwidth: 12, ..Default::default() };
        let gaps = params.gap_penalties();
        assert_eq!(gaps.open, 7);
        assert_eq!(gaps.extend, 3);
        assert_eq!(gaps.end, 3);
        assert_eq!(gaps.band_width, 12);
    }
}
