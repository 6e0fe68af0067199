//! Sizing of the edit path buffer

use crate::params::AlignmentParams;

/// Longest target the aligner expects to pair with a query of length `query_len`.
///
/// `((ql + 1) / 2 * match + gap_extend) / gap_extend + ql`, truncating.
/// `gap_extend` must be positive; run [`AlignmentParams::validate`] first.
/// Saturates at `usize::MAX`.
pub fn max_target_length(query_len: usize, params: &AlignmentParams) -> usize {
    let match_score = params.match_score.max(0) as usize;
    let gap_extend = params.gap_extend.max(1) as usize;
    let half = query_len.saturating_add(1) / 2;
    (half.saturating_mul(match_score).saturating_add(gap_extend) / gap_extend).saturating_add(query_len)
}

/// Number of path operations to allocate for a query of length `query_len`
pub fn path_capacity(query_len: usize, params: &AlignmentParams) -> usize {
    max_target_length(query_len, params).saturating_add(query_len)
}
