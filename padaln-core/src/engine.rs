//! Banded affine-gap global alignment (Gotoh's recurrence)
//!
//! Three score layers are kept per cell: `diag` for alignments ending in a
//! target/query pair, `del` for alignments ending in a target symbol against
//! a gap, and `ins` for alignments ending in a query symbol against a gap.
//! Only cells with `|i - j| <= w` are stored, so memory and time are
//! `O(target_len * w)`.
//!
//! Internal gaps of length `k` cost `open + k * extend`. Gaps touching either
//! end of the matrix (row 0, column 0, last row, last column) cost
//! `open + k * end`. Score arithmetic saturates, so extreme penalties
//! degrade the score instead of wrapping.

use crate::error::AlignResult;
use crate::params::{GapPenalties, ScoreMatrix};
use crate::path::{EditOp, EditPath, OpKind};
use std::cmp::min;
use std::ops::RangeInclusive;

/// Score of an unreachable cell
const NEG_INF: i32 = i32::MIN / 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Diag = 0,
    Del = 1,
    Ins = 2,
}

impl Layer {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Layer::Diag,
            1 => Layer::Del,
            _ => Layer::Ins,
        }
    }
}

// Trace byte layout: bits 0-1 hold the predecessor layer of `diag`,
// bits 2-3 that of `del`, bits 4-5 that of `ins`.
const DEL_SHIFT: u8 = 2;
const INS_SHIFT: u8 = 4;

/// First maximum wins, so ties resolve diagonal, deletion, insertion
fn best_of(candidates: [(i32, Layer); 3]) -> (i32, Layer) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    best
}

struct BandedMatrix {
    band: usize,
    stride: usize,
    cols: usize,
    diag: Vec<i32>,
    del: Vec<i32>,
    ins: Vec<i32>,
    trace: Vec<u8>,
}

impl BandedMatrix {
    fn new(rows: usize, cols: usize, band: usize) -> Self {
        let stride = 2 * band + 1;
        let cells = (rows + 1) * stride;
        Self {
            band,
            stride,
            cols,
            diag: vec![NEG_INF; cells],
            del: vec![NEG_INF; cells],
            ins: vec![NEG_INF; cells],
            trace: vec![0; cells],
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        if j > self.cols || j + self.band < i || j > i + self.band {
            None
        } else {
            Some(i * self.stride + j + self.band - i)
        }
    }

    fn columns(&self, i: usize) -> RangeInclusive<usize> {
        i.saturating_sub(self.band)..=min(self.cols, i + self.band)
    }

    #[inline]
    fn scores(&self, i: usize, j: usize) -> (i32, i32, i32) {
        match self.index(i, j) {
            Some(k) => (self.diag[k], self.del[k], self.ins[k]),
            None => (NEG_INF, NEG_INF, NEG_INF),
        }
    }

    #[inline]
    fn trace(&self, i: usize, j: usize) -> u8 {
        self.index(i, j).map_or(0, |k| self.trace[k])
    }

    fn store(&mut self, i: usize, j: usize, scores: (i32, i32, i32), trace: u8) {
        if let Some(k) = self.index(i, j) {
            self.diag[k] = scores.0;
            self.del[k] = scores.1;
            self.ins[k] = scores.2;
            self.trace[k] = trace;
        }
    }
}

/// Effective band: wide enough that the terminal cell is reachable, never
/// wider than the longer sequence.
pub fn effective_band(target_len: usize, query_len: usize, band_width: usize) -> usize {
    band_width
        .max(target_len.abs_diff(query_len))
        .min(target_len.max(query_len))
}

/// Align two packed sequences end to end.
///
/// `path` is cleared and refilled from the end of the alignment back to its
/// start; every target and query position appears in exactly one operation.
/// Returns the alignment score, or `PathOverflow` if `path` is too small.
pub fn align_global(
    target: &[u8],
    query: &[u8],
    matrix: &ScoreMatrix,
    gaps: &GapPenalties,
    path: &mut EditPath,
) -> AlignResult<i32> {
    path.clear();

    let (tl, ql) = (target.len(), query.len());
    let band = effective_band(tl, ql, gaps.band_width);
    let mut dp = BandedMatrix::new(tl, ql, band);

    let open = gaps.open.saturating_add(gaps.extend);
    let extend = gaps.extend;
    let end_open = gaps.open.saturating_add(gaps.end);
    let end = gaps.end;

    dp.store(0, 0, (0, NEG_INF, NEG_INF), 0);

    for i in 0..=tl {
        for j in dp.columns(i) {
            if i == 0 && j == 0 {
                continue;
            }
            let mut trace = 0u8;

            let diag = if i > 0 && j > 0 {
                let (m, x, y) = dp.scores(i - 1, j - 1);
                let (best, from) = best_of([(m, Layer::Diag), (x, Layer::Del), (y, Layer::Ins)]);
                trace |= from as u8;
                best.saturating_add(matrix.score(target[i - 1], query[j - 1])).max(NEG_INF)
            } else {
                NEG_INF
            };

            let del = if i > 0 {
                let (m, x, y) = dp.scores(i - 1, j);
                let (open_cost, extend_cost) = if j == 0 || j == ql {
                    (end_open, end)
                } else {
                    (open, extend)
                };
                let (best, from) = best_of([
                    (m.saturating_sub(open_cost), Layer::Diag),
                    (x.saturating_sub(extend_cost), Layer::Del),
                    (y.saturating_sub(open_cost), Layer::Ins),
                ]);
                trace |= (from as u8) << DEL_SHIFT;
                best.max(NEG_INF)
            } else {
                NEG_INF
            };

            let ins = if j > 0 {
                let (m, x, y) = dp.scores(i, j - 1);
                let (open_cost, extend_cost) = if i == 0 || i == tl {
                    (end_open, end)
                } else {
                    (open, extend)
                };
                let (best, from) = best_of([
                    (m.saturating_sub(open_cost), Layer::Diag),
                    (x.saturating_sub(open_cost), Layer::Del),
                    (y.saturating_sub(extend_cost), Layer::Ins),
                ]);
                trace |= (from as u8) << INS_SHIFT;
                best.max(NEG_INF)
            } else {
                NEG_INF
            };

            dp.store(i, j, (diag, del, ins), trace);
        }
    }

    let (m, x, y) = dp.scores(tl, ql);
    let (score, mut layer) = best_of([(m, Layer::Diag), (x, Layer::Del), (y, Layer::Ins)]);

    let (mut i, mut j) = (tl, ql);
    while i > 0 || j > 0 {
        // Only one move is left on the first row or column
        if i == 0 {
            layer = Layer::Ins;
        } else if j == 0 {
            layer = Layer::Del;
        }
        let trace = dp.trace(i, j);
        let (kind, next) = match layer {
            Layer::Diag => {
                i -= 1;
                j -= 1;
                (OpKind::Match, Layer::from_bits(trace))
            }
            Layer::Del => {
                i -= 1;
                (OpKind::Deletion, Layer::from_bits(trace >> DEL_SHIFT))
            }
            Layer::Ins => {
                j -= 1;
                (OpKind::Insertion, Layer::from_bits(trace >> INS_SHIFT))
            }
        };
        path.push(EditOp {
            kind,
            target_index: i,
            query_index: j,
        })?;
        layer = next;
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::DnaAlphabet;
    use crate::pack::pack;
    use crate::params::AlignmentParams;

    fn run(target: &[u8], query: &[u8], params: &AlignmentParams) -> (i32, EditPath) {
        let t = pack(&DnaAlphabet, target).unwrap();
        let q = pack(&DnaAlphabet, query).unwrap();
        let mut path = EditPath::with_capacity(target.len() + query.len());
        let score = align_global(&t, &q, &params.score_matrix(), &params.gap_penalties(), &mut path).unwrap();
        (score, path)
    }

    fn scenario_params() -> AlignmentParams {
        AlignmentParams {
            match_score: 2,
            mismatch_penalty: 2,
            gap_open: 3,
            gap_extend: 1,
            bandwidth: 50,
        }
    }

    fn forward_kinds(path: &EditPath) -> Vec<OpKind> {
        path.iter_forward().map(|op| op.kind).collect()
    }

    #[test]
    fn test_identical_sequences() {
        let (score, path) = run(b"ACGT", b"ACGT", &scenario_params());
        assert_eq!(score, 8);
        assert_eq!(forward_kinds(&path), vec![OpKind::Match; 4]);
    }

    #[test]
    fn test_internal_deletion() {
        let (score, path) = run(b"ACGT", b"ACT", &scenario_params());
        // 3 matches (6) minus one internal gap (3 + 1)
        assert_eq!(score, 2);
        assert_eq!(
            forward_kinds(&path),
            vec![OpKind::Match, OpKind::Match, OpKind::Deletion, OpKind::Match]
        );
        let deletion = path.iter_forward().nth(2).unwrap();
        assert_eq!(deletion.target_index, 2);
        assert_eq!(deletion.query_index, 2);
    }

    #[test]
    fn test_internal_insertion() {
        let (score, path) = run(b"ACT", b"ACGT", &scenario_params());
        assert_eq!(score, 2);
        assert_eq!(
            forward_kinds(&path),
            vec![OpKind::Match, OpKind::Match, OpKind::Insertion, OpKind::Match]
        );
    }

    #[test]
    fn test_terminal_gap_costs_like_internal_gap() {
        // Trailing gap: 4 matches (8) minus one gap (3 + 1)
        let (score, path) = run(b"ACGTA", b"ACGT", &scenario_params());
        assert_eq!(score, 4);
        assert_eq!(path.iter_forward().last().unwrap().kind, OpKind::Deletion);

        // Leading gap is charged the same way
        let (score, path) = run(b"AACGT", b"ACGT", &scenario_params());
        assert_eq!(score, 4);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_mismatches_preferred_over_end_gaps() {
        // Four mismatches (-8) beat a leading and a trailing gap of four (-7 each)
        let (score, path) = run(b"AAAA", b"CCCC", &scenario_params());
        assert_eq!(score, -8);
        assert_eq!(path.cigar(), "4M");
    }

    #[test]
    fn test_long_gap_opens_once() {
        // 6 matches (12) minus one gap of three (3 + 3 * 1)
        let (score, path) = run(b"ACGTTTACG", b"ACGACG", &scenario_params());
        assert_eq!(score, 6);
        assert_eq!(path.cigar(), "3M3D3M");

        let (score, path) = run(b"ACGACG", b"ACGTTACG", &scenario_params());
        assert_eq!(score, 12 - (3 + 2));
        assert_eq!(path.cigar(), "3M2I3M");
    }

    #[test]
    fn test_extreme_penalties_do_not_wrap() {
        let params = AlignmentParams {
            match_score: i32::MAX,
            mismatch_penalty: i32::MAX,
            gap_open: i32::MAX,
            gap_extend: i32::MAX,
            bandwidth: 2,
        };
        let (_, path) = run(b"ACGTACGT", b"ACGACGT", &params);
        let consumed_target = path.iter_forward().filter(|op| op.kind != OpKind::Insertion).count();
        let consumed_query = path.iter_forward().filter(|op| op.kind != OpKind::Deletion).count();
        assert_eq!(consumed_target, 8);
        assert_eq!(consumed_query, 7);
    }

    #[test]
    fn test_mismatch_column() {
        let (score, path) = run(b"ACGT", b"AGGT", &scenario_params());
        assert_eq!(score, 4);
        assert_eq!(forward_kinds(&path), vec![OpKind::Match; 4]);
    }

    #[test]
    fn test_empty_inputs() {
        let params = scenario_params();
        let (score, path) = run(b"", b"", &params);
        assert_eq!(score, 0);
        assert!(path.is_empty());

        let (score, path) = run(b"ACG", b"", &params);
        assert_eq!(score, -(3 + 3));
        assert_eq!(forward_kinds(&path), vec![OpKind::Deletion; 3]);

        let (score, path) = run(b"", b"AC", &params);
        assert_eq!(score, -(3 + 2));
        assert_eq!(forward_kinds(&path), vec![OpKind::Insertion; 2]);
    }

    #[test]
    fn test_narrow_band_still_reaches_corner() {
        let params = AlignmentParams { bandwidth: 0, ..scenario_params() };
        let (_, path) = run(b"ACGTACGT", b"ACG", &params);
        let consumed_target = path.iter_forward().filter(|op| op.kind != OpKind::Insertion).count();
        let consumed_query = path.iter_forward().filter(|op| op.kind != OpKind::Deletion).count();
        assert_eq!(consumed_target, 8);
        assert_eq!(consumed_query, 3);
    }

    #[test]
    fn test_path_overflow_is_reported() {
        let params = scenario_params();
        let t = pack(&DnaAlphabet, b"ACGTACGT").unwrap();
        let q = pack(&DnaAlphabet, b"ACGTACGT").unwrap();
        let mut path = EditPath::with_capacity(4);
        let result = align_global(&t, &q, &params.score_matrix(), &params.gap_penalties(), &mut path);
        assert!(matches!(result, Err(crate::AlignError::PathOverflow { capacity: 4 })));
    }

    #[test]
    fn test_effective_band() {
        assert_eq!(effective_band(10, 10, 50), 10);
        assert_eq!(effective_band(100, 100, 5), 5);
        assert_eq!(effective_band(100, 80, 5), 20);
        assert_eq!(effective_band(0, 0, 5), 0);
    }
}
