//! One-call global alignment of a sequence pair
//!
//! [`GlobalAligner`] runs the full pipeline: parameter setup, packing,
//! path allocation, the banded engine and padded rendering. Every buffer is
//! owned by the call and dropped on return.

use crate::alphabet::{Alphabet, DnaAlphabet};
use crate::band::path_capacity;
use crate::engine::align_global;
use crate::error::{AlignError, AlignResult};
use crate::pack::pack;
use crate::params::AlignmentParams;
use crate::path::EditPath;
use crate::render::{AlignmentStats, RenderedAlignment};
use std::io::{self, Write};

/// Result of aligning one target/query pair
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAlignment {
    /// Alignment score (higher is better)
    pub score: i32,
    /// Edit path as written by the engine (end to start)
    pub path: EditPath,
    pub rendered: RenderedAlignment,
}

impl GlobalAlignment {
    pub fn stats(&self) -> AlignmentStats {
        self.rendered.stats()
    }

    pub fn cigar(&self) -> String {
        self.path.cigar()
    }

    /// Write the padded blocks followed by the score line
    pub fn write_report<W: Write>(&self, out: &mut W, column_width: usize) -> io::Result<()> {
        self.rendered.write_blocks(out, column_width)?;
        writeln!(out, "Global alignment score: {}", self.score)
    }
}

/// Banded affine-gap global aligner for nucleotide sequences
#[derive(Debug, Clone)]
pub struct GlobalAligner<A: Alphabet = DnaAlphabet> {
    params: AlignmentParams,
    alphabet: A,
}

impl GlobalAligner<DnaAlphabet> {
    pub fn new(params: AlignmentParams) -> AlignResult<Self> {
        Self::with_alphabet(params, DnaAlphabet)
    }
}

impl<A: Alphabet> GlobalAligner<A> {
    /// The alphabet must rank symbols into the 5x5 nucleotide score matrix
    pub fn with_alphabet(params: AlignmentParams, alphabet: A) -> AlignResult<Self> {
        params.validate()?;
        if alphabet.size() > crate::params::ScoreMatrix::ROW {
            return Err(AlignError::InvalidParams(format!(
                "alphabet of {} symbols does not fit the score matrix",
                alphabet.size()
            )));
        }
        Ok(Self { params, alphabet })
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    /// Align `target` against `query` end to end
    pub fn align(&self, target: &[u8], query: &[u8]) -> AlignResult<GlobalAlignment> {
        let matrix = self.params.score_matrix();
        let gaps = self.params.gap_penalties();

        let packed_query = pack(&self.alphabet, query)?;
        let packed_target = pack(&self.alphabet, target)?;

        let capacity = path_capacity(query.len(), &self.params);
        log::debug!(
            "Aligning target of {} bp against query of {} bp (band {}, path capacity {})",
            target.len(),
            query.len(),
            gaps.band_width,
            capacity
        );

        let mut path = EditPath::with_capacity(capacity);
        let score = align_global(&packed_target, &packed_query, &matrix, &gaps, &mut path)
            .map_err(|err| {
                log::error!("Global alignment failed: {}", err);
                err
            })?;

        let rendered = RenderedAlignment::from_path(target, query, &path);
        log::debug!("Global alignment score {} over {} columns", score, path.len());

        Ok(GlobalAlignment {
            score,
            path,
            rendered,
        })
    }

    /// Align and write the padded blocks and score line to `out`
    pub fn write_alignment<W: Write>(
        &self,
        target: &[u8],
        query: &[u8],
        out: &mut W,
        column_width: usize,
    ) -> AlignResult<i32> {
        let alignment = self.align(target, query)?;
        alignment.write_report(out, column_width)?;
        Ok(alignment.score)
    }
}

/// Align `target` against `query` and print the result to standard output
pub fn print_global_alignment(
    target: &str,
    query: &str,
    params: &AlignmentParams,
) -> AlignResult<i32> {
    let aligner = GlobalAligner::new(*params)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    aligner.write_alignment(
        target.as_bytes(),
        query.as_bytes(),
        &mut out,
        crate::render::DEFAULT_COLUMN_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_params() -> AlignmentParams {
        AlignmentParams {
            match_score: 2,
            mismatch_penalty: 2,
            gap_open: 3,
            gap_extend: 1,
            bandwidth: 50,
        }
    }

    #[test]
    fn test_invalid_params_rejected_before_alignment() {
        let params = AlignmentParams { gap_extend: 0, ..Default::default() };
        assert!(matches!(GlobalAligner::new(params), Err(AlignError::InvalidParams(_))));
    }

    #[test]
    fn test_extreme_gap_open_rejected() {
        let params = AlignmentParams { gap_open: i32::MAX, ..scenario_params() };
        let err = GlobalAligner::new(params).unwrap_err();
        assert!(matches!(err, AlignError::InvalidParams(_)));
    }

    #[test]
    fn test_invalid_symbol_propagates() {
        let aligner = GlobalAligner::new(scenario_params()).unwrap();
        let err = aligner.align(b"ACGT", b"ACXT").unwrap_err();
        assert!(matches!(err, AlignError::InvalidSymbol { symbol: 'X', position: 2 }));
    }

    #[test]
    fn test_write_alignment_report() {
        let aligner = GlobalAligner::new(scenario_params()).unwrap();
        let mut out = Vec::new();
        let score = aligner.write_alignment(b"ACGT", b"ACT", &mut out, 60).unwrap();
        assert_eq!(score, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\tACGT\n2\tAC-T\nm\t|| |\n\nGlobal alignment score: 2\n"
        );
    }

    #[test]
    fn test_target_beyond_estimate_overflows() {
        // Query of 1 bp allows at most a 2 bp target under the defaults
        let aligner = GlobalAligner::new(AlignmentParams::default()).unwrap();
        let err = aligner.align(b"ACGTACGT", b"A").unwrap_err();
        assert!(matches!(err, AlignError::PathOverflow { capacity: 3 }));
    }

    #[test]
    fn test_summary_accessors() {
        let aligner = GlobalAligner::new(scenario_params()).unwrap();
        let alignment = aligner.align(b"ACGT", b"ACT").unwrap();
        assert_eq!(alignment.cigar(), "2M1D1M");
        let stats = alignment.stats();
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.deletions, 1);
        assert_eq!(aligner.params().gap_open, 3);
    }
}
