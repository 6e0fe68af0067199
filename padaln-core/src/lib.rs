//! padaln core library
//!
//! Banded affine-gap global alignment of nucleotide sequences, with the
//! edit path rendered as padded target, query and match-marker lines.

pub mod alphabet;
pub mod error;
pub mod pack;
pub mod params;
pub mod band;
pub mod path;
pub mod engine;
pub mod render;
pub mod aligner;

// Re-export commonly used types and functions
pub use alphabet::{Alphabet, DnaAlphabet};
pub use error::{AlignError, AlignResult};
pub use params::{AlignmentParams, GapPenalties, ScoreMatrix, MAX_SCORE_VALUE};
pub use path::{EditOp, EditPath, OpKind};
pub use render::{AlignmentStats, RenderedAlignment, DEFAULT_COLUMN_WIDTH};
pub use aligner::{print_global_alignment, GlobalAligner, GlobalAlignment};

/// Version information for the padaln core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
