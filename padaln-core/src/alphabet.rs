//! Nucleotide alphabet used to pack sequences for scoring
//!
//! Ranks follow the classic 2-bit order with the ambiguity code appended:
//! A=0, C=1, G=2, T=3, N=4.

/// Number of ranks in the nucleotide alphabet (four bases plus `N`)
pub const DNA_ALPHABET_SIZE: usize = 5;

/// Symbols in rank order
pub const DNA_SYMBOLS: [u8; DNA_ALPHABET_SIZE] = *b"ACGTN";

/// Rank of the ambiguity symbol
pub const AMBIGUITY_RANK: u8 = 4;

/// Maps symbols to small integer ranks and back
pub trait Alphabet {
    /// Number of distinct ranks
    fn size(&self) -> usize;

    /// Rank of a symbol, or `None` if the symbol is not part of the alphabet
    fn rank(&self, symbol: u8) -> Option<u8>;

    /// Canonical symbol for a rank
    fn symbol(&self, rank: u8) -> Option<u8>;

    fn is_valid(&self, symbol: u8) -> bool {
        self.rank(symbol).is_some()
    }
}

/// Nucleotide alphabet: `ACGT` plus the `N` ambiguity code, case-insensitive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DnaAlphabet;

impl Alphabet for DnaAlphabet {
    fn size(&self) -> usize {
        DNA_ALPHABET_SIZE
    }

    fn rank(&self, symbol: u8) -> Option<u8> {
        match symbol.to_ascii_uppercase() {
            b'A' => Some(0),
            b'C' => Some(1),
            b'G' => Some(2),
            b'T' => Some(3),
            b'N' => Some(AMBIGUITY_RANK),
            _ => None,
        }
    }

    fn symbol(&self, rank: u8) -> Option<u8> {
        DNA_SYMBOLS.get(rank as usize).copied()
    }
}
