//! Conversion of symbol sequences into dense rank arrays

use crate::alphabet::Alphabet;
use crate::error::{AlignError, AlignResult};

/// Pack a whole sequence into ranks
pub fn pack<A: Alphabet>(alphabet: &A, sequence: &[u8]) -> AlignResult<Vec<u8>> {
    pack_range(alphabet, sequence, 0, None)
}

/// Pack `length` symbols starting at `start`; `None` packs the remainder.
///
/// # Panics
///
/// Panics if `start + length` runs past the end of `sequence`.
pub fn pack_range<A: Alphabet>(
    alphabet: &A,
    sequence: &[u8],
    start: usize,
    length: Option<usize>,
) -> AlignResult<Vec<u8>> {
    let length = length.unwrap_or_else(|| sequence.len().saturating_sub(start));
    let end = start
        .checked_add(length)
        .filter(|&end| end <= sequence.len())
        .unwrap_or_else(|| {
            panic!(
                "pack range {}+{} exceeds sequence length {}",
                start,
                length,
                sequence.len()
            )
        });

    sequence[start..end]
        .iter()
        .enumerate()
        .map(|(offset, &symbol)| {
            alphabet.rank(symbol).ok_or(AlignError::InvalidSymbol {
                symbol: char::from(symbol),
                position: start + offset,
            })
        })
        .collect()
}

/// Map ranks back to canonical symbols; `None` if any rank is out of range
pub fn unpack<A: Alphabet>(alphabet: &A, ranks: &[u8]) -> Option<Vec<u8>> {
    ranks.iter().map(|&rank| alphabet.symbol(rank)).collect()
}
