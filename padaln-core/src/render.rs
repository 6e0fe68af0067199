//! Padded rendering of an edit path and block formatting

use crate::path::{EditPath, OpKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

pub const GAP_CHAR: char = '-';
pub const MATCH_MARKER: char = '|';
pub const MISMATCH_MARKER: char = ' ';
/// Stands in for a byte outside ASCII so every column stays one byte wide
pub const NON_ASCII_CHAR: char = '?';
pub const DEFAULT_COLUMN_WIDTH: usize = 60;

/// Target, query and marker lines of equal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedAlignment {
    pub target: String,
    pub query: String,
    pub markers: String,
}

/// Column counts of a rendered alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub insertions: u32,
    pub deletions: u32,
}

impl AlignmentStats {
    pub fn columns(&self) -> u32 {
        self.matches + self.mismatches + self.insertions + self.deletions
    }

    /// Percentage of columns carrying a match marker
    pub fn identity(&self) -> f64 {
        let total = self.columns();
        if total == 0 {
            return 0.0;
        }
        self.matches as f64 / total as f64 * 100.0
    }

    pub fn edit_distance(&self) -> u32 {
        self.mismatches + self.insertions + self.deletions
    }
}

impl RenderedAlignment {
    /// Render `path` against the unpacked sequences.
    ///
    /// The path is read from its last-written operation to its first, so
    /// column 0 is the start of both sequences. Symbols are compared as raw
    /// bytes: `a` against `A` is not a match. Bytes outside ASCII are drawn
    /// as [`NON_ASCII_CHAR`].
    pub fn from_path(target: &[u8], query: &[u8], path: &EditPath) -> Self {
        let len = path.len();
        let mut rendered = Self {
            target: String::with_capacity(len),
            query: String::with_capacity(len),
            markers: String::with_capacity(len),
        };

        for op in path.iter_forward() {
            let (t, q, m) = match op.kind {
                OpKind::Match => {
                    let t = target[op.target_index];
                    let q = query[op.query_index];
                    let marker = if t == q { MATCH_MARKER } else { MISMATCH_MARKER };
                    (column_char(t), column_char(q), marker)
                }
                OpKind::Insertion => (GAP_CHAR, column_char(query[op.query_index]), MISMATCH_MARKER),
                OpKind::Deletion => (column_char(target[op.target_index]), GAP_CHAR, MISMATCH_MARKER),
            };
            rendered.target.push(t);
            rendered.query.push(q);
            rendered.markers.push(m);
        }

        rendered
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn stats(&self) -> AlignmentStats {
        let mut stats = AlignmentStats::default();
        for ((t, q), m) in self.target.chars().zip(self.query.chars()).zip(self.markers.chars()) {
            if t == GAP_CHAR {
                stats.insertions += 1;
            } else if q == GAP_CHAR {
                stats.deletions += 1;
            } else if m == MATCH_MARKER {
                stats.matches += 1;
            } else {
                stats.mismatches += 1;
            }
        }
        stats
    }

    /// Slices of the three lines, `column_width` columns at a time.
    /// A width of 0 falls back to [`DEFAULT_COLUMN_WIDTH`].
    pub fn blocks(&self, column_width: usize) -> Blocks<'_> {
        Blocks {
            alignment: self,
            offset: 0,
            width: if column_width == 0 { DEFAULT_COLUMN_WIDTH } else { column_width },
        }
    }

    /// Blocks of `1\t`, `2\t` and `m\t` lines, each block followed by a
    /// blank line
    pub fn display_blocks(&self, column_width: usize) -> BlockDisplay<'_> {
        BlockDisplay {
            alignment: self,
            column_width,
        }
    }

    pub fn write_blocks<W: Write>(&self, out: &mut W, column_width: usize) -> io::Result<()> {
        write!(out, "{}", self.display_blocks(column_width))
    }
}

fn column_char(byte: u8) -> char {
    if byte.is_ascii() {
        char::from(byte)
    } else {
        NON_ASCII_CHAR
    }
}

impl fmt::Display for RenderedAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_blocks(DEFAULT_COLUMN_WIDTH), f)
    }
}

/// Block layout of a rendered alignment at a fixed width
pub struct BlockDisplay<'a> {
    alignment: &'a RenderedAlignment,
    column_width: usize,
}

impl fmt::Display for BlockDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in self.alignment.blocks(self.column_width) {
            writeln!(f, "1\t{}", block.target)?;
            writeln!(f, "2\t{}", block.query)?;
            writeln!(f, "m\t{}", block.markers)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One fixed-width slice of a rendered alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub target: &'a str,
    pub query: &'a str,
    pub markers: &'a str,
}

pub struct Blocks<'a> {
    alignment: &'a RenderedAlignment,
    offset: usize,
    width: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let alignment = self.alignment;
        let len = alignment.markers.len();
        if self.offset >= len {
            return None;
        }
        let end = self.offset.saturating_add(self.width).min(len);
        let range = self.offset..end;
        self.offset = end;

        // Lines are built one ASCII byte per column, so byte ranges line up
        Some(Block {
            target: &alignment.target[range.clone()],
            query: &alignment.query[range.clone()],
            markers: &alignment.markers[range],
        })
    }
}
