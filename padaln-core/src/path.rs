//! Edit paths produced by the engine

use crate::error::{AlignError, AlignResult};
use std::fmt::Write;

/// Kind of column an edit operation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Target and query symbol aligned (equal or not)
    Match,
    /// Query symbol aligned against a gap in the target
    Insertion,
    /// Target symbol aligned against a gap in the query
    Deletion,
}

impl OpKind {
    pub fn cigar_char(self) -> char {
        match self {
            OpKind::Match => 'M',
            OpKind::Insertion => 'I',
            OpKind::Deletion => 'D',
        }
    }
}

/// One column of the alignment.
///
/// Indices are 0-based. For a gap column the index on the gapped side is
/// the number of symbols of that sequence consumed before the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditOp {
    pub kind: OpKind,
    pub target_index: usize,
    pub query_index: usize,
}

/// Bounded buffer of edit operations, written from the end of the
/// alignment back to its start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPath {
    ops: Vec<EditOp>,
    capacity: usize,
}

impl EditPath {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Append the next operation (walking backwards through the alignment)
    pub fn push(&mut self, op: EditOp) -> AlignResult<()> {
        if self.ops.len() >= self.capacity {
            return Err(AlignError::PathOverflow {
                capacity: self.capacity,
            });
        }
        self.ops.push(op);
        Ok(())
    }

    /// Operations in the order they were written (end to start)
    pub fn as_written(&self) -> &[EditOp] {
        &self.ops
    }

    /// Operations from the start of the alignment to its end
    pub fn iter_forward(&self) -> impl DoubleEndedIterator<Item = &EditOp> + ExactSizeIterator {
        self.ops.iter().rev()
    }

    /// Run-length encoded operations, start to end
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let mut run: Option<(OpKind, usize)> = None;

        for op in self.iter_forward() {
            run = match run {
                Some((kind, count)) if kind == op.kind => Some((kind, count + 1)),
                Some((kind, count)) => {
                    let _ = write!(cigar, "{}{}", count, kind.cigar_char());
                    Some((op.kind, 1))
                }
                None => Some((op.kind, 1)),
            };
        }
        if let Some((kind, count)) = run {
            let _ = write!(cigar, "{}{}", count, kind.cigar_char());
        }
        cigar
    }
}
