//! Alignment algorithms
//!
//! Algorithms work on char sequences and produce an edit script of opcodes in
//! char indices. The engine converts opcodes into byte-ranged spans.
pub mod longest_match;

pub use longest_match::LongestMatchAligner;

use crate::diff::SpanKind;
use std::ops::Range;

/// One step of an edit script, in char indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: SpanKind,
    pub original: Range<usize>,
    pub revised: Range<usize>,
}

impl Opcode {
    pub fn new(kind: SpanKind, original: Range<usize>, revised: Range<usize>) -> Self {
        Self {
            kind,
            original,
            revised,
        }
    }
}

/// A contiguous run of equal elements: `original[a..a + size] == revised[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl MatchingBlock {
    pub fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }
}

/// Trait for alignment algorithms
pub trait Aligner: Send + Sync {
    /// Matching blocks in ascending order, terminated by a zero-size sentinel
    /// at `(original.len(), revised.len())`
    fn matching_blocks(&self, original: &[char], revised: &[char]) -> Vec<MatchingBlock>;

    /// Compute the edit script between two char sequences
    fn opcodes(&self, original: &[char], revised: &[char]) -> Vec<Opcode> {
        opcodes_from_blocks(&self.matching_blocks(original, revised))
    }

    /// Get the name of this algorithm
    fn name(&self) -> &str;
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Turn sorted matching blocks into an edit script.
///
/// A gap on both sides between two blocks becomes one `Replaced` opcode; a gap
/// on one side becomes `Deleted` or `Inserted`. Zero-length opcodes are never
/// produced.
pub fn opcodes_from_blocks(blocks: &[MatchingBlock]) -> Vec<Opcode> {
    let mut opcodes = Vec::new();
    let mut i = 0;
    let mut j = 0;

    for block in blocks {
        let kind = match (i < block.a, j < block.b) {
            (true, true) => Some(SpanKind::Replaced),
            (true, false) => Some(SpanKind::Deleted),
            (false, true) => Some(SpanKind::Inserted),
            (false, false) => None,
        };
        if let Some(kind) = kind {
            opcodes.push(Opcode::new(kind, i..block.a, j..block.b));
        }

        i = block.a + block.size;
        j = block.b + block.size;

        if block.size > 0 {
            opcodes.push(Opcode::new(SpanKind::Equal, block.a..i, block.b..j));
        }
    }

    opcodes
}

/// Merge blocks that touch on both sides into one.
fn coalesce_blocks(mut blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    blocks.sort();

    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                last.size += block.size;
            }
            _ => merged.push(block),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opcodes_from_blocks() {
        let blocks = vec![
            MatchingBlock::new(0, 0, 2),
            MatchingBlock::new(3, 2, 1),
            MatchingBlock::new(5, 5, 0),
        ];

        assert_eq!(
            opcodes_from_blocks(&blocks),
            vec![
                Opcode::new(SpanKind::Equal, 0..2, 0..2),
                Opcode::new(SpanKind::Deleted, 2..3, 2..2),
                Opcode::new(SpanKind::Equal, 3..4, 2..3),
                Opcode::new(SpanKind::Replaced, 4..5, 3..5),
            ]
        );
    }

    #[test]
    fn test_opcodes_sentinel_only() {
        let blocks = vec![MatchingBlock::new(0, 3, 0)];
        assert_eq!(
            opcodes_from_blocks(&blocks),
            vec![Opcode::new(SpanKind::Inserted, 0..0, 0..3)]
        );

        let blocks = vec![MatchingBlock::new(0, 0, 0)];
        assert!(opcodes_from_blocks(&blocks).is_empty());
    }

    #[test]
    fn test_coalesce_blocks() {
        let blocks = vec![
            MatchingBlock::new(4, 4, 2),
            MatchingBlock::new(0, 0, 2),
            MatchingBlock::new(2, 2, 2),
            MatchingBlock::new(7, 8, 1),
        ];
        assert_eq!(
            coalesce_blocks(blocks),
            vec![MatchingBlock::new(0, 0, 6), MatchingBlock::new(7, 8, 1)]
        );
    }
}
