use crate::algorithm::{coalesce_blocks, Aligner, MatchingBlock};
use std::collections::HashMap;

/// Recursive longest-contiguous-match alignment
///
/// Finds the longest block common to both sequences, then recurses on the
/// pieces to its left and right. Every element takes part in matching: there
/// is no "popular element" cutoff, because proofread text repeats common
/// characters (particles, punctuation) legitimately and skipping them would
/// hide real edits.
pub struct LongestMatchAligner;

impl LongestMatchAligner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LongestMatchAligner {
    fn default() -> Self {
        Self::new()
    }
}

impl Aligner for LongestMatchAligner {
    fn matching_blocks(&self, original: &[char], revised: &[char]) -> Vec<MatchingBlock> {
        let index = RevisedIndex::new(revised);
        let mut blocks = Vec::new();
        let mut queue = vec![(0, original.len(), 0, revised.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let found = index.longest_match(original, alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }

            blocks.push(found);
            if alo < found.a && blo < found.b {
                queue.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                queue.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
        }

        let mut blocks = coalesce_blocks(blocks);
        blocks.push(MatchingBlock::new(original.len(), revised.len(), 0));
        blocks
    }

    fn name(&self) -> &str {
        "longest-match"
    }
}

/// Positions of every char in the revised sequence, ascending
struct RevisedIndex {
    positions: HashMap<char, Vec<usize>>,
}

impl RevisedIndex {
    fn new(revised: &[char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in revised.iter().enumerate() {
            positions.entry(*ch).or_default().push(j);
        }
        Self { positions }
    }

    /// Longest block of `original[alo..ahi]` that also occurs in
    /// `revised[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in the original, then earliest
    /// in the revision. Returns a zero-size block at `(alo, blo)` when nothing
    /// matches.
    fn longest_match(
        &self,
        original: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let mut best = MatchingBlock::new(alo, blo, 0);
        // j -> length of the match ending at (i - 1, j)
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();

        for (i, ch) in original.iter().enumerate().take(ahi).skip(alo) {
            let mut next_lengths: HashMap<usize, usize> = HashMap::new();

            if let Some(positions) = self.positions.get(ch) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_lengths.insert(j, k);

                    if k > best.size {
                        best = MatchingBlock::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }

            run_lengths = next_lengths;
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Opcode;
    use crate::diff::SpanKind;
    use pretty_assertions::assert_eq;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let original = chars("abab");
        let revised = chars("ab");
        let index = RevisedIndex::new(&revised);

        let found = index.longest_match(&original, 0, original.len(), 0, revised.len());
        assert_eq!(found, MatchingBlock::new(0, 0, 2));
    }

    #[test]
    fn test_matching_blocks_insertion() {
        let aligner = LongestMatchAligner::new();
        let blocks =
            aligner.matching_blocks(&chars("我昨天去公司"), &chars("我昨天去了公司"));

        assert_eq!(
            blocks,
            vec![
                MatchingBlock::new(0, 0, 4),
                MatchingBlock::new(4, 5, 2),
                MatchingBlock::new(6, 7, 0),
            ]
        );
    }

    #[test]
    fn test_repeated_characters_are_matched() {
        // Frequent particles must not be treated as junk.
        let original = chars("的的的的的的的的的的是的的的的的的的的的的");
        let revised = chars("的的的的的的的的的的在的的的的的的的的的的");

        let opcodes = LongestMatchAligner::new().opcodes(&original, &revised);
        assert_eq!(
            opcodes,
            vec![
                Opcode::new(SpanKind::Equal, 0..10, 0..10),
                Opcode::new(SpanKind::Replaced, 10..11, 10..11),
                Opcode::new(SpanKind::Equal, 11..21, 11..21),
            ]
        );
    }

    #[test]
    fn test_no_common_chars() {
        let opcodes = LongestMatchAligner::new().opcodes(&chars("abc"), &chars("xyz"));
        assert_eq!(opcodes, vec![Opcode::new(SpanKind::Replaced, 0..3, 0..3)]);
    }

    #[test]
    fn test_both_empty() {
        let blocks = LongestMatchAligner::new().matching_blocks(&[], &[]);
        assert_eq!(blocks, vec![MatchingBlock::new(0, 0, 0)]);
    }
}
