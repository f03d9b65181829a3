//! Sequence alignment
//!
//! A longest-match-first difference engine over arbitrary element sequences.
//! The same machinery serves three callers: word-level alignment for the
//! annotator, character-level alignment inside replaced word pairs, and the
//! matching-block count behind the similarity ratio.
//!
//! Matching follows the classic difference-engine recipe: find the longest
//! contiguous common run (earliest in both sequences on ties), then repeat on
//! the regions to its left and right. Edit-script opcodes derived from the
//! resulting blocks exactly partition both input ranges.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A contiguous run common to both sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    /// Start of the run on the canonical side
    pub canonical_start: usize,
    /// Start of the run on the user side
    pub user_start: usize,
    /// Run length (zero only for the terminating sentinel)
    pub len: usize,
}

/// Kind of one edit-script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    /// Ranges hold identical elements
    Equal,
    /// Canonical range was replaced by the user range
    Replace,
    /// Canonical range has no user counterpart
    Delete,
    /// User range has no canonical counterpart
    Insert,
}

/// One edit-script instruction over element ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignOp {
    pub kind: OpKind,
    /// Range on the canonical side
    pub canonical: Range<usize>,
    /// Range on the user side
    pub user: Range<usize>,
}

/// Difference engine over a canonical and a user sequence
pub struct SequenceAligner<'a, T: Eq + Hash> {
    canonical: &'a [T],
    user: &'a [T],
    /// Positions of each distinct element on the user side
    user_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceAligner<'a, T> {
    pub fn new(canonical: &'a [T], user: &'a [T]) -> Self {
        let mut user_index: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, item) in user.iter().enumerate() {
            user_index.entry(item).or_default().push(j);
        }

        Self {
            canonical,
            user,
            user_index,
        }
    }

    /// Longest contiguous matching run within the given windows.
    ///
    /// Ties go to the run starting earliest on the canonical side, then
    /// earliest on the user side.
    fn longest_match(
        &self,
        canon_lo: usize,
        canon_hi: usize,
        user_lo: usize,
        user_hi: usize,
    ) -> MatchBlock {
        let mut best = MatchBlock {
            canonical_start: canon_lo,
            user_start: user_lo,
            len: 0,
        };

        // run_lens[j] = length of the common run ending at (i, j)
        let mut run_lens: HashMap<usize, usize> = HashMap::new();

        for i in canon_lo..canon_hi {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();

            if let Some(positions) = self.user_index.get(&self.canonical[i]) {
                for &j in positions {
                    if j < user_lo {
                        continue;
                    }
                    if j >= user_hi {
                        break;
                    }

                    let prev = if j == 0 {
                        0
                    } else {
                        run_lens.get(&(j - 1)).copied().unwrap_or(0)
                    };
                    let len = prev + 1;
                    next_runs.insert(j, len);

                    if len > best.len {
                        best = MatchBlock {
                            canonical_start: i + 1 - len,
                            user_start: j + 1 - len,
                            len,
                        };
                    }
                }
            }

            run_lens = next_runs;
        }

        best
    }

    /// All matching blocks in order, terminated by a zero-length sentinel at
    /// the end of both sequences. Adjacent blocks are merged.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut pending = vec![(0, self.canonical.len(), 0, self.user.len())];
        let mut blocks = Vec::new();

        while let Some((canon_lo, canon_hi, user_lo, user_hi)) = pending.pop() {
            let block = self.longest_match(canon_lo, canon_hi, user_lo, user_hi);
            if block.len == 0 {
                continue;
            }

            if canon_lo < block.canonical_start && user_lo < block.user_start {
                pending.push((canon_lo, block.canonical_start, user_lo, block.user_start));
            }
            if block.canonical_start + block.len < canon_hi && block.user_start + block.len < user_hi
            {
                pending.push((
                    block.canonical_start + block.len,
                    canon_hi,
                    block.user_start + block.len,
                    user_hi,
                ));
            }

            blocks.push(block);
        }

        blocks.sort_by_key(|b| (b.canonical_start, b.user_start));

        let mut merged: Vec<MatchBlock> = Vec::new();
        for block in blocks {
            if let Some(last) = merged.last_mut() {
                if last.canonical_start + last.len == block.canonical_start
                    && last.user_start + last.len == block.user_start
                {
                    last.len += block.len;
                    continue;
                }
            }
            merged.push(block);
        }

        merged.push(MatchBlock {
            canonical_start: self.canonical.len(),
            user_start: self.user.len(),
            len: 0,
        });

        merged
    }

    /// Edit script covering both sequences completely, in order, with no gaps
    /// or overlaps.
    pub fn opcodes(&self) -> Vec<AlignOp> {
        let mut ops = Vec::new();
        let mut i = 0;
        let mut j = 0;

        for block in self.matching_blocks() {
            let kind = match (i < block.canonical_start, j < block.user_start) {
                (true, true) => Some(OpKind::Replace),
                (true, false) => Some(OpKind::Delete),
                (false, true) => Some(OpKind::Insert),
                (false, false) => None,
            };

            if let Some(kind) = kind {
                ops.push(AlignOp {
                    kind,
                    canonical: i..block.canonical_start,
                    user: j..block.user_start,
                });
            }

            i = block.canonical_start + block.len;
            j = block.user_start + block.len;

            if block.len > 0 {
                ops.push(AlignOp {
                    kind: OpKind::Equal,
                    canonical: block.canonical_start..i,
                    user: block.user_start..j,
                });
            }
        }

        ops
    }

    /// Similarity ratio `2·M / T` where `M` is the longest-common-subsequence
    /// length and `T` the sum of both sequence lengths. Symmetric in its
    /// arguments; two empty sequences are a perfect match by convention.
    pub fn ratio(&self) -> f64 {
        let total = self.canonical.len() + self.user.len();
        if total == 0 {
            return 1.0;
        }

        2.0 * self.lcs_length() as f64 / total as f64
    }

    fn lcs_length(&self) -> usize {
        let m = self.user.len();
        let mut prev = vec![0usize; m + 1];
        let mut row = vec![0usize; m + 1];

        for item in self.canonical {
            for (j, other) in self.user.iter().enumerate() {
                row[j + 1] = if item == other {
                    prev[j] + 1
                } else {
                    prev[j + 1].max(row[j])
                };
            }
            std::mem::swap(&mut prev, &mut row);
        }

        prev[m]
    }
}

/// Align two word sequences, producing the edit script over word positions.
pub fn align_words(canonical: &[String], user: &[String]) -> Vec<AlignOp> {
    SequenceAligner::new(canonical, user).opcodes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    /// Ranges must partition [0, canon_len) and [0, user_len) in order.
    fn assert_coverage(ops: &[AlignOp], canon_len: usize, user_len: usize) {
        let mut i = 0;
        let mut j = 0;
        for op in ops {
            assert_eq!(op.canonical.start, i);
            assert_eq!(op.user.start, j);
            i = op.canonical.end;
            j = op.user.end;
        }
        assert_eq!(i, canon_len);
        assert_eq!(j, user_len);
    }

    #[test]
    fn test_identical_sequences() {
        let a = words("for god so loved the world");
        let ops = align_words(&a, &a);

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OpKind::Equal);
        assert_coverage(&ops, a.len(), a.len());
    }

    #[test]
    fn test_single_replace() {
        let a = words("for god so loved the world");
        let b = words("for god so loves the world");
        let ops = align_words(&a, &b);

        let replaces: Vec<&AlignOp> = ops.iter().filter(|op| op.kind == OpKind::Replace).collect();
        assert_eq!(replaces.len(), 1);
        assert_eq!(replaces[0].canonical, 3..4);
        assert_eq!(replaces[0].user, 3..4);
        assert_coverage(&ops, a.len(), b.len());
    }

    #[test]
    fn test_omitted_word_is_delete() {
        let a = words("one two three");
        let b = words("one three");
        let ops = align_words(&a, &b);

        assert_eq!(
            ops.iter()
                .map(|op| op.kind)
                .collect::<Vec<_>>(),
            vec![OpKind::Equal, OpKind::Delete, OpKind::Equal]
        );
        assert_coverage(&ops, a.len(), b.len());
    }

    #[test]
    fn test_extra_word_is_insert() {
        let a = words("one two");
        let b = words("one two three");
        let ops = align_words(&a, &b);

        assert_eq!(ops.last().unwrap().kind, OpKind::Insert);
        assert_coverage(&ops, a.len(), b.len());
    }

    #[test]
    fn test_empty_sides() {
        let a = words("a b c");
        let none: Vec<String> = Vec::new();

        let deletes = align_words(&a, &none);
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].kind, OpKind::Delete);
        assert_eq!(deletes[0].canonical, 0..3);

        let inserts = align_words(&none, &a);
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].kind, OpKind::Insert);

        assert!(align_words(&none, &none).is_empty());
    }

    #[test]
    fn test_tie_break_prefers_earliest() {
        // "a" matches at canonical positions 0 and 2; the earliest wins
        let a = words("a b a");
        let b = words("a");
        let blocks = SequenceAligner::new(&a, &b).matching_blocks();

        assert_eq!(blocks[0].canonical_start, 0);
        assert_eq!(blocks[0].user_start, 0);
        assert_eq!(blocks[0].len, 1);
    }

    #[test]
    fn test_adjacent_blocks_merge() {
        let a: Vec<char> = "abcd".chars().collect();
        let b: Vec<char> = "abxcd".chars().collect();
        let blocks = SequenceAligner::new(&a, &b).matching_blocks();

        // "ab" and "cd" plus the sentinel; no fragmentation into single chars
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].len, 2);
        assert_eq!(blocks[1].len, 2);
        assert_eq!(blocks[2].len, 0);
    }

    #[test]
    fn test_ratio_bounds() {
        let a: Vec<char> = "In the beginning".chars().collect();
        let b: Vec<char> = "In the end".chars().collect();

        let ratio = SequenceAligner::new(&a, &b).ratio();
        assert!(ratio > 0.0 && ratio < 1.0);

        let same = SequenceAligner::new(&a, &a).ratio();
        assert!((same - 1.0).abs() < f64::EPSILON);

        let empty: Vec<char> = Vec::new();
        assert_eq!(SequenceAligner::new(&empty, &empty).ratio(), 1.0);
        assert_eq!(SequenceAligner::new(&a, &empty).ratio(), 0.0);
    }

    #[test]
    fn test_ratio_symmetric() {
        let a: Vec<char> = "abcabba".chars().collect();
        let b: Vec<char> = "cbabac".chars().collect();

        let forward = SequenceAligner::new(&a, &b).ratio();
        let backward = SequenceAligner::new(&b, &a).ratio();
        assert!((forward - backward).abs() < 1e-12);
    }
}
