//! # Sequence Ratio
//!
//! Ratcliff/Obershelp "gestalt pattern matching": find the longest common
//! contiguous block, recurse on the unmatched pieces to its left and right,
//! and score `2 * matched / (len(a) + len(b))`.
//!
//! Strings are compared as sequences of Unicode scalar values. The second
//! sequence is indexed once into an [`IndexedSequence`] and can be reused
//! against any number of first sequences; for second sequences of
//! [`AUTOJUNK_MIN_LEN`] or more characters, characters that occur in more
//! than 1% of positions are not used to seed matches.

use std::borrow::Cow;
use std::collections::HashMap;

/// Minimum length of the second sequence before popular characters are
/// excluded from match seeding.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// A maximal run where `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// The second sequence of a comparison, indexed for repeated matching.
#[derive(Debug, Clone)]
pub struct IndexedSequence {
    chars: Vec<char>,
    /// Positions of every non-popular character, ascending.
    b2j: HashMap<char, Vec<usize>>,
    /// Occurrences of every character, popular ones included.
    counts: HashMap<char, usize>,
}

impl IndexedSequence {
    #[must_use]
    pub fn new(b: &str) -> Self {
        let chars: Vec<char> = b.chars().collect();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for &c in &chars {
            *counts.entry(c).or_insert(0) += 1;
        }
        let b2j = index_positions(&chars);
        Self { chars, b2j, counts }
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Comparison state for one first sequence against an indexed second one.
pub struct SequenceMatcher<'b> {
    a: Vec<char>,
    b: Cow<'b, IndexedSequence>,
}

impl SequenceMatcher<'static> {
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        Self {
            a: a.chars().collect(),
            b: Cow::Owned(IndexedSequence::new(b)),
        }
    }
}

impl<'b> SequenceMatcher<'b> {
    /// Compares `a` against an already indexed second sequence.
    #[must_use]
    pub fn against(a: &str, b: &'b IndexedSequence) -> Self {
        Self {
            a: a.chars().collect(),
            b: Cow::Borrowed(b),
        }
    }

    /// Similarity in `[0.0, 1.0]`; two empty strings score `1.0`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let matched: usize = self.matching_blocks().iter().map(|m| m.len).sum();
        calculate_ratio(matched, self.a.len() + self.b.len())
    }

    /// Upper bound on [`SequenceMatcher::ratio`] from character multisets.
    #[must_use]
    pub fn quick_ratio(&self) -> f64 {
        quick_ratio(&self.a, &self.b)
    }

    /// Upper bound on [`SequenceMatcher::ratio`] from lengths alone.
    #[must_use]
    pub fn real_quick_ratio(&self) -> f64 {
        real_quick_ratio(self.a.len(), self.b.len())
    }

    /// Non-overlapping matching blocks in ascending order, adjacent runs merged.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            found.push(block);
            if alo < block.a_start && blo < block.b_start {
                pending.push((alo, block.a_start, blo, block.b_start));
            }
            let a_end = block.a_start + block.len;
            let b_end = block.b_start + block.len;
            if a_end < ahi && b_end < bhi {
                pending.push((a_end, ahi, b_end, bhi));
            }
        }

        found.sort_by_key(|m| (m.a_start, m.b_start));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len());
        for block in found {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Longest block inside `a[alo..ahi]` × `b[blo..bhi]`.
    ///
    /// Among equally long blocks, the one starting earliest in `a` wins, then
    /// earliest in `b`.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: alo,
            b_start: blo,
            len: 0,
        };

        // Length of the run ending at (i - 1, j), keyed by j.
        let mut run_len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(positions) = self.b.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            len: k,
                        };
                    }
                }
            }
            run_len = next_run_len;
        }

        // Popular characters never seed a match but may still extend one.
        while best.a_start > alo
            && best.b_start > blo
            && self.a[best.a_start - 1] == self.b.chars[best.b_start - 1]
        {
            best.a_start -= 1;
            best.b_start -= 1;
            best.len += 1;
        }
        while best.a_start + best.len < ahi
            && best.b_start + best.len < bhi
            && self.a[best.a_start + best.len] == self.b.chars[best.b_start + best.len]
        {
            best.len += 1;
        }

        best
    }
}

/// Similarity ratio of `a` against `b`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

fn calculate_ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matched as f64 / total as f64
}

fn real_quick_ratio(la: usize, lb: usize) -> f64 {
    calculate_ratio(la.min(lb), la + lb)
}

fn quick_ratio(a: &[char], b: &IndexedSequence) -> f64 {
    let mut used: HashMap<char, usize> = HashMap::new();
    let mut matched = 0;
    for c in a {
        let available = b.counts.get(c).copied().unwrap_or(0);
        let slot = used.entry(*c).or_insert(0);
        if *slot < available {
            matched += 1;
        }
        *slot += 1;
    }
    calculate_ratio(matched, a.len() + b.len())
}

fn index_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= limit);
    }

    b2j
}
