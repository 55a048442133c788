//! Ratcliff/Obershelp matching.
//!
//! Finds the longest contiguous matching block, then recurses on the
//! unmatched regions to its left and right. Tie-breaking and the "popular
//! element" heuristic follow Python's `difflib.SequenceMatcher`, so results
//! are reproducible against it.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::model::{EditOp, OpKind};

/// Minimum length of `b` for the popular-element heuristic to apply.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Computes matching blocks and edit ops between two sequences.
#[derive(Debug)]
pub struct SequenceMatcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    autojunk: bool,
    /// Positions of every element of `b`, popular elements excluded.
    b2j: HashMap<&'s T, Vec<usize>>,
    popular: HashSet<&'s T>,
}

impl<'s, T: Eq + Hash> SequenceMatcher<'s, T> {
    /// Create a matcher with the popular-element heuristic enabled.
    pub fn new(a: &'s [T], b: &'s [T]) -> Self {
        let mut matcher = Self {
            a,
            b,
            autojunk: true,
            b2j: HashMap::new(),
            popular: HashSet::new(),
        };
        matcher.index_b();
        matcher
    }

    /// Enable or disable the popular-element heuristic.
    ///
    /// When enabled and `b` has at least [`AUTOJUNK_MIN_LEN`] elements, any
    /// element occurring more than `len / 100 + 1` times does not seed a
    /// match. It can still extend one.
    pub fn with_autojunk(mut self, autojunk: bool) -> Self {
        if self.autojunk != autojunk {
            self.autojunk = autojunk;
            self.index_b();
        }
        self
    }

    fn index_b(&mut self) {
        self.b2j.clear();
        self.popular.clear();

        let b = self.b;
        for (j, elt) in b.iter().enumerate() {
            self.b2j.entry(elt).or_default().push(j);
        }

        let n = b.len();
        if self.autojunk && n >= AUTOJUNK_MIN_LEN {
            let limit = n / 100 + 1;
            self.popular = self
                .b2j
                .iter()
                .filter(|(_, positions)| positions.len() > limit)
                .map(|(elt, _)| *elt)
                .collect();
            for elt in &self.popular {
                self.b2j.remove(elt);
            }
        }
    }

    /// Elements of `b` that were excluded from seeding matches.
    pub fn popular(&self) -> &HashSet<&'s T> {
        &self.popular
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among maximal blocks, returns the one starting earliest in `a`, and
    /// of those the one starting earliest in `b`. A block of size 0 means
    /// there is no match.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let mut best = Match {
            a: alo,
            b: blo,
            size: 0,
        };

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let run = match j.checked_sub(1) {
                        Some(prev) => j2len.get(&prev).copied().unwrap_or(0),
                        None => 0,
                    };
                    let k = run + 1;
                    next_j2len.insert(j, k);
                    if k > best.size {
                        best = Match {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular elements never seed a block but may extend one.
        while best.a > alo && best.b > blo && a[best.a - 1] == b[best.b - 1] {
            best.a -= 1;
            best.b -= 1;
            best.size += 1;
        }
        while best.a + best.size < ahi
            && best.b + best.size < bhi
            && a[best.a + best.size] == b[best.b + best.size]
        {
            best.size += 1;
        }

        best
    }

    /// All matching blocks in increasing order, adjacent blocks merged,
    /// terminated by the sentinel `(len(a), len(b), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Edit ops turning `a` into `b`, covering both sequences contiguously.
    pub fn opcodes(&self) -> Vec<EditOp> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for m in self.matching_blocks() {
            let kind = match (i < m.a, j < m.b) {
                (true, true) => Some(OpKind::Replace),
                (true, false) => Some(OpKind::Delete),
                (false, true) => Some(OpKind::Insert),
                (false, false) => None,
            };
            if let Some(kind) = kind {
                ops.push(EditOp::new(kind, i..m.a, j..m.b));
            }

            i = m.a + m.size;
            j = m.b + m.size;
            if m.size > 0 {
                ops.push(EditOp::new(OpKind::Equal, m.a..i, m.b..j));
            }
        }
        ops
    }

    /// Similarity in `[0, 1]`: `2 * matched / (len(a) + len(b))`.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}
