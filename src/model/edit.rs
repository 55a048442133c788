//! Edit-script types shared by the differ and the renderers.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Comparison unit used end-to-end by one comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Whitespace-delimited words plus explicit line-break tokens
    #[default]
    Word,
    /// Individual characters, spacing-only changes suppressed
    Character,
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" | "words" => Ok(Granularity::Word),
            "char" | "character" | "characters" => Ok(Granularity::Character),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}

/// Kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One run of an edit script over token sequences `a` and `b`.
///
/// Ops of a script are contiguous: each op starts where the previous one
/// ended on both sides, and together they cover both sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    pub kind: OpKind,
    /// Token range in the old sequence
    pub a: Range<usize>,
    /// Token range in the new sequence
    pub b: Range<usize>,
}

impl EditOp {
    /// Create an op.
    pub fn new(kind: OpKind, a: Range<usize>, b: Range<usize>) -> Self {
        Self { kind, a, b }
    }

    /// Check if this op is an unchanged run.
    pub fn is_equal(&self) -> bool {
        self.kind == OpKind::Equal
    }

    /// Tokens of the old side covered by this op.
    pub fn old_span<'t, T>(&self, tokens: &'t [T]) -> &'t [T] {
        &tokens[self.a.clone()]
    }

    /// Tokens of the new side covered by this op.
    pub fn new_span<'t, T>(&self, tokens: &'t [T]) -> &'t [T] {
        &tokens[self.b.clone()]
    }
}

/// Check if an edit script contains anything other than `equal` runs.
pub fn has_changes(ops: &[EditOp]) -> bool {
    ops.iter().any(|op| !op.is_equal())
}

/// A complete comparison result: both token sequences and the ops over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffScript {
    pub granularity: Granularity,
    pub tokens_a: Vec<String>,
    pub tokens_b: Vec<String>,
    pub ops: Vec<EditOp>,
}

impl DiffScript {
    /// Bundle tokens and ops.
    pub fn new(
        granularity: Granularity,
        tokens_a: Vec<String>,
        tokens_b: Vec<String>,
        ops: Vec<EditOp>,
    ) -> Self {
        Self {
            granularity,
            tokens_a,
            tokens_b,
            ops,
        }
    }

    /// Check if any op is not `equal`.
    pub fn has_changes(&self) -> bool {
        has_changes(&self.ops)
    }

    /// Count ops and tokens per kind.
    pub fn stats(&self) -> DiffStats {
        DiffStats::from_ops(&self.ops)
    }

    /// Iterate only the changed ops.
    pub fn changes(&self) -> impl Iterator<Item = &EditOp> {
        self.ops.iter().filter(|op| !op.is_equal())
    }
}

/// Statistics over an edit script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of `equal` ops
    pub equal_ops: u32,

    /// Number of `replace` ops
    pub replace_ops: u32,

    /// Number of `delete` ops
    pub delete_ops: u32,

    /// Number of `insert` ops
    pub insert_ops: u32,

    /// Old-side tokens inside `equal` ops
    pub tokens_unchanged: u32,

    /// Old-side tokens inside `replace` and `delete` ops
    pub tokens_removed: u32,

    /// New-side tokens inside `replace` and `insert` ops
    pub tokens_added: u32,
}

impl DiffStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally an edit script.
    pub fn from_ops(ops: &[EditOp]) -> Self {
        let mut stats = Self::new();
        for op in ops {
            stats.add_op(op);
        }
        stats
    }

    /// Add one op to the tallies.
    pub fn add_op(&mut self, op: &EditOp) {
        let old_len = op.a.len() as u32;
        let new_len = op.b.len() as u32;
        match op.kind {
            OpKind::Equal => {
                self.equal_ops += 1;
                self.tokens_unchanged += old_len;
            }
            OpKind::Replace => {
                self.replace_ops += 1;
                self.tokens_removed += old_len;
                self.tokens_added += new_len;
            }
            OpKind::Delete => {
                self.delete_ops += 1;
                self.tokens_removed += old_len;
            }
            OpKind::Insert => {
                self.insert_ops += 1;
                self.tokens_added += new_len;
            }
        }
    }

    /// Number of non-equal ops.
    pub fn change_count(&self) -> u32 {
        self.replace_ops + self.delete_ops + self.insert_ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<EditOp> {
        vec![
            EditOp::new(OpKind::Equal, 0..2, 0..2),
            EditOp::new(OpKind::Replace, 2..3, 2..4),
            EditOp::new(OpKind::Delete, 3..5, 4..4),
            EditOp::new(OpKind::Equal, 5..6, 4..5),
            EditOp::new(OpKind::Insert, 6..6, 5..6),
        ]
    }

    #[test]
    fn test_stats_from_ops() {
        let stats = DiffStats::from_ops(&script());
        assert_eq!(stats.equal_ops, 2);
        assert_eq!(stats.replace_ops, 1);
        assert_eq!(stats.delete_ops, 1);
        assert_eq!(stats.insert_ops, 1);
        assert_eq!(stats.tokens_unchanged, 3);
        assert_eq!(stats.tokens_removed, 3);
        assert_eq!(stats.tokens_added, 3);
        assert_eq!(stats.change_count(), 3);
    }

    #[test]
    fn test_has_changes() {
        assert!(has_changes(&script()));
        assert!(!has_changes(&[EditOp::new(OpKind::Equal, 0..1, 0..1)]));
        assert!(!has_changes(&[]));
    }

    #[test]
    fn test_spans() {
        let a = ["x", "y", "z"];
        let op = EditOp::new(OpKind::Replace, 1..3, 0..0);
        assert_eq!(op.old_span(&a), &["y", "z"]);
        assert!(op.new_span(&a).is_empty());
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("word".parse::<Granularity>().unwrap(), Granularity::Word);
        assert_eq!(
            "Character".parse::<Granularity>().unwrap(),
            Granularity::Character
        );
        assert!("line".parse::<Granularity>().is_err());
    }
}
