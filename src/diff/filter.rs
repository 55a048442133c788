//! Suppression of spacing-only changes.

use crate::model::{EditOp, OpKind};

/// Turn spacing-only changes into `equal` runs.
///
/// A `replace` whose two spans are identical once all whitespace is
/// removed, and a `delete`/`insert` whose span is only whitespace, become
/// [`OpKind::Equal`]. Their ranges are kept as they were, so a suppressed
/// op may cover a different number of tokens on each side; renderers show
/// the old span for every `equal` op.
pub fn suppress_cosmetic(ops: Vec<EditOp>, a: &[String], b: &[String]) -> Vec<EditOp> {
    ops.into_iter()
        .map(|op| {
            let cosmetic = match op.kind {
                OpKind::Equal => false,
                OpKind::Replace => {
                    squeeze(op.old_span(a)) == squeeze(op.new_span(b))
                }
                OpKind::Delete => is_blank(op.old_span(a)),
                OpKind::Insert => is_blank(op.new_span(b)),
            };

            if cosmetic {
                log::trace!("Suppressed spacing-only {:?} at {:?}", op.kind, op.a);
                EditOp {
                    kind: OpKind::Equal,
                    ..op
                }
            } else {
                op
            }
        })
        .collect()
}

fn squeeze(tokens: &[String]) -> String {
    tokens
        .iter()
        .flat_map(|t| t.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn is_blank(tokens: &[String]) -> bool {
    tokens.iter().all(|t| t.trim().is_empty())
}
