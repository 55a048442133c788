//! Sequence diffing.
//!
//! [`diff`] aligns two token sequences with [`SequenceMatcher`] and
//! returns the edit script. [`diff_filtered`] is the character-granularity
//! variant: it tokenizes into characters and absorbs spacing-only changes.

mod filter;
mod matcher;
mod tokenize;

pub use filter::suppress_cosmetic;
pub use matcher::{Match, SequenceMatcher, AUTOJUNK_MIN_LEN};
pub use tokenize::{Tokenizer, LINE_BREAK};

use std::hash::Hash;

use crate::model::{EditOp, Granularity};

/// Edit script turning `a` into `b`.
///
/// Deterministic; ties between equally long matching blocks go to the one
/// starting earliest.
///
/// # Example
///
/// ```
/// use labeldiff::diff::diff;
/// use labeldiff::model::OpKind;
///
/// let ops = diff(&["1일", "2회"], &["1일", "3회"]);
/// assert_eq!(ops[0].kind, OpKind::Equal);
/// assert_eq!(ops[1].kind, OpKind::Replace);
/// ```
pub fn diff<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<EditOp> {
    SequenceMatcher::new(a, b).opcodes()
}

/// Character-level diff with spacing-only changes suppressed.
pub fn diff_filtered(a: &str, b: &str) -> Vec<EditOp> {
    let tokenizer = Tokenizer::new(Granularity::Character);
    let tokens_a = tokenizer.tokenize(a);
    let tokens_b = tokenizer.tokenize(b);
    suppress_cosmetic(diff(&tokens_a, &tokens_b), &tokens_a, &tokens_b)
}
