//! Visitor pattern for walking an edit script.
//!
//! [`walk`] drives a [`DiffVisitor`] over the ops of a script in order.
//! Renderers implement the trait to decide how each span is written.
//!
//! # Example
//!
//! ```
//! use labeldiff::render::visitor::{walk, DiffVisitor};
//! use labeldiff::model::{EditOp, OpKind};
//!
//! #[derive(Default)]
//! struct Markers(String);
//!
//! impl DiffVisitor for Markers {
//!     fn visit_equal(&mut self, tokens: &[String]) {
//!         self.0.push_str(&tokens.join(" "));
//!     }
//!     fn visit_removed(&mut self, tokens: &[String]) {
//!         self.0.push_str(&format!("[-{}-]", tokens.join(" ")));
//!     }
//!     fn visit_added(&mut self, tokens: &[String]) {
//!         self.0.push_str(&format!("{{+{}+}}", tokens.join(" ")));
//!     }
//! }
//!
//! let a = vec!["1일".to_string(), "2회".to_string()];
//! let b = vec!["1일".to_string(), "3회".to_string()];
//! let ops = vec![
//!     EditOp::new(OpKind::Equal, 0..1, 0..1),
//!     EditOp::new(OpKind::Replace, 1..2, 1..2),
//! ];
//!
//! let mut markers = Markers::default();
//! walk(&ops, &a, &b, &mut markers);
//! assert_eq!(markers.0, "1일[-2회-]{+3회+}");
//! ```

use crate::model::{DiffScript, EditOp, OpKind};

/// Callbacks for each part of an edit script.
///
/// All methods do nothing by default. For a `replace` op the order is
/// `visit_removed`, `visit_separator`, `visit_added`.
pub trait DiffVisitor {
    /// Called before the spans of an op.
    fn begin_op(&mut self, op: &EditOp) {
        let _ = op;
    }

    /// Old-side tokens of an `equal` op.
    fn visit_equal(&mut self, tokens: &[String]) {
        let _ = tokens;
    }

    /// Old-side tokens of a `replace` or `delete` op.
    fn visit_removed(&mut self, tokens: &[String]) {
        let _ = tokens;
    }

    /// Between the removed and added spans of a `replace` op.
    fn visit_separator(&mut self) {}

    /// New-side tokens of a `replace` or `insert` op.
    fn visit_added(&mut self, tokens: &[String]) {
        let _ = tokens;
    }

    /// Called after the spans of an op.
    fn end_op(&mut self, op: &EditOp) {
        let _ = op;
    }
}

/// Walk `ops` over the two token sequences.
pub fn walk<V: DiffVisitor + ?Sized>(
    ops: &[EditOp],
    tokens_a: &[String],
    tokens_b: &[String],
    visitor: &mut V,
) {
    for op in ops {
        visitor.begin_op(op);
        match op.kind {
            OpKind::Equal => visitor.visit_equal(op.old_span(tokens_a)),
            OpKind::Replace => {
                visitor.visit_removed(op.old_span(tokens_a));
                visitor.visit_separator();
                visitor.visit_added(op.new_span(tokens_b));
            }
            OpKind::Delete => visitor.visit_removed(op.old_span(tokens_a)),
            OpKind::Insert => visitor.visit_added(op.new_span(tokens_b)),
        }
        visitor.end_op(op);
    }
}

/// Walk a complete [`DiffScript`].
pub fn walk_script<V: DiffVisitor + ?Sized>(script: &DiffScript, visitor: &mut V) {
    walk(&script.ops, &script.tokens_a, &script.tokens_b, visitor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl DiffVisitor for Recorder {
        fn visit_equal(&mut self, tokens: &[String]) {
            self.events.push(format!("={}", tokens.concat()));
        }

        fn visit_removed(&mut self, tokens: &[String]) {
            self.events.push(format!("-{}", tokens.concat()));
        }

        fn visit_separator(&mut self) {
            self.events.push("|".to_string());
        }

        fn visit_added(&mut self, tokens: &[String]) {
            self.events.push(format!("+{}", tokens.concat()));
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_walk_order() {
        let a = strings(&["a", "b", "c", "d"]);
        let b = strings(&["a", "x", "c", "e"]);
        let ops = vec![
            EditOp::new(OpKind::Equal, 0..1, 0..1),
            EditOp::new(OpKind::Replace, 1..2, 1..2),
            EditOp::new(OpKind::Equal, 2..3, 2..3),
            EditOp::new(OpKind::Delete, 3..4, 3..3),
            EditOp::new(OpKind::Insert, 4..4, 3..4),
        ];

        let mut recorder = Recorder::default();
        walk(&ops, &a, &b, &mut recorder);
        assert_eq!(recorder.events, vec!["=a", "-b", "|", "+x", "=c", "-d", "+e"]);
    }

    #[test]
    fn test_default_methods_do_nothing() {
        struct Silent;
        impl DiffVisitor for Silent {}

        let a = strings(&["a"]);
        let ops = vec![EditOp::new(OpKind::Delete, 0..1, 0..0)];
        walk(&ops, &a, &[], &mut Silent);
    }

    #[test]
    fn test_walk_script() {
        let script = DiffScript::new(
            crate::model::Granularity::Word,
            strings(&["a"]),
            strings(&["a"]),
            vec![EditOp::new(OpKind::Equal, 0..1, 0..1)],
        );
        let mut recorder = Recorder::default();
        walk_script(&script, &mut recorder);
        assert_eq!(recorder.events, vec!["=a"]);
    }
}
