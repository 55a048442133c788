//! Integration tests for the diff visitor.

use labeldiff::diff::{diff, Tokenizer};
use labeldiff::render::visitor::{walk, walk_script, DiffVisitor};
use labeldiff::{compare, EditOp, Granularity, LabelDiff, OpKind};

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    ops: usize,
    equal_tokens: usize,
    removed_tokens: usize,
    added_tokens: usize,
    separators: usize,
}

impl DiffVisitor for CountingVisitor {
    fn begin_op(&mut self, _op: &EditOp) {
        self.ops += 1;
    }

    fn visit_equal(&mut self, tokens: &[String]) {
        self.equal_tokens += tokens.len();
    }

    fn visit_removed(&mut self, tokens: &[String]) {
        self.removed_tokens += tokens.len();
    }

    fn visit_separator(&mut self) {
        self.separators += 1;
    }

    fn visit_added(&mut self, tokens: &[String]) {
        self.added_tokens += tokens.len();
    }
}

/// Rebuilds both token sequences from the visited spans.
#[derive(Default)]
struct Rebuilder {
    old: Vec<String>,
    new: Vec<String>,
}

impl DiffVisitor for Rebuilder {
    fn visit_equal(&mut self, tokens: &[String]) {
        self.old.extend_from_slice(tokens);
        self.new.extend_from_slice(tokens);
    }

    fn visit_removed(&mut self, tokens: &[String]) {
        self.old.extend_from_slice(tokens);
    }

    fn visit_added(&mut self, tokens: &[String]) {
        self.new.extend_from_slice(tokens);
    }
}

/// Collects only the changed text, one entry per op.
#[derive(Default)]
struct ChangeLog {
    current: String,
    entries: Vec<String>,
}

impl DiffVisitor for ChangeLog {
    fn visit_removed(&mut self, tokens: &[String]) {
        self.current.push_str(&format!("-{}", tokens.join(" ")));
    }

    fn visit_separator(&mut self) {
        self.current.push_str(" / ");
    }

    fn visit_added(&mut self, tokens: &[String]) {
        self.current.push_str(&format!("+{}", tokens.join(" ")));
    }

    fn end_op(&mut self, op: &EditOp) {
        if op.kind != OpKind::Equal {
            self.entries.push(std::mem::take(&mut self.current));
        }
    }
}

#[test]
fn test_rebuilds_both_sides() {
    let tokenizer = Tokenizer::new(Granularity::Word);
    let a = tokenizer.tokenize("두통 치통의 완화\n성인 1일 2회 복용한다");
    let b = tokenizer.tokenize("두통 치통 및 생리통의 완화\n성인 1일 3회 복용한다\n식후 복용");
    let ops = diff(&a, &b);

    let mut rebuilder = Rebuilder::default();
    walk(&ops, &a, &b, &mut rebuilder);

    assert_eq!(rebuilder.old, a);
    assert_eq!(rebuilder.new, b);
}

#[test]
fn test_counts_match_stats() {
    let comparison = compare(
        "성인 1일 2회 복용한다\n소아는 투여하지 말 것.",
        "성인 1일 3회 복용한다\n소아는 의사와 상의할 것.",
    );
    let report = comparison.report().unwrap();

    let mut counter = CountingVisitor::default();
    walk_script(&report.script, &mut counter);

    assert_eq!(counter.ops, report.script.ops.len());
    assert_eq!(counter.equal_tokens as u32, report.stats.tokens_unchanged);
    assert_eq!(counter.removed_tokens as u32, report.stats.tokens_removed);
    assert_eq!(counter.added_tokens as u32, report.stats.tokens_added);
    assert_eq!(counter.separators as u32, report.stats.replace_ops);
}

#[test]
fn test_change_log() {
    let comparison = compare("1일 2회 복용한다", "1일 3회 복용한다");
    let script = comparison.script().unwrap();

    let mut log = ChangeLog::default();
    walk_script(script, &mut log);

    assert_eq!(log.entries, vec!["-2회 / +3회".to_string()]);
}

#[test]
fn test_identical_script_has_only_equal_spans() {
    let comparison = compare("효과가 있습니다.", "효과가\n있다.");
    assert!(comparison.is_identical());

    let mut counter = CountingVisitor::default();
    walk_script(comparison.script().unwrap(), &mut counter);

    assert_eq!(counter.removed_tokens, 0);
    assert_eq!(counter.added_tokens, 0);
    assert_eq!(counter.separators, 0);
    assert_eq!(counter.equal_tokens, 2);
}

#[test]
fn test_character_script() {
    let comparator = LabelDiff::new().granularity(Granularity::Character).build();
    let comparison = comparator.compare("1일 2회", "1일 3회");

    let mut log = ChangeLog::default();
    walk_script(comparison.script().unwrap(), &mut log);
    assert_eq!(log.entries, vec!["-2 / +3".to_string()]);
}

#[test]
fn test_trait_object_visitor() {
    let a = vec!["가".to_string()];
    let b = vec!["나".to_string()];
    let ops = diff(&a, &b);

    let mut counter = CountingVisitor::default();
    let visitor: &mut dyn DiffVisitor = &mut counter;
    walk(&ops, &a, &b, visitor);

    assert_eq!(counter.ops, 1);
    assert_eq!(counter.separators, 1);
}
