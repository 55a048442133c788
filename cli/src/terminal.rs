//! Colored terminal rendering of an edit script.

use colored::Colorize;

use labeldiff::render::{walk_script, DiffVisitor};
use labeldiff::{DiffScript, EditOp, Granularity};

/// Writes removed text as red `[-…-]` and added text as green `{+…+}`.
pub struct TerminalVisitor {
    granularity: Granularity,
    out: String,
}

impl TerminalVisitor {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    fn join(&self, tokens: &[String]) -> String {
        match self.granularity {
            Granularity::Word => tokens.join(" ").replace(" \n ", "\n").replace("\n ", "\n"),
            Granularity::Character => tokens.concat(),
        }
    }

    fn changed(&self, tokens: &[String]) -> String {
        self.join(tokens).replace('\n', "↵\n")
    }
}

impl DiffVisitor for TerminalVisitor {
    fn visit_equal(&mut self, tokens: &[String]) {
        let text = self.join(tokens);
        self.out.push_str(&text);
    }

    fn visit_removed(&mut self, tokens: &[String]) {
        let text = format!("[-{}-]", self.changed(tokens));
        self.out.push_str(&text.red().strikethrough().to_string());
    }

    fn visit_separator(&mut self) {
        let glyph = match self.granularity {
            Granularity::Word => "▶",
            Granularity::Character => "→",
        };
        self.out.push_str(&glyph.dimmed().to_string());
    }

    fn visit_added(&mut self, tokens: &[String]) {
        let text = format!("{{+{}+}}", self.changed(tokens));
        self.out.push_str(&text.green().bold().to_string());
    }

    fn end_op(&mut self, _op: &EditOp) {
        if self.granularity == Granularity::Word && !self.out.ends_with('\n') {
            self.out.push(' ');
        }
    }
}

/// Render a script for the terminal.
pub fn render(script: &DiffScript) -> String {
    let mut visitor = TerminalVisitor::new(script.granularity);
    walk_script(script, &mut visitor);
    visitor.finish()
}
