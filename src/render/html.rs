//! HTML rendering of an edit script.

use crate::model::{has_changes, DiffScript, EditOp, Granularity};

use super::options::RenderOptions;
use super::visitor::{walk, DiffVisitor};

/// Outcome of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The script holds only `equal` ops.
    NoDifferences,
    /// Styled markup for a script with at least one change.
    Markup(String),
}

impl Rendered {
    /// Check if there was nothing to highlight.
    pub fn is_no_differences(&self) -> bool {
        matches!(self, Rendered::NoDifferences)
    }

    /// Markup, if any.
    pub fn markup(&self) -> Option<&str> {
        match self {
            Rendered::Markup(html) => Some(html),
            Rendered::NoDifferences => None,
        }
    }

    /// Consume into the markup, if any.
    pub fn into_markup(self) -> Option<String> {
        match self {
            Rendered::Markup(html) => Some(html),
            Rendered::NoDifferences => None,
        }
    }
}

/// Escape `&`, `<`, `>` and `"` for HTML text and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders edit scripts as inline-styled HTML.
///
/// Word granularity writes spans joined by spaces, with `▶` between the
/// removed and added side of a replacement. Character granularity writes
/// each op as its own `<div>`, characters concatenated, with `→` between
/// the two sides.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    granularity: Granularity,
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a renderer for one granularity with default options.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            options: RenderOptions::default(),
        }
    }

    /// Set the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Granularity this renderer lays out.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `ops`, or signal that there is nothing to show.
    pub fn render(&self, ops: &[EditOp], tokens_a: &[String], tokens_b: &[String]) -> Rendered {
        if !has_changes(ops) {
            return Rendered::NoDifferences;
        }
        Rendered::Markup(self.markup(ops, tokens_a, tokens_b))
    }

    /// Render a complete script.
    pub fn render_script(&self, script: &DiffScript) -> Rendered {
        self.render(&script.ops, &script.tokens_a, &script.tokens_b)
    }

    /// Render `ops` unconditionally, even when nothing changed.
    pub fn markup(&self, ops: &[EditOp], tokens_a: &[String], tokens_b: &[String]) -> String {
        let mut writer = HtmlWriter {
            renderer: self,
            out: String::new(),
        };
        walk(ops, tokens_a, tokens_b, &mut writer);

        let body = match self.granularity {
            Granularity::Word => writer
                .out
                .replace(" <br>", "<br>")
                .replace("<br> ", "<br>"),
            Granularity::Character => writer.out,
        };

        format!(
            "<div style=\"{}\">{}</div>",
            self.options.styles.container,
            body.trim_end()
        )
    }

    fn separator_glyph(&self) -> &str {
        match (&self.options.separator_glyph, self.granularity) {
            (Some(glyph), _) => glyph,
            (None, Granularity::Word) => "▶",
            (None, Granularity::Character) => "→",
        }
    }

    fn joiner(&self) -> &'static str {
        match self.granularity {
            Granularity::Word => " ",
            Granularity::Character => "",
        }
    }

    fn join(&self, tokens: &[String]) -> String {
        let joiner = self.joiner();
        if self.options.escape_html {
            tokens
                .iter()
                .map(|t| escape_html(t))
                .collect::<Vec<_>>()
                .join(joiner)
        } else {
            tokens.join(joiner)
        }
    }
}

struct HtmlWriter<'r> {
    renderer: &'r HtmlRenderer,
    out: String,
}

impl HtmlWriter<'_> {
    fn span(&mut self, style: &str, text: &str) {
        self.out.push_str("<span style=\"");
        self.out.push_str(style);
        self.out.push_str("\">");
        self.out.push_str(text);
        self.out.push_str("</span>");
    }

    fn changed_text(&self, tokens: &[String]) -> String {
        let marker = format!("{}<br>", self.renderer.options.break_glyph);
        self.renderer.join(tokens).replace('\n', &marker)
    }
}

impl DiffVisitor for HtmlWriter<'_> {
    fn begin_op(&mut self, _op: &EditOp) {
        if self.renderer.granularity == Granularity::Character {
            self.out.push_str("<div>");
        }
    }

    fn visit_equal(&mut self, tokens: &[String]) {
        let renderer = self.renderer;
        let mut text = renderer.join(tokens).replace('\n', "<br>");
        if renderer.granularity == Granularity::Word {
            text = text.replace(" <br> ", "<br>").replace("<br> ", "<br>");
        }
        self.span(&renderer.options.styles.equal, &text);
    }

    fn visit_removed(&mut self, tokens: &[String]) {
        let renderer = self.renderer;
        let text = self.changed_text(tokens);
        self.span(&renderer.options.styles.removed, &text);
    }

    fn visit_separator(&mut self) {
        let renderer = self.renderer;
        self.span(&renderer.options.styles.separator, renderer.separator_glyph());
    }

    fn visit_added(&mut self, tokens: &[String]) {
        let renderer = self.renderer;
        let text = self.changed_text(tokens);
        self.span(&renderer.options.styles.added, &text);
    }

    fn end_op(&mut self, _op: &EditOp) {
        match self.renderer.granularity {
            Granularity::Word => self.out.push(' '),
            Granularity::Character => self.out.push_str("</div>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OpKind;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_differences() {
        let a = strings(&["효과가", "있다."]);
        let ops = vec![EditOp::new(OpKind::Equal, 0..2, 0..2)];
        let rendered = HtmlRenderer::new(Granularity::Word).render(&ops, &a, &a);
        assert!(rendered.is_no_differences());
        assert_eq!(rendered.markup(), None);

        assert!(HtmlRenderer::default().render(&[], &[], &[]).is_no_differences());
    }

    #[test]
    fn test_word_replace() {
        let a = strings(&["투여량은", "1일", "2회", "복용한다"]);
        let b = strings(&["투여량은", "1일", "3회", "복용한다"]);
        let ops = vec![
            EditOp::new(OpKind::Equal, 0..2, 0..2),
            EditOp::new(OpKind::Replace, 2..3, 2..3),
            EditOp::new(OpKind::Equal, 3..4, 3..4),
        ];
        let html = HtmlRenderer::new(Granularity::Word)
            .render(&ops, &a, &b)
            .into_markup()
            .unwrap();

        assert!(html.starts_with("<div style=\"line-height: 1.8; font-size: 16px;\">"));
        assert!(html.contains("<span style=\"color: #333;\">투여량은 1일</span>"));
        assert!(html.contains("line-through; padding: 2px 0;\">2회</span>"));
        assert!(html.contains(">▶</span>"));
        assert!(html.contains("font-weight: bold; padding: 2px 0;\">3회</span>"));
        assert!(html.contains("<span style=\"color: #333;\">복용한다</span></div>"));
    }

    #[test]
    fn test_word_breaks() {
        let a = strings(&["끝.", "\n", "다음", "\n", "삭제"]);
        let b = strings(&["끝.", "\n", "다음"]);
        let ops = vec![
            EditOp::new(OpKind::Equal, 0..3, 0..3),
            EditOp::new(OpKind::Delete, 3..5, 3..3),
        ];
        let html = HtmlRenderer::new(Granularity::Word).markup(&ops, &a, &b);

        assert!(html.contains(">끝.<br>다음</span>"));
        assert!(html.contains(">↵<br>삭제</span>"));
    }

    #[test]
    fn test_character_layout() {
        let a = strings(&["2", "회"]);
        let b = strings(&["3", "회"]);
        let ops = vec![
            EditOp::new(OpKind::Replace, 0..1, 0..1),
            EditOp::new(OpKind::Equal, 1..2, 1..2),
        ];
        let html = HtmlRenderer::new(Granularity::Character).markup(&ops, &a, &b);

        assert_eq!(html.matches("<div>").count(), 2);
        assert!(html.contains(">→</span>"));
        assert!(html.contains("<div><span style=\"color: #333;\">회</span></div>"));
    }

    #[test]
    fn test_escapes_token_text() {
        let a = strings(&["<b>", "&"]);
        let b = strings(&["\"q\""]);
        let ops = vec![EditOp::new(OpKind::Replace, 0..2, 0..1)];
        let html = HtmlRenderer::new(Granularity::Word).markup(&ops, &a, &b);

        assert!(html.contains("&lt;b&gt; &amp;"));
        assert!(html.contains("&quot;q&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_custom_separator() {
        let a = strings(&["a"]);
        let b = strings(&["b"]);
        let ops = vec![EditOp::new(OpKind::Replace, 0..1, 0..1)];
        let renderer = HtmlRenderer::new(Granularity::Word)
            .with_options(RenderOptions::new().with_separator_glyph("=&gt;"));
        assert!(renderer.markup(&ops, &a, &b).contains(">=&gt;</span>"));
    }
}
