//! Rendering options and configuration.

/// Inline CSS for each part of the HTML diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyles {
    /// Wrapper `<div>` around the whole diff
    pub container: String,

    /// Unchanged text
    pub equal: String,

    /// Removed text
    pub removed: String,

    /// Added text
    pub added: String,

    /// Glyph between removed and added text of a replacement
    pub separator: String,
}

impl Default for RenderStyles {
    fn default() -> Self {
        Self {
            container: "line-height: 1.8; font-size: 16px;".to_string(),
            equal: "color: #333;".to_string(),
            removed: "background-color: #ffeef0; color: #b31d28; text-decoration: line-through; padding: 2px 0;"
                .to_string(),
            added: "background-color: #e6ffed; color: #22863a; font-weight: bold; padding: 2px 0;"
                .to_string(),
            separator: "color: #ccc; margin: 0 4px;".to_string(),
        }
    }
}

/// Options for rendering an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Inline styles
    pub styles: RenderStyles,

    /// Separator glyph; `None` picks `▶` for words and `→` for characters
    pub separator_glyph: Option<String>,

    /// Marker placed before a line break inside removed or added text
    pub break_glyph: String,

    /// Escape `& < > "` in token text
    pub escape_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            styles: RenderStyles::default(),
            separator_glyph: None,
            break_glyph: "↵".to_string(),
            escape_html: true,
        }
    }
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the inline styles.
    pub fn with_styles(mut self, styles: RenderStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Override the separator glyph.
    pub fn with_separator_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.separator_glyph = Some(glyph.into());
        self
    }

    /// Set the break marker.
    pub fn with_break_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.break_glyph = glyph.into();
        self
    }

    /// Enable or disable HTML escaping of token text.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}
