//! Page-level text as handed over by the PDF collaborator.

use serde::{Deserialize, Serialize};

/// Extracted text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Layout-derived text, or `None` when the page yielded nothing
    /// (image-only page, unreadable content stream in lenient mode).
    pub text: Option<String>,
}

impl RawPage {
    /// Create a page with text.
    pub fn with_text(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: Some(text.into()),
        }
    }

    /// Create a page that produced no text.
    pub fn empty(number: u32) -> Self {
        Self { number, text: None }
    }

    /// Check if the page carries usable text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Ordered per-page text of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPages {
    pub pages: Vec<RawPage>,
}

impl RawPages {
    /// Create an empty page list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn push(&mut self, page: RawPage) {
        self.pages.push(page);
    }

    /// Number of pages read (including pages without text).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no pages were read.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of pages that yielded text.
    pub fn text_page_count(&self) -> usize {
        self.pages.iter().filter(|p| p.has_text()).count()
    }

    /// Join all pages into one document text.
    ///
    /// Every page that produced text is followed by a single `\n`; pages
    /// without text contribute nothing. Carriage returns are folded into
    /// `\n` so that line-anchored header matching sees one break style.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            if let Some(ref page_text) = page.text {
                text.push_str(page_text);
                text.push('\n');
            }
        }
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}

impl FromIterator<RawPage> for RawPages {
    fn from_iter<I: IntoIterator<Item = RawPage>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}
