//! Section extraction.
//!
//! Finds header lines in the full document text, classifies them, and
//! slices out the bodies of target sections. A section body runs from the
//! end of its header to the start of the next header of *any* kind, so a
//! non-target header such as `저장방법` still terminates the section before
//! it.
//!
//! Extraction runs on raw page text (before normalization) because
//! header detection depends on the original line boundaries.

mod vocabulary;

pub use vocabulary::{HeaderVocabulary, DEFAULT_MAX_TRAILING};

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{ExtractedDocument, Section, SectionCategory, SectionHeader};
use crate::normalize::rules;

/// Minimum body length (characters, after trimming) for a section to be kept.
pub const MIN_BODY_CHARS: usize = 2;

/// Header detection and section slicing.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    vocabulary: HeaderVocabulary,
    header_regex: Option<Regex>,
    key_strip_regex: Regex,
    targets: Vec<SectionCategory>,
}

impl SectionExtractor {
    /// Create an extractor for the given vocabulary, targeting all categories.
    pub fn new(vocabulary: HeaderVocabulary) -> Self {
        let header_regex = vocabulary
            .header_pattern()
            .map(|pattern| Regex::new(&pattern).expect("header pattern is built from escaped keywords"));

        Self {
            vocabulary,
            header_regex,
            key_strip_regex: Regex::new(r"[\s\[\]【】.\d•]").expect("valid regex"),
            targets: SectionCategory::ALL.to_vec(),
        }
    }

    /// Restrict which categories are retained.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = SectionCategory>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Retained categories.
    pub fn targets(&self) -> &[SectionCategory] {
        &self.targets
    }

    /// The vocabulary in use.
    pub fn vocabulary(&self) -> &HeaderVocabulary {
        &self.vocabulary
    }

    /// Sanitize a header line into its classification key.
    pub fn header_key(&self, header: &str) -> String {
        self.key_strip_regex.replace_all(header, "").into_owned()
    }

    /// Find every header line in document order, target or not.
    pub fn scan_headers(&self, full_text: &str) -> Vec<SectionHeader> {
        let Some(ref header_regex) = self.header_regex else {
            return Vec::new();
        };

        header_regex
            .find_iter(full_text)
            .map(|m| {
                let text = m.as_str().trim().to_string();
                let key = self.header_key(&text);
                let categories = self.vocabulary.classify(&key);
                SectionHeader {
                    text,
                    start: m.start(),
                    end: m.end(),
                    key,
                    categories,
                }
            })
            .collect()
    }

    /// Slice the document into target sections.
    ///
    /// The text is composed to NFC first, so headers spelled with
    /// decomposed Hangul jamo still match the vocabulary.
    pub fn extract(&self, full_text: &str) -> ExtractedDocument {
        let composed = rules::canonicalize(full_text);
        let full_text = composed.as_str();
        let headers = self.scan_headers(full_text);
        let mut doc = ExtractedDocument::new();

        for (i, header) in headers.iter().enumerate() {
            let Some(category) = header
                .categories
                .iter()
                .copied()
                .find(|c| self.targets.contains(c))
            else {
                continue;
            };

            let body_end = headers.get(i + 1).map_or(full_text.len(), |next| next.start);
            let body = full_text[header.end..body_end].trim();
            if body.chars().count() < MIN_BODY_CHARS {
                log::debug!("Skipping empty section under header {:?}", header.text);
                continue;
            }

            doc.add_section(Section {
                category,
                label: header.text.clone(),
                body: body.to_string(),
            });
        }

        log::debug!(
            "Matched {} headers, kept {} target sections",
            headers.len(),
            doc.len()
        );
        doc
    }

    /// Slice the document and join the sections in labeled form.
    ///
    /// Returns an empty string when no target section was found.
    pub fn extract_labeled(&self, full_text: &str) -> String {
        self.extract(full_text).to_labeled_text()
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(HeaderVocabulary::default())
    }
}

/// Extract target sections with the default Korean package-insert vocabulary.
///
/// # Example
///
/// ```
/// use labeldiff::section::extract_sections;
///
/// let text = "1. 효능효과\n해열 및 진통\n저장방법\n실온 보관\n";
/// let sections = extract_sections(text);
/// assert_eq!(sections, "\n\n--- [1. 효능효과] ---\n해열 및 진통");
/// ```
pub fn extract_sections(full_text: &str) -> String {
    static DEFAULT: OnceLock<SectionExtractor> = OnceLock::new();
    DEFAULT
        .get_or_init(SectionExtractor::default)
        .extract_labeled(full_text)
}
