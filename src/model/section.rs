//! Section-level types produced by the section extractor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinically relevant section categories retained for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    /// 효능·효과
    Efficacy,
    /// 용법·용량
    Dosage,
    /// 사용상의 주의사항
    Precautions,
}

impl SectionCategory {
    /// All categories in document-conventional order.
    pub const ALL: [SectionCategory; 3] = [
        SectionCategory::Efficacy,
        SectionCategory::Dosage,
        SectionCategory::Precautions,
    ];

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCategory::Efficacy => "efficacy",
            SectionCategory::Dosage => "dosage",
            SectionCategory::Precautions => "precautions",
        }
    }
}

impl fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efficacy" => Ok(SectionCategory::Efficacy),
            "dosage" => Ok(SectionCategory::Dosage),
            "precautions" => Ok(SectionCategory::Precautions),
            other => Err(format!("unknown section category: {}", other)),
        }
    }
}

/// A line recognised as a section header.
///
/// Offsets are byte offsets into the full document text. `start` may point
/// at leading clutter (blank lines, bullets) swallowed by the header pattern;
/// `text` is the matched line with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeader {
    /// Trimmed header line
    pub text: String,

    /// Start of the match (inclusive)
    pub start: usize,

    /// End of the match (exclusive)
    pub end: usize,

    /// Header text with whitespace, brackets, digits and bullets removed
    pub key: String,

    /// Target categories whose synonyms occur in `key` (may be empty)
    pub categories: Vec<SectionCategory>,
}

impl SectionHeader {
    /// Check if this header opens a section of any target category.
    pub fn is_target(&self) -> bool {
        !self.categories.is_empty()
    }

    /// First matched category, if any.
    pub fn primary_category(&self) -> Option<SectionCategory> {
        self.categories.first().copied()
    }
}

/// One retained section: its category, header label and body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Category of the header that opened the section
    pub category: SectionCategory,
    /// Header line as it appears in the document, trimmed
    pub label: String,
    /// Text up to the next recognized header, trimmed
    pub body: String,
}

impl Section {
    /// Render as `\n\n--- [label] ---\nbody`.
    pub fn labeled(&self) -> String {
        format!("\n\n--- [{}] ---\n{}", self.label, self.body)
    }
}

/// Ordered target sections of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub sections: Vec<Section>,
}

impl ExtractedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if no target section was found.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Sections of a given category, in document order.
    pub fn sections_of(&self, category: SectionCategory) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.category == category)
    }

    /// Concatenate all sections in their labeled form.
    ///
    /// Returns an empty string when nothing was found.
    pub fn to_labeled_text(&self) -> String {
        self.sections.iter().map(Section::labeled).collect()
    }
}
