//! Extraction options and configuration.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Options for reading text out of a PDF.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Error handling mode for individual pages
    pub error_mode: ErrorMode,

    /// Which pages to read
    pub pages: PageSelection,

    /// Whether to slice out target sections or keep the whole text
    pub scope: ExtractScope,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole read when any page cannot be decoded.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set extraction scope.
    pub fn with_scope(mut self, scope: ExtractScope) -> Self {
        self.scope = scope;
        self
    }

    /// Compare the full document text instead of target sections.
    pub fn whole_document(mut self) -> Self {
        self.scope = ExtractScope::WholeDocument;
        self
    }
}

/// Error handling mode for per-page text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be decoded
    Strict,
    /// Record the page as text-less and continue
    #[default]
    Lenient,
}

/// What part of the document text is handed to the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractScope {
    /// Only efficacy, dosage and precautions sections
    #[default]
    TargetSections,
    /// All page text, no section slicing
    WholeDocument,
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Read all pages
    #[default]
    All,
    /// Read a range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Read several ranges, sorted with overlapping or adjacent ranges merged
    Pages(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be read.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Lowest selected page above `total`, if any.
    pub fn first_beyond(&self, total: u32) -> Option<u32> {
        let ranges = match self {
            PageSelection::All => return None,
            PageSelection::Range(range) => std::slice::from_ref(range),
            PageSelection::Pages(ranges) => ranges.as_slice(),
        };
        ranges
            .iter()
            .find(|r| *r.end() > total)
            .map(|r| (*r.start()).max(total.saturating_add(1)))
    }

    /// Parse a page selection string (e.g., "all", "1-10", "1,3,5-7").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(s.to_string()));
                    }
                    start..=end
                }
                None => {
                    let page = parse_page(part, s)?;
                    page..=page
                }
            };
            ranges.push(range);
        }

        if !s.contains(',') && s.contains('-') {
            if let Some(range) = ranges.pop() {
                return Ok(PageSelection::Range(range));
            }
        }
        Ok(PageSelection::Pages(merge_ranges(ranges)))
    }
}

fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_by_key(|r| (*r.start(), *r.end()));

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(Error::InvalidPageRange(whole.to_string())),
    }
}
