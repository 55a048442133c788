//! End-to-end comparison of two document versions.
//!
//! A [`Comparator`] owns one resolved configuration: the text source, the
//! section extractor, and a [`Strategy`] whose normalizer, tokenizer,
//! filter and renderer all agree on one [`Granularity`].

use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::diff::{suppress_cosmetic, SequenceMatcher, Tokenizer};
use crate::error::Result;
use crate::extract::{ExtractOptions, ExtractScope, LopdfSource, TextSource};
use crate::model::{DiffScript, DiffStats, Granularity, RawPages};
use crate::normalize::Normalizer;
use crate::render::{HtmlRenderer, RenderOptions, Rendered};
use crate::section::SectionExtractor;

/// The matched set of pipeline stages for one granularity.
#[derive(Debug, Clone)]
pub struct Strategy {
    granularity: Granularity,
    normalizer: Normalizer,
    tokenizer: Tokenizer,
    suppress_cosmetic: bool,
    renderer: HtmlRenderer,
}

impl Strategy {
    /// Stages for `granularity`.
    ///
    /// Word: smart line join, word tokens, no spacing filter.
    /// Character: flattened breaks, character tokens, spacing-only changes
    /// suppressed.
    pub fn for_granularity(granularity: Granularity) -> Self {
        let (normalizer, suppress_cosmetic) = match granularity {
            Granularity::Word => (Normalizer::word(), false),
            Granularity::Character => (Normalizer::character(), true),
        };

        Self {
            granularity,
            normalizer,
            tokenizer: Tokenizer::new(granularity),
            suppress_cosmetic,
            renderer: HtmlRenderer::new(granularity),
        }
    }

    /// Replace the normalizer.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Enable or disable suppression of spacing-only changes.
    pub fn with_suppress_cosmetic(mut self, suppress: bool) -> Self {
        self.suppress_cosmetic = suppress;
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.renderer = self.renderer.with_options(options);
        self
    }

    /// Granularity every stage was resolved for.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Normalizer applied to both texts before tokenizing.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Tokenizer matching the granularity.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Whether spacing-only ops are turned into `equal` before rendering.
    pub fn suppresses_cosmetic(&self) -> bool {
        self.suppress_cosmetic
    }

    /// Renderer for changed scripts.
    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::for_granularity(Granularity::default())
    }
}

/// Which input had no comparable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Only the old input
    Old,
    /// Only the new input
    New,
    /// Neither input
    Both,
}

/// A comparison with at least one change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// Rendered HTML
    pub markup: String,
    /// Tokens and ops
    pub script: DiffScript,
    /// Op and token counts
    pub stats: DiffStats,
}

/// Outcome of comparing two extracted texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Comparison {
    /// One or both inputs were empty: no target sections were found, or
    /// the document could not be read.
    NothingToCompare {
        /// Which input was empty
        side: Side,
    },
    /// Both inputs normalize to the same content.
    Identical(DiffScript),
    /// The inputs differ.
    Changed(DiffReport),
}

impl Comparison {
    /// True when at least one input had nothing to compare.
    pub fn is_nothing_to_compare(&self) -> bool {
        matches!(self, Comparison::NothingToCompare { .. })
    }

    /// True when both inputs normalize to the same tokens.
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical(_))
    }

    /// True when the inputs differ after normalization.
    pub fn is_changed(&self) -> bool {
        matches!(self, Comparison::Changed(_))
    }

    /// The report, when the inputs differ.
    pub fn report(&self) -> Option<&DiffReport> {
        match self {
            Comparison::Changed(report) => Some(report),
            _ => None,
        }
    }

    /// The edit script, when a diff was computed.
    pub fn script(&self) -> Option<&DiffScript> {
        match self {
            Comparison::Identical(script) => Some(script),
            Comparison::Changed(report) => Some(&report.script),
            Comparison::NothingToCompare { .. } => None,
        }
    }
}

/// Extracted texts of two files together with their comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    /// Labeled section text extracted from the old file
    pub old_text: String,
    /// Labeled section text extracted from the new file
    pub new_text: String,
    /// Outcome of comparing the two texts
    pub comparison: Comparison,
}

/// Resolved comparison pipeline.
#[derive(Clone)]
pub struct Comparator {
    source: Arc<dyn TextSource>,
    extractor: SectionExtractor,
    extract_options: ExtractOptions,
    strategy: Strategy,
    autojunk: bool,
    parallel: bool,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("source", &self.source.name())
            .field("extract_options", &self.extract_options)
            .field("granularity", &self.strategy.granularity)
            .field("autojunk", &self.autojunk)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl Comparator {
    /// Comparator with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(LopdfSource::new()),
            SectionExtractor::default(),
            ExtractOptions::default(),
            Strategy::default(),
            true,
            false,
        )
    }

    pub(crate) fn from_parts(
        source: Arc<dyn TextSource>,
        extractor: SectionExtractor,
        extract_options: ExtractOptions,
        strategy: Strategy,
        autojunk: bool,
        parallel: bool,
    ) -> Self {
        Self {
            source,
            extractor,
            extract_options,
            strategy,
            autojunk,
            parallel,
        }
    }

    /// Stages used for normalizing, diffing and rendering.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Section extractor applied to each document.
    pub fn extractor(&self) -> &SectionExtractor {
        &self.extractor
    }

    /// Options passed to the text source.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Extract labeled target sections from document bytes.
    ///
    /// Never fails: an unreadable document yields an empty string, which
    /// [`compare`](Self::compare) reports as nothing to compare.
    pub fn extract_sections_from_bytes(&self, data: &[u8]) -> String {
        self.sections_of(self.source.read_pages(data, &self.extract_options))
    }

    /// Extract labeled target sections from a file. See
    /// [`extract_sections_from_bytes`](Self::extract_sections_from_bytes).
    pub fn extract_sections_from_path<P: AsRef<Path>>(&self, path: P) -> String {
        let path = path.as_ref();
        log::debug!("Reading {} with {}", path.display(), self.source.name());
        self.sections_of(self.source.read_path(path, &self.extract_options))
    }

    /// Extract labeled target sections from a reader.
    pub fn extract_sections_from_reader<R: Read>(&self, mut reader: R) -> String {
        self.sections_of(self.source.read_reader(&mut reader, &self.extract_options))
    }

    fn sections_of(&self, pages: Result<RawPages>) -> String {
        let pages = match pages {
            Ok(pages) => pages,
            Err(e) => {
                log::warn!("Text extraction failed: {}", e);
                return String::new();
            }
        };

        let full_text = pages.full_text();
        match self.extract_options.scope {
            ExtractScope::TargetSections => self.extractor.extract_labeled(&full_text),
            ExtractScope::WholeDocument => full_text,
        }
    }

    /// Normalize with this comparator's strategy.
    pub fn normalize(&self, text: &str) -> String {
        self.strategy.normalizer.normalize(text)
    }

    /// Tokenize and diff two normalized texts.
    pub fn diff_script(&self, normalized_a: &str, normalized_b: &str) -> DiffScript {
        let tokens_a = self.strategy.tokenizer.tokenize(normalized_a);
        let tokens_b = self.strategy.tokenizer.tokenize(normalized_b);

        let mut ops = SequenceMatcher::new(&tokens_a, &tokens_b)
            .with_autojunk(self.autojunk)
            .opcodes();
        if self.strategy.suppress_cosmetic {
            ops = suppress_cosmetic(ops, &tokens_a, &tokens_b);
        }

        log::debug!(
            "Diffed {} / {} tokens into {} ops",
            tokens_a.len(),
            tokens_b.len(),
            ops.len()
        );
        DiffScript::new(self.strategy.granularity, tokens_a, tokens_b, ops)
    }

    /// Compare two extracted texts.
    pub fn compare(&self, text_a: &str, text_b: &str) -> Comparison {
        let side = match (text_a.trim().is_empty(), text_b.trim().is_empty()) {
            (true, true) => Some(Side::Both),
            (true, false) => Some(Side::Old),
            (false, true) => Some(Side::New),
            (false, false) => None,
        };
        if let Some(side) = side {
            log::debug!("Nothing to compare ({:?} side empty)", side);
            return Comparison::NothingToCompare { side };
        }

        let (normalized_a, normalized_b) = if self.parallel {
            rayon::join(|| self.normalize(text_a), || self.normalize(text_b))
        } else {
            (self.normalize(text_a), self.normalize(text_b))
        };

        let script = self.diff_script(&normalized_a, &normalized_b);
        match self.strategy.renderer.render_script(&script) {
            Rendered::NoDifferences => Comparison::Identical(script),
            Rendered::Markup(markup) => {
                let stats = script.stats();
                Comparison::Changed(DiffReport {
                    markup,
                    script,
                    stats,
                })
            }
        }
    }

    /// Extract both files and compare them.
    pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(&self, old: P, new: Q) -> FileComparison {
        let (old, new) = (old.as_ref(), new.as_ref());
        let (old_text, new_text) = if self.parallel {
            rayon::join(
                || self.extract_sections_from_path(old),
                || self.extract_sections_from_path(new),
            )
        } else {
            (
                self.extract_sections_from_path(old),
                self.extract_sections_from_path(new),
            )
        };

        let comparison = self.compare(&old_text, &new_text);
        FileComparison {
            old_text,
            new_text,
            comparison,
        }
    }

    /// Extract both documents from memory and compare them.
    pub fn compare_bytes(&self, old: &[u8], new: &[u8]) -> FileComparison {
        let (old_text, new_text) = if self.parallel {
            rayon::join(
                || self.extract_sections_from_bytes(old),
                || self.extract_sections_from_bytes(new),
            )
        } else {
            (
                self.extract_sections_from_bytes(old),
                self.extract_sections_from_bytes(new),
            )
        };

        let comparison = self.compare(&old_text, &new_text);
        FileComparison {
            old_text,
            new_text,
            comparison,
        }
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}
