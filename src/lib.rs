//! # labeldiff
//!
//! Compare two versions of a pharmaceutical package insert and highlight
//! the changes that matter.
//!
//! The pipeline extracts page text from each PDF, keeps only the target
//! sections (efficacy, dosage, precautions), normalizes away cosmetic
//! differences (line wrapping, spacing, sentence-ending variants, layout
//! noise), diffs the results and renders an HTML diff.
//!
//! ## Quick Start
//!
//! ```no_run
//! use labeldiff::{compare, extract_sections_from_path, Comparison};
//!
//! let old = extract_sections_from_path("old.pdf");
//! let new = extract_sections_from_path("new.pdf");
//!
//! match compare(&old, &new) {
//!     Comparison::NothingToCompare { side } => println!("No target sections ({:?})", side),
//!     Comparison::Identical(_) => println!("No differences"),
//!     Comparison::Changed(report) => println!("{}", report.markup),
//! }
//! ```
//!
//! ## Features
//!
//! - **Section extraction**: header vocabulary tuned to Korean package inserts
//! - **Normalization**: smart line join, noise stripping, suffix unification
//! - **Diffing**: Ratcliff/Obershelp matching, word or character granularity
//! - **Rendering**: inline-styled HTML, JSON export, custom visitors
//! - **Parallel processing**: both documents on Rayon when enabled

pub mod compare;
pub mod detect;
pub mod diff;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod render;
pub mod section;

// Re-export commonly used types
pub use compare::{Comparator, Comparison, DiffReport, FileComparison, Side, Strategy};
pub use detect::{detect_pdf_version, is_pdf_bytes, PdfVersion};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, ExtractScope, LopdfSource, PageSelection, TextSource};
pub use model::{
    DiffScript, DiffStats, EditOp, ExtractedDocument, Granularity, OpKind, RawPage, RawPages,
    Section, SectionCategory, SectionHeader,
};
pub use normalize::{normalize, NormalizeOptions, Normalizer, SuffixTable};
pub use render::{DiffVisitor, HtmlRenderer, JsonFormat, RenderOptions, Rendered};
pub use section::{extract_sections, HeaderVocabulary, SectionExtractor};

use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};

fn default_comparator() -> &'static Comparator {
    static DEFAULT: OnceLock<Comparator> = OnceLock::new();
    DEFAULT.get_or_init(Comparator::new)
}

/// Extract the labeled target sections of a PDF file.
///
/// Returns an empty string when the file cannot be read or has no target
/// sections; the failure is logged, not returned.
///
/// # Example
///
/// ```no_run
/// use labeldiff::extract_sections_from_path;
///
/// let sections = extract_sections_from_path("insert.pdf");
/// println!("{}", sections);
/// ```
pub fn extract_sections_from_path<P: AsRef<Path>>(path: P) -> String {
    default_comparator().extract_sections_from_path(path)
}

/// Extract the labeled target sections of an in-memory PDF.
pub fn extract_sections_from_bytes(data: &[u8]) -> String {
    default_comparator().extract_sections_from_bytes(data)
}

/// Extract the labeled target sections of a PDF read from `reader`.
pub fn extract_sections_from_reader<R: Read>(reader: R) -> String {
    default_comparator().extract_sections_from_reader(reader)
}

/// Compare two extracted texts with the default word-granularity pipeline.
///
/// # Example
///
/// ```
/// use labeldiff::compare;
///
/// let outcome = compare("효과가 있습니다.", "효과가 있다.");
/// assert!(outcome.is_identical());
///
/// let outcome = compare("1일 2회 복용합니다", "1일 3회 복용한다");
/// assert!(outcome.is_changed());
/// ```
pub fn compare(text_a: &str, text_b: &str) -> Comparison {
    default_comparator().compare(text_a, text_b)
}

/// Builder for a configured [`Comparator`].
///
/// # Example
///
/// ```no_run
/// use labeldiff::{Granularity, LabelDiff, PageSelection, SectionCategory};
///
/// let comparator = LabelDiff::new()
///     .granularity(Granularity::Character)
///     .with_targets([SectionCategory::Dosage])
///     .with_pages(PageSelection::parse("1-4")?)
///     .parallel(true)
///     .build();
///
/// let result = comparator.compare_files("old.pdf", "new.pdf");
/// println!("{:?}", result.comparison.is_changed());
/// # Ok::<(), labeldiff::Error>(())
/// ```
#[derive(Clone)]
pub struct LabelDiff {
    granularity: Granularity,
    suffixes: Option<SuffixTable>,
    vocabulary: Option<HeaderVocabulary>,
    targets: Option<Vec<SectionCategory>>,
    autojunk: bool,
    suppress_cosmetic: Option<bool>,
    extract_options: ExtractOptions,
    render_options: Option<RenderOptions>,
    parallel: bool,
    source: Option<Arc<dyn TextSource>>,
}

impl LabelDiff {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            granularity: Granularity::default(),
            suffixes: None,
            vocabulary: None,
            targets: None,
            autojunk: true,
            suppress_cosmetic: None,
            extract_options: ExtractOptions::default(),
            render_options: None,
            parallel: false,
            source: None,
        }
    }

    /// Set the comparison granularity.
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Replace the sentence-ending rules.
    pub fn with_suffix_table(mut self, suffixes: SuffixTable) -> Self {
        self.suffixes = Some(suffixes);
        self
    }

    /// Replace the header vocabulary.
    pub fn vocabulary(mut self, vocabulary: HeaderVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Restrict which section categories are compared.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = SectionCategory>) -> Self {
        self.targets = Some(targets.into_iter().collect());
        self
    }

    /// Enable or disable the popular-token heuristic of the matcher.
    pub fn autojunk(mut self, autojunk: bool) -> Self {
        self.autojunk = autojunk;
        self
    }

    /// Override suppression of spacing-only changes.
    pub fn suppress_cosmetic(mut self, suppress: bool) -> Self {
        self.suppress_cosmetic = Some(suppress);
        self
    }

    /// Compare whole documents instead of target sections.
    pub fn whole_document(mut self) -> Self {
        self.extract_options = self.extract_options.whole_document();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Fail extraction on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = Some(options);
        self
    }

    /// Process both documents in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a different text source.
    pub fn with_source(mut self, source: Arc<dyn TextSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolve the configuration into a comparator.
    pub fn build(self) -> Comparator {
        let mut strategy = Strategy::for_granularity(self.granularity);
        if let Some(suffixes) = self.suffixes {
            let options = strategy.normalizer().options().clone().with_suffixes(suffixes);
            strategy = strategy.with_normalizer(Normalizer::new(options));
        }
        if let Some(suppress) = self.suppress_cosmetic {
            strategy = strategy.with_suppress_cosmetic(suppress);
        }
        if let Some(options) = self.render_options {
            strategy = strategy.with_render_options(options);
        }

        let mut extractor = SectionExtractor::new(self.vocabulary.unwrap_or_default());
        if let Some(targets) = self.targets {
            extractor = extractor.with_targets(targets);
        }

        let source = self
            .source
            .unwrap_or_else(|| Arc::new(LopdfSource::new()));

        log::debug!(
            "Comparator: {:?} granularity, source {}, autojunk {}, parallel {}",
            self.granularity,
            source.name(),
            self.autojunk,
            self.parallel
        );

        Comparator::from_parts(
            source,
            extractor,
            self.extract_options,
            strategy,
            self.autojunk,
            self.parallel,
        )
    }
}

impl Default for LabelDiff {
    fn default() -> Self {
        Self::new()
    }
}
