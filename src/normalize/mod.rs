//! Text normalization.
//!
//! Rewrites raw section text into the canonical form that is compared.
//! The pipeline is an ordered list of the pure rules in [`rules`] plus a
//! pluggable [`SuffixTable`]:
//!
//! 1. canonicalize (NFC, `\r\n` → `\n`)
//! 2. strip UI noise
//! 3. reflow line breaks ([`BreakMode`])
//! 4. tabs → spaces
//! 5. strip punctuation
//! 6. suffix unification
//! 7. collapse whitespace
//!
//! The pipeline is repeated until its output stops changing, so
//! `normalize(normalize(x)) == normalize(x)`. Every pass either shortens the
//! text or turns line breaks into spaces, so the repetition terminates.

pub mod rules;
mod suffix;

pub use suffix::{Rewrite, SuffixRule, SuffixTable};

use std::sync::OnceLock;

/// How single line breaks are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakMode {
    /// Keep semantic breaks, join soft wraps.
    #[default]
    SmartJoin,
    /// Every break becomes a space.
    Flatten,
}

/// Normalization options.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Remove download links, URLs, dates and similar layout noise.
    pub strip_noise: bool,

    /// Line-break handling.
    pub break_mode: BreakMode,

    /// Remove commas, quotes and backticks.
    pub strip_punctuation: bool,

    /// Sentence-ending unification rules.
    pub suffixes: SuffixTable,

    /// Optional cap on pipeline passes. `None` runs to a fixed point; a
    /// cap trades idempotence on deeply nested noise for bounded work.
    pub max_passes: Option<usize>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::word()
    }
}

impl NormalizeOptions {
    /// Options for word-granularity comparison (smart line join).
    pub fn word() -> Self {
        Self {
            strip_noise: true,
            break_mode: BreakMode::SmartJoin,
            strip_punctuation: true,
            suffixes: SuffixTable::korean(),
            max_passes: None,
        }
    }

    /// Options for character-granularity comparison (all breaks flattened).
    pub fn character() -> Self {
        Self {
            break_mode: BreakMode::Flatten,
            ..Self::word()
        }
    }

    /// Enable or disable noise stripping.
    pub fn with_strip_noise(mut self, strip: bool) -> Self {
        self.strip_noise = strip;
        self
    }

    /// Set the line-break mode.
    pub fn with_break_mode(mut self, mode: BreakMode) -> Self {
        self.break_mode = mode;
        self
    }

    /// Enable or disable punctuation stripping.
    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    /// Replace the suffix table.
    pub fn with_suffixes(mut self, suffixes: SuffixTable) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Cap the number of passes (at least one pass always runs).
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes.max(1));
        self
    }
}

/// The normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Word-granularity normalizer.
    pub fn word() -> Self {
        Self::new(NormalizeOptions::word())
    }

    /// Character-granularity normalizer.
    pub fn character() -> Self {
        Self::new(NormalizeOptions::character())
    }

    /// Options in use.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize `text`. Total: any input yields a string, empty in → empty out.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut current = self.pass(text);
        let mut passes = 1;
        while self.options.max_passes.map_or(true, |cap| passes < cap) {
            let next = self.pass(&current);
            if next == current {
                break;
            }
            current = next;
            passes += 1;
        }
        log::trace!("Normalized {} bytes in {} passes", text.len(), passes);
        current
    }

    fn pass(&self, text: &str) -> String {
        let mut text = rules::canonicalize(text);

        if self.options.strip_noise {
            text = rules::strip_noise(&text);
        }
        text = match self.options.break_mode {
            BreakMode::SmartJoin => rules::smart_join(&text),
            BreakMode::Flatten => rules::flatten_breaks(&text),
        };
        text = rules::replace_tabs(&text);
        if self.options.strip_punctuation {
            text = rules::strip_punctuation(&text);
        }
        text = self.options.suffixes.apply(&text);

        rules::collapse_whitespace(&text)
    }
}

/// Normalize with the default word-granularity pipeline.
///
/// # Example
///
/// ```
/// use labeldiff::normalize::normalize;
///
/// assert_eq!(normalize("효과가\n있습니다."), "효과가 있다.");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::word).normalize(text)
}
