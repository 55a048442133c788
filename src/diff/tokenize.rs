//! Splitting normalized text into comparison tokens.

use regex::Regex;

use crate::model::Granularity;

/// The token that stands for a retained line break.
pub const LINE_BREAK: &str = "\n";

/// Splits normalized text into tokens for one [`Granularity`].
#[derive(Debug, Clone)]
pub struct Tokenizer {
    granularity: Granularity,
    word_regex: Regex,
}

impl Tokenizer {
    /// Create a tokenizer.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            word_regex: Regex::new(r"\S+|\n").expect("valid regex"),
        }
    }

    /// Granularity of the produced tokens.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Split `text` into tokens.
    ///
    /// Word tokens are maximal non-whitespace runs; every `\n` is a token of
    /// its own. Character tokens are single `char`s, whitespace included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self.granularity {
            Granularity::Word => self
                .word_regex
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
            Granularity::Character => text.chars().map(String::from).collect(),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Granularity::Word)
    }
}
