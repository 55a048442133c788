//! Individual normalization rules.
//!
//! Each rule is a total `&str -> String` transformation. The pipeline in
//! [`super::Normalizer`] applies them in a fixed order; they are public so
//! that every heuristic can be tested (and tuned) on its own.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Characters after which a line break is kept as a sentence boundary.
const SENTENCE_FINAL: &[char] = &['.', ':', ']', ')', '>', '!', '?', '】'];

/// Characters that open a list item when they start a line.
const LIST_OPENERS: &[char] = &[
    '•', '-', '*', '[', '【', '●', '○', '■', '□', '◆', '◇', '▪', '▫', '►', '▻', '※',
];

/// Characters removed by [`strip_punctuation`].
const STRIPPED_PUNCTUATION: &[char] = &[',', '\'', '"', '`', '‘', '’', '“', '”'];

/// UI chrome and layout noise, in application order.
const NOISE_PATTERNS: &[&str] = &[
    // "PDF 다운로드" style links
    r"(?i)(?:PDF|XML|HTML)\s*다운로드",
    r"변경\s*이력",
    r"https?://\S+",
    // 2024.01.15 / 24. 1. 5
    r"\d{2,4}[. ]+\d{1,2}[. ]+\d{1,2}\.?",
    r"(?:오전|오후)\s*\d{1,2}\s*:\s*\d{2}(?:\s*:\s*\d{2})?",
    // page counters such as 3/12
    r"\b\d+\s*/\s*\d+\b",
    r"cacheSeq=[a-zA-Z0-9]+",
];

fn noise_regexes() -> &'static [Regex] {
    static NOISE: OnceLock<Vec<Regex>> = OnceLock::new();
    NOISE.get_or_init(|| {
        NOISE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("valid noise pattern"))
            .collect()
    })
}

/// Compose to NFC and fold `\r\n` / `\r` into `\n`.
pub fn canonicalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").nfc().collect()
}

/// Remove download links, change-history labels, URLs, dates, times of day,
/// `n/m` page numbers and cache-key query parameters.
pub fn strip_noise(text: &str) -> String {
    let mut result = text.to_string();
    for re in noise_regexes() {
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

/// Reflow soft-wrapped lines.
///
/// A single `\n` is kept when the character before it ends a sentence or
/// the character after it opens a list item; otherwise it becomes a space.
/// Runs of two or more breaks are paragraph separators and are left as is.
/// A break at the very start of the text has no preceding character and is
/// judged on the following one only.
pub fn smart_join(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            let next = chars.peek().copied();
            let in_run = prev == Some('\n') || next == Some('\n');
            let keep = in_run
                || prev.is_some_and(|p| SENTENCE_FINAL.contains(&p))
                || next.is_some_and(|n| LIST_OPENERS.contains(&n));
            out.push(if keep { '\n' } else { ' ' });
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Turn every line break into a space (character-granularity mode).
pub fn flatten_breaks(text: &str) -> String {
    text.replace('\n', " ")
}

/// Replace tab characters with single spaces.
pub fn replace_tabs(text: &str) -> String {
    text.replace('\t', " ")
}

/// Replace commas, quote marks and backticks with a space.
///
/// List glyphs and brackets are structural and are not touched.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if STRIPPED_PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect()
}

/// Collapse horizontal whitespace to one space, trim the text, and drop
/// spaces next to a line break.
pub fn collapse_whitespace(text: &str) -> String {
    static HORIZONTAL: OnceLock<Regex> = OnceLock::new();
    static AROUND_BREAK: OnceLock<Regex> = OnceLock::new();

    let horizontal = HORIZONTAL.get_or_init(|| Regex::new(r"[^\S\n]+").expect("valid regex"));
    let around_break = AROUND_BREAK.get_or_init(|| Regex::new(r" *\n *").expect("valid regex"));

    let collapsed = horizontal.replace_all(text, " ");
    around_break
        .replace_all(collapsed.trim(), "\n")
        .into_owned()
}
