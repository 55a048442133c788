//! Sentence-ending unification.
//!
//! A [`SuffixTable`] is an ordered list of regex rewrites that collapse
//! politeness and tense variants of a sentence ending into one canonical
//! form. The table is data: documents in another language supply their own
//! rules, or [`SuffixTable::none`].

use regex::{Captures, Regex};

use crate::error::{Error, Result};

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const FINAL_COUNT: u32 = 28;
const FINAL_BIEUP: u32 = 17;
const FINAL_NIEUN: u32 = 4;

/// Descriptive stems whose plain form is `<stem>다`, not `<stem>ㄴ다`.
const ADJECTIVE_STEMS: &[&str] = &[
    "아니", "크", "필요하", "중요하", "가능하", "적절하", "충분하", "동일하", "유사하",
    "안전하", "위험하", "곤란하", "다양하", "미미하", "상이하", "불분명하", "명확하",
];

/// Replacement applied to each match of a [`SuffixRule`].
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// `regex` replacement template (`$1`, `${name}` expand).
    Template(String),
    /// Computed replacement.
    Func(fn(&Captures<'_>) -> String),
}

/// One pattern and its rewrite.
#[derive(Debug, Clone)]
pub struct SuffixRule {
    pattern: Regex,
    rewrite: Rewrite,
}

impl SuffixRule {
    /// Compile a template rule.
    pub fn template(pattern: &str, template: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile(pattern)?,
            rewrite: Rewrite::Template(template.to_string()),
        })
    }

    /// Compile a rule with a computed replacement.
    pub fn func(pattern: &str, rewrite: fn(&Captures<'_>) -> String) -> Result<Self> {
        Ok(Self {
            pattern: compile(pattern)?,
            rewrite: Rewrite::Func(rewrite),
        })
    }

    /// Apply this rule to every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        match &self.rewrite {
            Rewrite::Template(template) => self
                .pattern
                .replace_all(text, template.as_str())
                .into_owned(),
            Rewrite::Func(f) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| f(caps))
                .into_owned(),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Other(format!("Invalid suffix pattern: {}", e)))
}

/// Ordered suffix rewrite rules.
#[derive(Debug, Clone)]
pub struct SuffixTable {
    rules: Vec<SuffixRule>,
}

impl SuffixTable {
    /// Table without rules; `apply` returns its input unchanged.
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    /// Korean formal endings collapsed to the plain `-다` form.
    ///
    /// - `했습니다` → `했다`, `있습니다` → `있다`
    /// - `입니다` → `이다`
    /// - `합니다` → `한다`, `됩니다` → `된다`
    /// - `필요합니다` → `필요하다`, `아닙니다` → `아니다`
    ///
    /// The last two forms depend on whether the stem is a verb or an
    /// adjective. Only the adjectives in a short built-in list get the bare
    /// `-다` form; any other adjective is rewritten like a verb (`편합니다` →
    /// `편한다`) and will differ from a source that already reads `편하다`.
    pub fn korean() -> Self {
        let rules = vec![
            SuffixRule::template(r"(했|였|았|었|겠)?(?:습니|옵니|비니)?다\b", "${1}다"),
            SuffixRule::template(r"입니다\b", "이다"),
            SuffixRule::func(r"([가-힣]*)([가-힣])니다\b", bieup_ending),
        ];

        Self {
            rules: rules
                .into_iter()
                .collect::<Result<Vec<_>>>()
                .expect("built-in suffix patterns are valid"),
        }
    }

    /// Append a template rule.
    pub fn push_rule(&mut self, pattern: &str, template: &str) -> Result<()> {
        self.rules.push(SuffixRule::template(pattern, template)?);
        Ok(())
    }

    /// Append a compiled rule.
    pub fn with_rule(mut self, rule: SuffixRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Apply every rule in order.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            result = rule.apply(&result);
        }
        result
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for SuffixTable {
    fn default() -> Self {
        Self::korean()
    }
}

/// `합니다` → `한다`: a syllable closed by ㅂ before `니다` takes ㄴ instead,
/// unless the open stem is a listed adjective (`필요합니다` → `필요하다`).
/// Other syllables are left as matched.
fn bieup_ending(caps: &Captures<'_>) -> String {
    let prefix = &caps[1];
    let syllable = caps[2].chars().next().unwrap_or_default();
    let code = syllable as u32;

    if !(HANGUL_BASE..=HANGUL_LAST).contains(&code)
        || (code - HANGUL_BASE) % FINAL_COUNT != FINAL_BIEUP
    {
        return caps[0].to_string();
    }

    let (Some(open), Some(nieun)) = (
        char::from_u32(code - FINAL_BIEUP),
        char::from_u32(code - FINAL_BIEUP + FINAL_NIEUN),
    ) else {
        return caps[0].to_string();
    };

    let stem = format!("{}{}", prefix, open);
    if ADJECTIVE_STEMS.iter().any(|adjective| stem.ends_with(adjective)) {
        format!("{}다", stem)
    } else {
        format!("{}{}다", prefix, nieun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formal_endings() {
        let table = SuffixTable::korean();
        assert_eq!(table.apply("효과가 있습니다."), "효과가 있다.");
        assert_eq!(table.apply("개선되었습니다"), "개선되었다");
        assert_eq!(table.apply("확인하겠습니다"), "확인하겠다");
        assert_eq!(table.apply("정제입니다"), "정제이다");
    }

    #[test]
    fn test_bieup_final_becomes_nieun() {
        let table = SuffixTable::korean();
        assert_eq!(table.apply("1일 2회 복용합니다"), "1일 2회 복용한다");
        assert_eq!(table.apply("흡수됩니다."), "흡수된다.");
    }

    #[test]
    fn test_listed_adjectives_keep_plain_form() {
        let table = SuffixTable::korean();
        assert_eq!(table.apply("투여가 필요합니다."), "투여가 필요하다.");
        assert_eq!(table.apply("필요하다"), "필요하다");
        assert_eq!(table.apply("적응증이 아닙니다"), "적응증이 아니다");
        assert_eq!(table.apply("위험이 큽니다"), "위험이 크다");
        assert_eq!(table.apply("투여가 가능합니다"), table.apply("투여가 가능하다"));
    }

    #[test]
    fn test_other_syllables_untouched() {
        let table = SuffixTable::korean();
        assert_eq!(table.apply("아니다"), "아니다");
        assert_eq!(table.apply("다음 환자"), "다음 환자");
        assert_eq!(table.apply("복용한다"), "복용한다");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let table = SuffixTable::korean();
        for input in ["있습니다", "입니다", "합니다", "했습니다 그리고 됩니다", "아닙니다"] {
            let once = table.apply(input);
            assert_eq!(table.apply(&once), once);
        }
    }

    #[test]
    fn test_none_is_noop() {
        let table = SuffixTable::none();
        assert!(table.is_empty());
        assert_eq!(table.apply("있습니다"), "있습니다");
    }

    #[test]
    fn test_push_rule() {
        let mut table = SuffixTable::none();
        table.push_rule(r"colour", "color").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.apply("colour chart"), "color chart");
        assert!(table.push_rule("(", "x").is_err());
    }
}
