//! Header vocabulary: which lines look like section headers, and which
//! target category a header belongs to.
//!
//! The default vocabulary is tuned to Korean pharmaceutical package inserts
//! (의약품 첨부문서). It is a heuristic for that document family, not a
//! general section detector: a header is any line that starts with optional
//! bullet/number clutter, continues with one of a fixed set of keywords, and
//! ends within a short trailing window.

use crate::model::SectionCategory;

/// Default number of characters allowed after the keyword on a header line.
pub const DEFAULT_MAX_TRAILING: usize = 50;

/// Characters allowed before the keyword on a header line.
const LEADING_CLUTTER: &str = r"[\s\d.•\[【|·\-]*";

/// Keyword and synonym tables for header detection and classification.
#[derive(Debug, Clone)]
pub struct HeaderVocabulary {
    /// Keywords that make a line a header candidate. Includes non-target
    /// headers (storage, packaging, ...) so that they terminate the section
    /// before them.
    keywords: Vec<String>,

    /// Synonyms per target category, tested by containment.
    synonyms: Vec<(SectionCategory, Vec<String>)>,

    /// Maximum characters after the keyword on the same line.
    max_trailing: usize,
}

impl HeaderVocabulary {
    /// Create a vocabulary from keyword and synonym tables.
    ///
    /// Empty keywords and synonyms are dropped.
    pub fn new<K, S>(keywords: K, synonyms: Vec<(SectionCategory, Vec<S>)>) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.trim().is_empty())
                .collect(),
            synonyms: synonyms
                .into_iter()
                .map(|(category, words)| {
                    let words = words
                        .into_iter()
                        .map(Into::into)
                        .filter(|w: &String| !w.is_empty())
                        .collect();
                    (category, words)
                })
                .collect(),
            max_trailing: DEFAULT_MAX_TRAILING,
        }
    }

    /// Vocabulary for Korean package inserts.
    pub fn korean_package_insert() -> Self {
        Self::new(
            [
                // target headers
                "효능", "효과", "용법", "용량", "투여", "주의사항", "사용상의 주의", "경고",
                // boundary-only headers
                "성상", "저장", "보관", "기간", "원료", "제조", "포장", "구성",
            ],
            vec![
                (SectionCategory::Efficacy, vec!["효능", "효과"]),
                (SectionCategory::Dosage, vec!["용법", "용량", "투여"]),
                (SectionCategory::Precautions, vec!["주의", "경고", "환자"]),
            ],
        )
    }

    /// Set the trailing-window length.
    pub fn with_max_trailing(mut self, chars: usize) -> Self {
        self.max_trailing = chars;
        self
    }

    /// Header keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Trailing-window length.
    pub fn max_trailing(&self) -> usize {
        self.max_trailing
    }

    /// Build the multi-line header regex source.
    ///
    /// Every keyword character may be separated by whitespace, so `효 능`
    /// matches `효능`. Returns `None` when there are no keywords.
    pub fn header_pattern(&self) -> Option<String> {
        if self.keywords.is_empty() {
            return None;
        }

        let alternatives: Vec<String> = self
            .keywords
            .iter()
            .map(|keyword| {
                keyword
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| regex::escape(&c.to_string()))
                    .collect::<Vec<_>>()
                    .join(r"\s*")
            })
            .collect();

        Some(format!(
            r"(?m)^{}(?:{})[^\n]{{0,{}}}$",
            LEADING_CLUTTER,
            alternatives.join("|"),
            self.max_trailing
        ))
    }

    /// Categories whose synonyms occur in a sanitized header key.
    ///
    /// Classification is pure containment; a key may match several
    /// categories or none.
    pub fn classify(&self, key: &str) -> Vec<SectionCategory> {
        self.synonyms
            .iter()
            .filter(|(_, words)| words.iter().any(|w| key.contains(w.as_str())))
            .map(|(category, _)| *category)
            .collect()
    }
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        Self::korean_package_insert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_pattern_allows_internal_whitespace() {
        let vocab = HeaderVocabulary::korean_package_insert();
        let re = Regex::new(&vocab.header_pattern().unwrap()).unwrap();
        assert!(re.is_match("효 능 효 과"));
        assert!(re.is_match("【용법 · 용량】"));
        assert!(re.is_match("3. 사용상의 주의사항"));
        assert!(!re.is_match("이 약은 해열 작용이 있다"));
    }

    #[test]
    fn test_pattern_respects_trailing_window() {
        let vocab = HeaderVocabulary::korean_package_insert().with_max_trailing(3);
        let re = Regex::new(&vocab.header_pattern().unwrap()).unwrap();
        assert!(re.is_match("저장방법"));
        assert!(!re.is_match("저장방법: 밀봉용기 실온보관"));
    }

    #[test]
    fn test_classify() {
        let vocab = HeaderVocabulary::default();
        assert_eq!(vocab.classify("효능효과"), vec![SectionCategory::Efficacy]);
        assert_eq!(
            vocab.classify("투여시주의사항"),
            vec![SectionCategory::Dosage, SectionCategory::Precautions]
        );
        assert!(vocab.classify("저장방법").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_has_no_pattern() {
        let vocab = HeaderVocabulary::new(
            Vec::<String>::new(),
            Vec::<(SectionCategory, Vec<String>)>::new(),
        );
        assert!(vocab.header_pattern().is_none());
        assert!(vocab.classify("효능").is_empty());
    }
}
