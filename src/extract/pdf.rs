//! Page text extraction backed by lopdf.

use lopdf::Document as LopdfDocument;

use crate::detect::detect_pdf_version;
use crate::error::{Error, Result};
use crate::model::{RawPage, RawPages};

use super::options::{ErrorMode, ExtractOptions};
use super::TextSource;

/// [`TextSource`] that decodes page content streams with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfSource {
    _private: (),
}

impl LopdfSource {
    /// Create a new lopdf-backed source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(&self, data: &[u8]) -> Result<LopdfDocument> {
        let version = detect_pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("{} document is encrypted; text may be unreadable", version);
        }
        Ok(doc)
    }
}

impl TextSource for LopdfSource {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn read_pages(&self, data: &[u8], options: &ExtractOptions) -> Result<RawPages> {
        let doc = self.load(data)?;
        let page_ids = doc.get_pages();
        let total = page_ids.len() as u32;

        if let Some(missing) = options.pages.first_beyond(total) {
            match options.error_mode {
                ErrorMode::Strict => return Err(Error::PageOutOfRange(missing, total)),
                ErrorMode::Lenient => {
                    log::warn!("Page {} requested but document has {} pages", missing, total)
                }
            }
        }

        let mut pages = RawPages::new();
        for &number in page_ids.keys() {
            if !options.pages.includes(number) {
                continue;
            }

            match doc.extract_text(&[number]) {
                Ok(text) if !text.trim().is_empty() => pages.push(RawPage::with_text(number, text)),
                Ok(_) => {
                    log::debug!("Page {} yielded no text", number);
                    pages.push(RawPage::empty(number));
                }
                Err(e) => match options.error_mode {
                    ErrorMode::Strict => {
                        return Err(Error::TextExtract(format!("Page {}: {}", number, e)))
                    }
                    ErrorMode::Lenient => {
                        log::warn!("Failed to extract text from page {}: {}", number, e);
                        pages.push(RawPage::empty(number));
                    }
                },
            }
        }

        log::debug!(
            "Read {} of {} pages ({} with text)",
            pages.len(),
            total,
            pages.text_page_count()
        );
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lopdf_source_name() {
        assert_eq!(LopdfSource::new().name(), "lopdf");
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = LopdfSource::new().read_pages(b"<html></html>", &ExtractOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_rejects_truncated_pdf() {
        let result = LopdfSource::new().read_pages(b"%PDF-1.4\n", &ExtractOptions::default());
        assert!(result.is_err());
    }
}
