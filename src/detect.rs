//! PDF header sniffing.
//!
//! Runs before the bytes reach the PDF parser so that an obviously wrong
//! upload (HTML error page, DOCX, empty file) is rejected with
//! [`Error::UnknownFormat`] instead of a parser-specific message.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers are required to accept a header anywhere in the first KiB.
const HEADER_WINDOW: usize = 1024;

/// Header version of a PDF file, e.g. `1.7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfVersion {
    pub major: u8,
    pub minor: u8,
}

impl std::fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}.{}", self.major, self.minor)
    }
}

/// Locate the `%PDF-x.y` header and return its version.
///
/// # Example
/// ```
/// use labeldiff::detect::detect_pdf_version;
///
/// let version = detect_pdf_version(b"%PDF-1.7\n%test").unwrap();
/// assert_eq!((version.major, version.minor), (1, 7));
/// ```
pub fn detect_pdf_version(data: &[u8]) -> Result<PdfVersion> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version = &data[start + PDF_MAGIC.len()..];
    match version {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfVersion {
                major: major - b'0',
                minor: minor - b'0',
            })
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes start (within the header window) like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_pdf_version(data).is_ok()
}
