//! PDF text extraction.
//!
//! The comparison pipeline only needs "per-page text with layout-derived
//! line breaks". [`TextSource`] is that seam; [`LopdfSource`] is the
//! default implementation. Section slicing happens later, in
//! [`crate::section`].

mod options;
mod pdf;

pub use options::{ErrorMode, ExtractOptions, ExtractScope, PageSelection};
pub use pdf::LopdfSource;

use crate::error::Result;
use crate::model::RawPages;
use std::io::Read;
use std::path::Path;

/// Producer of per-page text from a binary document.
///
/// Implement this trait to plug in a different PDF library (or a fixture
/// in tests).
pub trait TextSource: Send + Sync {
    /// Short identifier used in log messages.
    fn name(&self) -> &str;

    /// Read the pages selected by `options` from in-memory document bytes.
    fn read_pages(&self, data: &[u8], options: &ExtractOptions) -> Result<RawPages>;

    /// Read pages from a file on disk.
    fn read_path(&self, path: &Path, options: &ExtractOptions) -> Result<RawPages> {
        let data = std::fs::read(path)?;
        self.read_pages(&data, options)
    }

    /// Read pages from any reader (the reader is consumed to the end).
    fn read_reader(&self, reader: &mut dyn Read, options: &ExtractOptions) -> Result<RawPages> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.read_pages(&data, options)
    }
}
