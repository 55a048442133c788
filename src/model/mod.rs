//! Data model shared across the comparison pipeline.
//!
//! Raw page text flows in from the PDF collaborator, is sliced into
//! sections, and ends up as an edit script over two token sequences.
//! Everything here is created per comparison and dropped afterwards.

mod edit;
mod page;
mod section;

pub use edit::{has_changes, DiffScript, DiffStats, EditOp, Granularity, OpKind};
pub use page::{RawPage, RawPages};
pub use section::{ExtractedDocument, Section, SectionCategory, SectionHeader};
