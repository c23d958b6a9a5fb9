//! Document model types for report content.
//!
//! This module defines the intermediate representation that bridges
//! Markdown parsing and output rendering. Both the HTML and the PDF
//! emitters consume the same model, so classification happens only once.

mod block;
mod document;
mod paragraph;
mod table;

pub use block::{Block, SkipReason, SkippedElement};
pub use document::{Document, Metadata, MetadataField};
pub use paragraph::{ListInfo, Paragraph, ParagraphRole, ParagraphStyle, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
