//! Document-level types.

use super::{Block, Paragraph, SkippedElement};
use serde::{Deserialize, Serialize};

/// A parsed report, ready to be handed to an emitter.
///
/// Blocks are stored in input order. The document is built once by the
/// parser and treated as immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Report metadata (title, prepared-by fields, ...)
    pub metadata: Metadata,

    /// Content blocks in source order
    pub blocks: Vec<Block>,

    /// Lines that produced no output during parsing
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<SkippedElement>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Append a paragraph block.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Record a line that was dropped.
    pub fn add_skipped(&mut self, skipped: SkippedElement) {
        self.skipped.push(skipped);
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Report metadata gathered while parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Text of the first level-1 heading
    pub title: Option<String>,

    /// Label/value pairs from metadata lines (`**Prepared by:** Jane Doe`)
    pub fields: Vec<MetadataField>,
}

impl Metadata {
    /// Look up a field value by label, ignoring case and a trailing colon.
    pub fn field(&self, label: &str) -> Option<&str> {
        let wanted = normalize_label(label);
        self.fields
            .iter()
            .find(|f| normalize_label(&f.label) == wanted)
            .map(|f| f.value.as_str())
    }

    /// Name of the report author (`Prepared by` field).
    pub fn author(&self) -> Option<&str> {
        self.field("Prepared by")
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().trim_end_matches(':').trim().to_lowercase()
}

/// One metadata line split into label and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Label without the bold markers, e.g. `Prepared by:`
    pub label: String,

    /// Remaining text after the label
    pub value: String,
}

impl MetadataField {
    /// Create a new metadata field.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
