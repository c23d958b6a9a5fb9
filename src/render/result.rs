//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata, SkippedElement};
use serde::{Deserialize, Serialize};

/// Result of rendering a document: the output plus what was left out.
#[derive(Debug, Clone)]
pub struct RenderResult<T> {
    /// The rendered output (HTML string, PDF bytes, ...)
    pub output: T,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,

    /// Elements dropped while parsing or rendering, in source order
    pub skipped: Vec<SkippedElement>,
}

impl<T> RenderResult<T> {
    /// Create a new render result.
    pub fn new(
        output: T,
        metadata: Metadata,
        stats: RenderStats,
        skipped: Vec<SkippedElement>,
    ) -> Self {
        Self {
            output,
            metadata,
            stats,
            skipped,
        }
    }

    /// Check whether every element was emitted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Replace the output, keeping metadata, stats and skips.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RenderResult<U> {
        RenderResult {
            output: f(self.output),
            metadata: self.metadata,
            stats: self.stats,
            skipped: self.skipped,
        }
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of body, bold and metadata paragraphs
    pub paragraph_count: u32,

    /// Number of bullet items
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of images emitted
    pub image_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Number of skipped elements
    pub skipped_count: u32,

    /// Number of PDF pages (0 for other outputs)
    pub page_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a parsed document without rendering it.
    ///
    /// Every image block counts as an image here; emitters only count the
    /// images they actually place.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats.skipped_count = doc.skipped.len() as u32;
        stats
    }

    /// Count one block and its text.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) if p.is_heading() => self.add_heading(),
            Block::Paragraph(p) if p.is_list_item() => self.add_list_item(),
            Block::Paragraph(_) => self.add_paragraph(),
            Block::Table(_) => self.add_table(),
            Block::Image { .. } => self.add_image(),
            Block::HorizontalRule => self.add_horizontal_rule(),
        }
        if let Some(text) = block.plain_text() {
            self.count_text(&text);
        }
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment horizontal rule count.
    pub fn add_horizontal_rule(&mut self) {
        self.horizontal_rule_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
