//! Block-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A content block of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading, body, bold, metadata or list paragraph
    Paragraph(Paragraph),

    /// A pipe-delimited table
    Table(Table),

    /// An image reference
    Image {
        /// Path as written in the source (`![alt](path)`)
        path: String,
        /// Alternative text between the brackets
        alt_text: Option<String>,
        /// 1-indexed source line
        line: usize,
    },

    /// A horizontal rule / section spacer
    HorizontalRule,
}

impl Block {
    /// Create an image block.
    pub fn image(path: impl Into<String>, alt_text: Option<String>, line: usize) -> Self {
        Block::Image {
            path: path.into(),
            alt_text,
            line,
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }

    /// Plain text of textual blocks; `None` for images and rules.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Block::Paragraph(p) => Some(p.plain_text()),
            Block::Table(t) => Some(t.plain_text()),
            Block::Image { .. } | Block::HorizontalRule => None,
        }
    }
}

/// An element dropped by the best-effort policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedElement {
    /// 1-indexed source line
    pub line: usize,

    /// Why nothing was emitted
    pub reason: SkipReason,
}

impl SkippedElement {
    /// Create a new skipped element record.
    pub fn new(line: usize, reason: SkipReason) -> Self {
        Self { line, reason }
    }
}

impl std::fmt::Display for SkippedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Reason an element produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// `![...]` line without a `(path)` target
    MalformedImage,

    /// Referenced image file does not exist
    MissingImage {
        /// Path as written in the source
        path: String,
    },

    /// Image file exists but could not be decoded or placed
    UnreadableImage {
        /// Path as written in the source
        path: String,
        /// Decoder or I/O message
        message: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MalformedImage => write!(f, "image reference has no path"),
            SkipReason::MissingImage { path } => write!(f, "image not found: {}", path),
            SkipReason::UnreadableImage { path, message } => {
                write!(f, "image {} could not be used: {}", path, message)
            }
        }
    }
}
