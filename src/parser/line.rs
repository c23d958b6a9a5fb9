//! Line classification.
//!
//! Every trimmed input line maps to exactly one [`LineKind`]; paragraph is
//! the fallback. Rules are tried in a fixed order and the first match wins:
//!
//! 1. blank
//! 2. heading (`# `, `## `, `### `)
//! 3. image (`![alt](path)`)
//! 4. table start (contains `|`, plus the optional header marker)
//! 5. line opening with a `**...**` span; metadata when it carries a label
//! 6. bullet (`- `, `* `)
//! 7. horizontal rule (`---`)
//! 8. paragraph

use regex::Regex;

use super::ParseOptions;

/// Syntactic category of one line, with its payload borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming
    Blank,
    /// `#`, `##` or `###` heading
    Heading {
        /// 1..=3
        level: u8,
        /// Text after the marker
        text: &'a str,
    },
    /// `![alt](path)`; `path` is `None` when no target could be extracted
    Image {
        /// Text between the brackets
        alt: &'a str,
        /// Text between the parentheses
        path: Option<&'a str>,
    },
    /// First line of a table block, split into cells
    TableStart(Vec<&'a str>),
    /// Pipe-delimited row inside a table block
    TableRow(Vec<&'a str>),
    /// Separator row made of dashes and pipes
    TableRule,
    /// Report metadata line (`**Prepared by:** ...`)
    Metadata(&'a str),
    /// Line opening with a bold span
    Emphasized(&'a str),
    /// Bullet item text after the two-character prefix
    Bullet(&'a str),
    /// `---` rule
    HorizontalRule,
    /// Anything else
    Paragraph(&'a str),
}

/// Classifies single lines according to the report grammar.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    image_pattern: Regex,
    table_header_marker: Option<String>,
    metadata_markers: Vec<String>,
}

impl LineClassifier {
    /// Create a classifier from parse options.
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            image_pattern: Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"),
            table_header_marker: options.table_header_marker.clone(),
            metadata_markers: options
                .metadata_labels
                .iter()
                .map(|label| format!("**{}**", label))
                .collect(),
        }
    }

    /// Classify a line outside of any table block.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let line = line.trim();

        if line.is_empty() {
            return LineKind::Blank;
        }

        if let Some(heading) = classify_heading(line) {
            return heading;
        }

        if line.starts_with("![") {
            return self.classify_image(line);
        }

        if line.contains('|') && self.opens_table(line) {
            if is_separator_row(line) {
                return LineKind::TableRule;
            }
            return LineKind::TableStart(split_cells(line));
        }

        if line.starts_with("**") && line[2..].contains("**") {
            if self.metadata_markers.iter().any(|m| line.contains(m.as_str())) {
                return LineKind::Metadata(line);
            }
            return LineKind::Emphasized(line);
        }

        if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            return LineKind::Bullet(text);
        }

        if line.starts_with("---") {
            return LineKind::HorizontalRule;
        }

        LineKind::Paragraph(line)
    }

    /// Classify a line while a table block is open.
    ///
    /// Returns `None` when the line ends the block; the caller then
    /// classifies it again with [`LineClassifier::classify`].
    pub fn classify_in_table<'a>(&self, line: &'a str) -> Option<LineKind<'a>> {
        let line = line.trim();
        if !line.contains('|') {
            return None;
        }
        if is_separator_row(line) {
            return Some(LineKind::TableRule);
        }
        Some(LineKind::TableRow(split_cells(line)))
    }

    fn classify_image<'a>(&self, line: &'a str) -> LineKind<'a> {
        match self.image_pattern.captures(line) {
            Some(caps) => {
                let alt = caps.get(1).map_or("", |m| m.as_str());
                let path = caps
                    .get(2)
                    .map(|m| m.as_str().trim())
                    .filter(|p| !p.is_empty());
                LineKind::Image { alt, path }
            }
            None => LineKind::Image { alt: "", path: None },
        }
    }

    fn opens_table(&self, line: &str) -> bool {
        match &self.table_header_marker {
            Some(marker) => line.contains(marker.as_str()),
            None => true,
        }
    }
}

fn classify_heading(line: &str) -> Option<LineKind<'_>> {
    const MARKERS: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];
    MARKERS.iter().find_map(|(marker, level)| {
        line.strip_prefix(marker).map(|text| LineKind::Heading {
            level: *level,
            text,
        })
    })
}

/// Split a pipe-delimited line into trimmed cells.
///
/// Only the empty fragments produced by a leading or trailing pipe are
/// dropped; interior empty cells are kept so columns stay in place.
pub fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Check whether a line is a Markdown table separator such as `|---|:--:|`.
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.contains('-') && line.chars().all(|c| matches!(c, '-' | '|' | ':' | ' '))
}
