//! Cursor loop turning classified lines into document blocks.
//!
//! The scanner is a two-state machine. In `Scanning` every line is
//! classified on its own; a table start switches to `InTable`, where
//! pipe rows are accumulated and separator rows dropped until a line
//! without `|` closes the block. That closing line is then classified
//! again in `Scanning` without moving the cursor, so the cursor only
//! ever moves forward.

use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Paragraph, ParagraphRole, SkipReason, SkippedElement, Table, TableCell,
    TableRow,
};

use super::inline::InlineParser;
use super::line::{LineClassifier, LineKind};
use super::options::{ErrorMode, ParseOptions};

/// Parser state.
#[derive(Debug)]
enum ScanState {
    /// Classifying lines one at a time
    Scanning,
    /// Accumulating rows of an open table block
    InTable(Table),
}

/// Line scanner for report Markdown.
pub struct Scanner<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
    state: ScanState,
    classifier: LineClassifier,
    inline: InlineParser,
    error_mode: ErrorMode,
    doc: Document,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over the full input text.
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            lines: input.lines().collect(),
            cursor: 0,
            state: ScanState::Scanning,
            classifier: LineClassifier::new(options),
            inline: InlineParser::new(),
            error_mode: options.error_mode,
            doc: Document::new(),
        }
    }

    /// Consume every line and return the finished document.
    pub fn parse(mut self) -> Result<Document> {
        while self.cursor < self.lines.len() {
            let line = self.lines[self.cursor];
            let line_no = self.cursor + 1;

            match std::mem::replace(&mut self.state, ScanState::Scanning) {
                ScanState::InTable(mut table) => match self.classifier.classify_in_table(line) {
                    Some(LineKind::TableRow(cells)) => {
                        if cells.iter().any(|c| !c.is_empty()) {
                            table.add_row(TableRow::from_strings(cells));
                        }
                        self.state = ScanState::InTable(table);
                        self.cursor += 1;
                    }
                    Some(_) => {
                        self.state = ScanState::InTable(table);
                        self.cursor += 1;
                    }
                    None => {
                        // Re-classify this line in Scanning without advancing.
                        self.finish_table(table);
                    }
                },
                ScanState::Scanning => {
                    let kind = self.classifier.classify(line);
                    self.emit(kind, line_no)?;
                    self.cursor += 1;
                }
            }
        }

        if let ScanState::InTable(table) = std::mem::replace(&mut self.state, ScanState::Scanning)
        {
            self.finish_table(table);
        }

        log::debug!(
            "parsed {} lines into {} blocks ({} skipped)",
            self.lines.len(),
            self.doc.block_count(),
            self.doc.skipped.len()
        );
        Ok(self.doc)
    }

    fn emit(&mut self, kind: LineKind<'_>, line_no: usize) -> Result<()> {
        match kind {
            LineKind::Blank | LineKind::TableRule | LineKind::TableRow(_) => {}
            LineKind::Heading { level, text } => {
                if level == 1 && self.doc.metadata.title.is_none() {
                    self.doc.metadata.title = Some(text.to_string());
                }
                self.doc.add_paragraph(Paragraph::heading(text, level));
            }
            LineKind::Image { alt, path } => match path {
                Some(path) => {
                    let alt_text = Some(alt.trim())
                        .filter(|a| !a.is_empty())
                        .map(str::to_string);
                    self.doc.add_block(Block::image(path, alt_text, line_no));
                }
                None => {
                    if self.error_mode == ErrorMode::Strict {
                        return Err(Error::MalformedImage(line_no));
                    }
                    log::debug!("line {}: image reference without a path", line_no);
                    self.doc
                        .add_skipped(SkippedElement::new(line_no, SkipReason::MalformedImage));
                }
            },
            LineKind::TableStart(cells) => {
                let header = TableRow::new(cells.into_iter().map(TableCell::text).collect());
                self.state = ScanState::InTable(Table::with_header(header, line_no));
            }
            LineKind::Metadata(text) => {
                if let Some(field) = self.inline.metadata_field(text) {
                    self.doc.metadata.fields.push(field);
                }
                let para = Paragraph::with_runs(self.inline.parse(text))
                    .with_role(ParagraphRole::Metadata);
                self.doc.add_paragraph(para);
            }
            LineKind::Emphasized(text) => {
                let para = Paragraph::with_runs(self.inline.parse(text))
                    .with_role(ParagraphRole::Emphasized);
                self.doc.add_paragraph(para);
            }
            LineKind::Bullet(text) => self.doc.add_paragraph(Paragraph::bullet(text)),
            LineKind::HorizontalRule => self.doc.add_block(Block::HorizontalRule),
            LineKind::Paragraph(text) => {
                self.doc
                    .add_paragraph(Paragraph::with_runs(self.inline.parse(text)));
            }
        }
        Ok(())
    }

    fn finish_table(&mut self, table: Table) {
        if table.is_ragged() {
            log::debug!(
                "table at line {} has rows that differ from the {}-column header",
                table.line,
                table.column_count()
            );
        }
        self.doc.add_block(Block::Table(table));
    }
}

/// Parse report Markdown into a [`Document`].
pub fn parse(input: &str, options: &ParseOptions) -> Result<Document> {
    Scanner::new(input, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(input: &str) -> Document {
        parse(input, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_scenario_title_metadata_bullets() {
        let doc = parse_default(
            "# Title\n\n**Prepared by:** Jane Doe\n\n- First point\n- Second point\n",
        );

        assert_eq!(doc.block_count(), 4);
        assert_eq!(doc.metadata.title.as_deref(), Some("Title"));
        assert_eq!(doc.metadata.author(), Some("Jane Doe"));

        match &doc.blocks[1] {
            Block::Paragraph(p) => assert_eq!(p.role(), ParagraphRole::Metadata),
            other => panic!("expected metadata paragraph, got {:?}", other),
        }
        match &doc.blocks[3] {
            Block::Paragraph(p) => {
                assert!(p.is_list_item());
                assert_eq!(p.plain_text(), "Second point");
            }
            other => panic!("expected list item, got {:?}", other),
        }
    }

    #[test]
    fn test_table_block_with_separator() {
        let doc = parse_default("| Item | Cost |\n|------|------|\n| Camera | 120 |\nAfter.");

        assert_eq!(doc.block_count(), 2);
        match &doc.blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.row_count(), 2);
                assert_eq!(t.body()[0].cells[0].text, "Camera");
                assert_eq!(t.line, 1);
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert!(doc.blocks[1].is_paragraph());
    }

    #[test]
    fn test_table_header_only() {
        let doc = parse_default("| Item | Cost |\n|---|---|\n");
        match &doc.blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.row_count(), 1);
                assert!(t.body().is_empty());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_closes_table() {
        let doc = parse_default("| A | B |\n| 1 | 2 |\n\n| C | D |\n");
        let tables = doc.blocks.iter().filter(|b| b.is_table()).count();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_ragged_rows_preserved() {
        let doc = parse_default("| A | B | C |\n| 1 | 2 |\n| 1 | 2 | 3 | 4 |");
        match &doc.blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.body()[0].cells.len(), 2);
                assert_eq!(t.body()[1].cells.len(), 4);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_then_rule() {
        let doc = parse_default("Intro\n\n---\nNext");
        assert_eq!(doc.block_count(), 3);
        assert!(matches!(doc.blocks[1], Block::HorizontalRule));
    }

    #[test]
    fn test_malformed_image_lenient_and_strict() {
        let doc = parse_default("![no target]\nText");
        assert_eq!(doc.block_count(), 1);
        assert_eq!(
            doc.skipped,
            vec![SkippedElement::new(1, SkipReason::MalformedImage)]
        );

        let strict = parse("![no target]", &ParseOptions::new().strict());
        assert!(matches!(strict, Err(Error::MalformedImage(1))));
    }

    #[test]
    fn test_image_block_keeps_line_and_alt() {
        let doc = parse_default("\n![Rig](rig.png)");
        match &doc.blocks[0] {
            Block::Image {
                path,
                alt_text,
                line,
            } => {
                assert_eq!(path, "rig.png");
                assert_eq!(alt_text.as_deref(), Some("Rig"));
                assert_eq!(*line, 2);
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_header_marker_gates_tables() {
        let options = ParseOptions::new().with_table_header_marker("Item");
        let doc = parse("a | b\n| Item | Qty |\n| x | 1 |", &options).unwrap();

        assert!(doc.blocks[0].is_paragraph());
        assert!(doc.blocks[1].is_table());
    }

    #[test]
    fn test_bare_dash_is_paragraph() {
        let doc = parse_default("-  ");
        match &doc.blocks[0] {
            Block::Paragraph(p) => {
                assert!(!p.is_list_item());
                assert_eq!(p.plain_text(), "-");
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }
}
