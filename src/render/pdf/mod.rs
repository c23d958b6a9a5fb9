//! PDF rendering for parsed reports.
//!
//! Blocks are turned into flowables (styled text, tables, images and
//! spacers), stacked onto A4 pages by the [`layout::Paginator`] and written
//! with lopdf. Only the base Helvetica fonts are used, so nothing is
//! embedded apart from images.

mod fonts;
mod layout;
mod style;
mod writer;

use crate::detect::load_image;
use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, ParagraphRole, SkipReason, SkippedElement, Table};
use crate::parser::ErrorMode;

use super::{RenderOptions, RenderResult, RenderStats};

pub use fonts::{encode_win_ansi, Font};
pub use layout::{break_lines, Flowable, ImageBlock, Line, Paginator, Span, TableBlock, TextBlock};
pub use style::{
    heading_style, Alignment, CellStyle, Color, TableStyle, TextStyle, BODY, REPORT_TABLE, SPACER,
};
pub use writer::{write_document, DocumentInfo, EmbeddedImage};

/// Convert a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    Ok(PdfRenderer::new(options.clone()).render(doc)?.output)
}

/// Convert a document to PDF bytes, reporting stats and skipped elements.
pub fn to_pdf_with_report(
    doc: &Document,
    options: &RenderOptions,
) -> Result<RenderResult<Vec<u8>>> {
    let mut options = options.clone();
    options.collect_stats = true;
    PdfRenderer::new(options).render(doc)
}

/// PDF renderer.
pub struct PdfRenderer {
    options: RenderOptions,
    stats: RenderStats,
    skipped: Vec<SkippedElement>,
    flowables: Vec<Flowable>,
    images: Vec<EmbeddedImage>,
}

impl PdfRenderer {
    /// Create a new PDF renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            skipped: Vec::new(),
            flowables: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Render a document to PDF bytes.
    pub fn render(mut self, doc: &Document) -> Result<RenderResult<Vec<u8>>> {
        self.skipped.extend(doc.skipped.iter().cloned());
        for block in &doc.blocks {
            self.render_block(block)?;
        }

        let mut paginator = Paginator::new(self.options.page);
        for flowable in &self.flowables {
            paginator.add(flowable);
        }
        let pages = paginator.finish();
        log::debug!(
            "laid out {} flowables on {} pages",
            self.flowables.len(),
            pages.len()
        );

        if self.options.collect_stats {
            self.stats.page_count = pages.len() as u32;
            self.stats.skipped_count = self.skipped.len() as u32;
        }

        let info = DocumentInfo {
            title: doc
                .metadata
                .title
                .clone()
                .or_else(|| Some(self.options.document_title.clone())),
            author: doc.metadata.author().map(str::to_string),
        };
        let bytes = write_document(pages, &self.images, &self.options.page, &info)?;

        Ok(RenderResult::new(
            bytes,
            doc.metadata.clone(),
            self.stats,
            self.skipped,
        ))
    }

    fn render_block(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(p) => self.render_paragraph(p),
            Block::Table(t) => {
                self.render_table(t);
                self.flowables.push(Flowable::Spacer(SPACER));
            }
            Block::Image { path, line, .. } => {
                self.render_image(path, *line)?;
                return Ok(());
            }
            Block::HorizontalRule => self.flowables.push(Flowable::Spacer(SPACER)),
        }
        if self.options.collect_stats {
            self.stats.add_block(block);
        }
        Ok(())
    }

    fn render_paragraph(&mut self, para: &Paragraph) {
        let width = self.options.page.frame_width();

        let (spans, style) = if let Some(level) = para.heading_level() {
            let style = heading_style(level);
            let span = Span::new(style.font, encode_win_ansi(&para.plain_text()));
            (vec![span], style)
        } else if para.is_list_item() {
            let text = format!("\u{2022} {}", para.plain_text());
            (vec![Span::new(Font::Regular, encode_win_ansi(&text))], BODY)
        } else if para.role() == ParagraphRole::Emphasized {
            let span = Span::new(Font::Bold, encode_win_ansi(&para.plain_text()));
            (vec![span], BODY)
        } else {
            let spans: Vec<Span> = para
                .runs()
                .map(|run| {
                    let font = if run.style.bold {
                        Font::Bold
                    } else {
                        Font::Regular
                    };
                    Span::new(font, encode_win_ansi(&run.text))
                })
                .collect();
            (spans, BODY)
        };

        self.flowables
            .push(Flowable::Text(TextBlock::new(&spans, style, width)));
    }

    fn render_table(&mut self, table: &Table) {
        let rows: Vec<Vec<Vec<u8>>> = table
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| encode_win_ansi(&c.text)).collect())
            .collect();
        let block = TableBlock::new(
            &rows,
            table.header().is_some(),
            self.options.table_column_widths.clone(),
            REPORT_TABLE,
        );
        self.flowables.push(Flowable::Table(block));
    }

    fn render_image(&mut self, path: &str, line: usize) -> Result<()> {
        let resolved = self.options.resolve_asset(path);
        if !resolved.is_file() {
            if self.options.error_mode == ErrorMode::Strict {
                return Err(Error::MissingImage(resolved));
            }
            log::warn!("line {}: image not found: {}", line, resolved.display());
            self.skip(line, SkipReason::MissingImage {
                path: path.to_string(),
            });
            return Ok(());
        }

        let loaded = load_image(&resolved).and_then(|(kind, decoded)| {
            log::debug!("line {}: embedding {} image {}", line, kind, resolved.display());
            EmbeddedImage::from_image(&decoded)
        });

        match loaded {
            Ok(embedded) => {
                let block = ImageBlock::fitted(
                    self.images.len(),
                    embedded.width,
                    embedded.height,
                    self.options.image_box,
                );
                self.images.push(embedded);
                self.flowables.push(Flowable::Image(block));
                self.flowables.push(Flowable::Spacer(SPACER));
                if self.options.collect_stats {
                    self.stats.add_image();
                }
                Ok(())
            }
            Err(err) if self.options.error_mode == ErrorMode::Strict => Err(err),
            Err(err) => {
                log::warn!("line {}: image {} dropped: {}", line, path, err);
                self.skip(line, SkipReason::UnreadableImage {
                    path: path.to_string(),
                    message: err.to_string(),
                });
                Ok(())
            }
        }
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        self.skipped.push(SkippedElement::new(line, reason));
    }
}
