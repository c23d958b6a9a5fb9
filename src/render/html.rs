//! HTML rendering for parsed reports.
//!
//! The output is a single self-contained page: a fixed head with a
//! print-oriented A4 stylesheet, then one fragment per block in source
//! order. List items are written without an enclosing `<ul>`.

use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, ParagraphRole, SkipReason, SkippedElement, Table};
use crate::parser::{strip_bold_markers, ErrorMode};

use super::{RenderOptions, RenderResult, RenderStats};

const STYLESHEET: &str = r#"        @page {
            size: A4;
            margin: 2cm;
        }
        body {
            font-family: 'Arial', sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        h1 {
            font-size: 24px;
            color: #1a1a1a;
            border-bottom: 3px solid #333;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }
        h2 {
            font-size: 18px;
            color: #2c3e50;
            margin-top: 30px;
            margin-bottom: 15px;
        }
        h3 {
            font-size: 16px;
            color: #34495e;
            margin-top: 20px;
            margin-bottom: 10px;
        }
        p {
            text-align: justify;
            margin-bottom: 10px;
        }
        ul {
            margin: 10px 0;
            padding-left: 30px;
        }
        li {
            margin-bottom: 8px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 12px;
            text-align: left;
        }
        th {
            background-color: #4CAF50;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f2f2f2;
        }
        img {
            max-width: 100%;
            height: auto;
            margin: 20px 0;
            border: 1px solid #ddd;
        }
        .metadata {
            font-size: 12px;
            color: #666;
            margin-bottom: 20px;
        }
        hr {
            border: none;
            border-top: 2px solid #ddd;
            margin: 20px 0;
        }
        @media print {
            body {
                margin: 0;
                padding: 15px;
            }
            h1 { page-break-after: avoid; }
            h2, h3 { page-break-after: avoid; }
            img { page-break-inside: avoid; }
            table { page-break-inside: avoid; }
        }
"#;

/// Convert a document to an HTML page.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(HtmlRenderer::new(options.clone()).render(doc)?.output)
}

/// Convert a document to an HTML page, reporting stats and skipped elements.
pub fn to_html_with_report(
    doc: &Document,
    options: &RenderOptions,
) -> Result<RenderResult<String>> {
    let mut options = options.clone();
    options.collect_stats = true;
    HtmlRenderer::new(options).render(doc)
}

/// Append-only builder for the HTML page.
///
/// Fragments are pushed in order; [`HtmlBuilder::finish`] closes the body
/// and yields the page. Text passed in is written as-is, callers escape.
#[derive(Debug, Clone)]
pub struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    /// Start a page with the fixed head block.
    pub fn new(title: &str) -> Self {
        let mut buf = String::with_capacity(4096);
        buf.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
        buf.push_str(&format!("    <title>{}</title>\n", escape_text(title)));
        buf.push_str("    <style>\n");
        buf.push_str(STYLESHEET);
        buf.push_str("    </style>\n</head>\n<body>\n");
        Self { buf }
    }

    /// `<hN>text</hN>`
    pub fn heading(&mut self, level: u8, text: &str) {
        let level = level.clamp(1, 3);
        self.line(&format!("<h{level}>{text}</h{level}>"));
    }

    /// `<p>html</p>`
    pub fn paragraph(&mut self, html: &str) {
        self.line(&format!("<p>{html}</p>"));
    }

    /// `<p><strong>text</strong></p>`
    pub fn strong_paragraph(&mut self, text: &str) {
        self.line(&format!("<p><strong>{text}</strong></p>"));
    }

    /// `<div class="metadata"><p>text</p></div>`
    pub fn metadata(&mut self, text: &str) {
        self.line(&format!("<div class=\"metadata\"><p>{text}</p></div>"));
    }

    /// `<li>text</li>`
    pub fn list_item(&mut self, text: &str) {
        self.line(&format!("<li>{text}</li>"));
    }

    /// `<img src=".." alt="..">`
    pub fn image(&mut self, src: &str, alt: &str) {
        self.line(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_attr(src),
            escape_attr(alt)
        ));
    }

    /// `<hr>`
    pub fn rule(&mut self) {
        self.line("<hr>");
    }

    /// Open a `<table>`.
    pub fn begin_table(&mut self) {
        self.line("<table>");
    }

    /// One `<tr>` of `<th>` or `<td>` cells.
    pub fn row<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>, header: bool) {
        let tag = if header { "th" } else { "td" };
        self.buf.push_str("<tr>");
        for cell in cells {
            self.buf.push_str(&format!("<{tag}>{cell}</{tag}>"));
        }
        self.buf.push_str("</tr>\n");
    }

    /// Close the `<table>`.
    pub fn end_table(&mut self) {
        self.line("</table>");
    }

    /// Close the body and return the page.
    pub fn finish(mut self) -> String {
        self.buf.push_str("</body>\n</html>");
        self.buf
    }

    fn line(&mut self, fragment: &str) {
        self.buf.push_str(fragment);
        self.buf.push('\n');
    }
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
    skipped: Vec<SkippedElement>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            skipped: Vec::new(),
        }
    }

    /// Render a document to an HTML page.
    pub fn render(mut self, doc: &Document) -> Result<RenderResult<String>> {
        let mut html = HtmlBuilder::new(&self.options.document_title);
        self.skipped.extend(doc.skipped.iter().cloned());

        for block in &doc.blocks {
            self.render_block(&mut html, block)?;
        }

        if self.options.collect_stats {
            self.stats.skipped_count = self.skipped.len() as u32;
        }
        Ok(RenderResult::new(
            html.finish(),
            doc.metadata.clone(),
            self.stats,
            self.skipped,
        ))
    }

    fn render_block(&mut self, html: &mut HtmlBuilder, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(p) => self.render_paragraph(html, p),
            Block::Table(t) => self.render_table(html, t),
            Block::Image {
                path,
                alt_text,
                line,
            } => {
                self.render_image(html, path, alt_text.as_deref(), *line)?;
                return Ok(());
            }
            Block::HorizontalRule => html.rule(),
        }
        if self.options.collect_stats {
            self.stats.add_block(block);
        }
        Ok(())
    }

    fn render_paragraph(&mut self, html: &mut HtmlBuilder, para: &Paragraph) {
        if let Some(level) = para.heading_level() {
            html.heading(level, &para.plain_text());
            return;
        }
        if para.is_list_item() {
            html.list_item(&para.plain_text());
            return;
        }

        match para.role() {
            ParagraphRole::Emphasized => {
                html.strong_paragraph(&strip_bold_markers(&para.plain_text()));
            }
            ParagraphRole::Metadata => {
                html.metadata(&strip_bold_markers(&para.plain_text()));
            }
            ParagraphRole::Body => {
                let mut out = String::new();
                for run in para.runs() {
                    let text = escape_text(&run.text);
                    if run.style.bold {
                        out.push_str("<strong>");
                        out.push_str(&text);
                        out.push_str("</strong>");
                    } else {
                        out.push_str(&text);
                    }
                }
                html.paragraph(&out);
            }
        }
    }

    fn render_table(&mut self, html: &mut HtmlBuilder, table: &Table) {
        html.begin_table();
        if let Some(header) = table.header() {
            html.row(header.cells.iter().map(|c| c.text.as_str()), true);
        }
        for row in table.body() {
            let cells: Vec<String> = row.cells.iter().map(|c| first_bold_pair(&c.text)).collect();
            html.row(cells.iter().map(String::as_str), false);
        }
        html.end_table();
    }

    fn render_image(
        &mut self,
        html: &mut HtmlBuilder,
        path: &str,
        alt: Option<&str>,
        line: usize,
    ) -> Result<()> {
        let resolved = self.options.resolve_asset(path);
        if !resolved.is_file() {
            if self.options.error_mode == ErrorMode::Strict {
                return Err(Error::MissingImage(resolved));
            }
            log::warn!("line {}: image not found: {}", line, resolved.display());
            self.skipped.push(SkippedElement::new(
                line,
                SkipReason::MissingImage {
                    path: path.to_string(),
                },
            ));
            return Ok(());
        }

        html.image(path, alt.unwrap_or("Image"));
        if self.options.collect_stats {
            self.stats.add_image();
        }
        Ok(())
    }
}

/// Escape `&`, `<` and `>` for text content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// Convert the first `**x**` pair of a table cell to `<strong>x</strong>`.
fn first_bold_pair(cell: &str) -> String {
    let Some(open) = cell.find("**") else {
        return cell.to_string();
    };
    let Some(close) = cell[open + 2..].find("**").map(|i| open + 2 + i) else {
        return cell.to_string();
    };
    format!(
        "{}<strong>{}</strong>{}",
        &cell[..open],
        &cell[open + 2..close],
        &cell[close + 2..]
    )
}
