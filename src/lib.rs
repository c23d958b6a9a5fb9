//! # mdreport
//!
//! Render a constrained Markdown dialect (feasibility reports) into a
//! styled HTML page and a paginated A4 PDF.
//!
//! Input is classified once into an intermediate [`Document`]; every
//! output format is produced from that model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdreport::{parse_file, render};
//!
//! fn main() -> mdreport::Result<()> {
//!     let doc = parse_file("overview.md")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     std::fs::write("overview.html", html)?;
//!
//!     let pdf = render::to_pdf(&doc, &options)?;
//!     std::fs::write("overview.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Markdown
//!
//! - `#`, `##`, `###` headings
//! - `![alt](path)` images on their own line
//! - pipe tables, with optional separator rows
//! - `**Prepared by:**` style metadata lines
//! - whole-line bold text, `- ` / `* ` bullets, `---` rules
//! - `**bold**` spans inside paragraphs
//!
//! Elements that cannot be rendered (missing or undecodable images,
//! malformed image lines) are skipped and reported, or turned into errors
//! with [`ErrorMode::Strict`].

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert_file, ConvertOptions, ConvertResult, DocumentEmitter, EmitterRegistry, OutputFormat,
};
pub use detect::{detect_image, load_image, ImageKind};
pub use error::{Error, Result};
pub use model::{
    Block, Document, ListInfo, Metadata, MetadataField, Paragraph, ParagraphRole, ParagraphStyle,
    SkipReason, SkippedElement, Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use parser::{ErrorMode, ParseOptions};
pub use render::{JsonFormat, PageSetup, RenderOptions, RenderResult, RenderStats};

use std::path::{Path, PathBuf};

/// Parse Markdown text with default options.
///
/// # Example
///
/// ```
/// let doc = mdreport::parse_str("# Title\n\n- First point\n").unwrap();
/// assert_eq!(doc.metadata.title.as_deref(), Some("Title"));
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn parse_str(input: &str) -> Result<Document> {
    parser::parse(input, &ParseOptions::default())
}

/// Parse Markdown text with custom options.
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    parser::parse(input, options)
}

/// Parse a Markdown file.
///
/// # Example
///
/// ```no_run
/// use mdreport::parse_file;
///
/// let doc = parse_file("overview.md").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &ParseOptions::default())
}

/// Parse a Markdown file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<Document> {
    let source = std::fs::read_to_string(path.as_ref())?;
    parser::parse(&source, options)
}

/// Convert Markdown text to a complete HTML page.
///
/// Relative image paths resolve against the working directory.
///
/// # Example
///
/// ```
/// let html = mdreport::markdown_to_html("## Scope\n\nA & B").unwrap();
/// assert!(html.contains("<h2>Scope</h2>"));
/// assert!(html.contains("<p>A &amp; B</p>"));
/// ```
pub fn markdown_to_html(input: &str) -> Result<String> {
    let doc = parse_str(input)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert Markdown text to PDF bytes.
///
/// # Example
///
/// ```no_run
/// let pdf = mdreport::markdown_to_pdf("# Title\n\nBody text.").unwrap();
/// std::fs::write("overview.pdf", pdf).unwrap();
/// ```
pub fn markdown_to_pdf(input: &str) -> Result<Vec<u8>> {
    let doc = parse_str(input)?;
    render::to_pdf(&doc, &RenderOptions::default())
}

/// Builder for parsing and rendering reports.
///
/// # Example
///
/// ```no_run
/// use mdreport::MdReport;
///
/// let report = MdReport::new()
///     .with_table_header_marker("Item")
///     .with_title("Site Survey")
///     .parse_file("overview.md")?;
///
/// std::fs::write("overview.html", report.to_html()?)?;
/// std::fs::write("overview.pdf", report.to_pdf()?)?;
/// # Ok::<(), mdreport::Error>(())
/// ```
pub struct MdReport {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl MdReport {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on unusable elements instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self.render_options = self.render_options.strict();
        self
    }

    /// Only open tables on pipe lines containing `marker`.
    pub fn with_table_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_table_header_marker(marker);
        self
    }

    /// Set the document title used when the input has no level-1 heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Resolve relative image paths against `dir`.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.render_options = self.render_options.with_asset_dir(dir);
        self
    }

    /// Set the PDF page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.render_options = self.render_options.with_page(page);
        self
    }

    /// Parse Markdown text.
    pub fn parse_str(self, input: &str) -> Result<MdReportResult> {
        let document = parser::parse(input, &self.parse_options)?;
        Ok(MdReportResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a Markdown file.
    ///
    /// Unless an asset directory was set, images resolve against the
    /// file's directory.
    pub fn parse_file<P: AsRef<Path>>(mut self, path: P) -> Result<MdReportResult> {
        let path = path.as_ref();
        if self.render_options.asset_dir.is_none() {
            self.render_options.asset_dir = path.parent().map(Path::to_path_buf);
        }
        let document = parse_file_with_options(path, &self.parse_options)?;
        Ok(MdReportResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for MdReport {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed report ready to be rendered.
pub struct MdReportResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl MdReportResult {
    /// Render to an HTML page.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Render to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.render_options)
    }

    /// Render to PDF, reporting stats and skipped elements.
    pub fn to_pdf_with_report(&self) -> Result<RenderResult<Vec<u8>>> {
        render::to_pdf_with_report(&self.document, &self.render_options)
    }

    /// Dump the parsed model as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Block statistics of the parsed document.
    pub fn stats(&self) -> RenderStats {
        RenderStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
