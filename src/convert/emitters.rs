//! Built-in emitters for HTML, PDF and JSON output.

use crate::error::Result;
use crate::model::Document;
use crate::render::{to_html_with_report, to_json, to_pdf_with_report, RenderStats};

use super::{ConvertOptions, ConvertResult, DocumentEmitter, OutputFormat};

/// Styled HTML page emitter.
#[derive(Debug, Clone, Default)]
pub struct HtmlEmitter {
    _private: (),
}

impl HtmlEmitter {
    /// Create a new HTML emitter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentEmitter for HtmlEmitter {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn name(&self) -> &str {
        "html"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn emit(&self, doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let result = to_html_with_report(doc, &options.render)?;
        Ok(ConvertResult::from_render(
            result.map(String::into_bytes),
            OutputFormat::Html,
        ))
    }
}

/// Paginated A4 PDF emitter.
#[derive(Debug, Clone, Default)]
pub struct PdfEmitter {
    _private: (),
}

impl PdfEmitter {
    /// Create a new PDF emitter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentEmitter for PdfEmitter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn emit(&self, doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let result = to_pdf_with_report(doc, &options.render)?;
        Ok(ConvertResult::from_render(result, OutputFormat::Pdf))
    }
}

/// Emitter dumping the parsed model as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter {
    _private: (),
}

impl JsonEmitter {
    /// Create a new JSON emitter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentEmitter for JsonEmitter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn emit(&self, doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let json = to_json(doc, options.json_format)?;
        Ok(ConvertResult {
            output: json.into_bytes(),
            metadata: doc.metadata.clone(),
            stats: RenderStats::from_document(doc),
            skipped: doc.skipped.clone(),
            format: OutputFormat::Json,
        })
    }
}
