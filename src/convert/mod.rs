//! Output emitters behind a registry keyed by output extension.
//!
//! Every output format is a [`DocumentEmitter`]. The [`EmitterRegistry`]
//! picks an emitter from the extension of the output path, so adding a
//! format means registering one more emitter.
//!
//! # Example
//!
//! ```no_run
//! use mdreport::convert::{ConvertOptions, EmitterRegistry};
//! use std::path::Path;
//!
//! fn main() -> mdreport::Result<()> {
//!     let registry = EmitterRegistry::with_defaults();
//!     let result = registry.convert_file(
//!         Path::new("overview.md"),
//!         Path::new("overview.pdf"),
//!         &ConvertOptions::default(),
//!     )?;
//!     println!("{} bytes, {} skipped", result.content_len(), result.skipped.len());
//!     Ok(())
//! }
//! ```

mod emitters;

pub use emitters::{HtmlEmitter, JsonEmitter, PdfEmitter};

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, SkippedElement};
use crate::parser::{self, ErrorMode, ParseOptions};
use crate::render::{JsonFormat, RenderOptions, RenderResult, RenderStats};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Options for a whole Markdown-to-output conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Layout of JSON output
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Fail instead of skipping unusable elements, both when parsing and rendering.
    pub fn strict(mut self) -> Self {
        self.parse.error_mode = ErrorMode::Strict;
        self.render.error_mode = ErrorMode::Strict;
        self
    }

    /// Only open tables on pipe lines containing `marker`.
    pub fn with_table_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.parse = self.parse.with_table_header_marker(marker);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render = self.render.with_title(title);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Output format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Self-contained HTML page
    Html,

    /// Paginated PDF
    Pdf,

    /// JSON dump of the parsed model
    Json,
}

impl OutputFormat {
    /// Default file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "HTML"),
            OutputFormat::Pdf => write!(f, "PDF"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Encoded output
    pub output: Vec<u8>,

    /// Source document metadata
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,

    /// Elements left out of the output
    pub skipped: Vec<SkippedElement>,

    /// Format of `output`
    pub format: OutputFormat,
}

impl ConvertResult {
    /// Wrap a renderer result.
    pub fn from_render(result: RenderResult<Vec<u8>>, format: OutputFormat) -> Self {
        Self {
            output: result.output,
            metadata: result.metadata,
            stats: result.stats,
            skipped: result.skipped,
            format,
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Get output length in bytes.
    pub fn content_len(&self) -> usize {
        self.output.len()
    }

    /// Output as text, for the text-based formats.
    pub fn as_text(&self) -> Option<&str> {
        match self.format {
            OutputFormat::Pdf => None,
            _ => std::str::from_utf8(&self.output).ok(),
        }
    }
}

/// Trait for output emitters.
///
/// Implement this trait to add support for a new output format.
pub trait DocumentEmitter: Send + Sync {
    /// Get the output file extensions handled by this emitter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this emitter.
    fn name(&self) -> &str;

    /// Format this emitter produces.
    fn format(&self) -> OutputFormat;

    /// Render a parsed document.
    fn emit(&self, doc: &Document, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this emitter handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for output emitters.
pub struct EmitterRegistry {
    emitters: HashMap<String, Arc<dyn DocumentEmitter>>,
    by_name: HashMap<String, Arc<dyn DocumentEmitter>>,
}

impl EmitterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            emitters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the HTML, PDF and JSON emitters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlEmitter::new()));
        registry.register(Arc::new(PdfEmitter::new()));
        registry.register(Arc::new(JsonEmitter::new()));
        registry
    }

    /// Register an emitter for all its extensions.
    pub fn register(&mut self, emitter: Arc<dyn DocumentEmitter>) {
        for ext in emitter.supported_extensions() {
            self.emitters.insert(ext.to_lowercase(), emitter.clone());
        }
        self.by_name.insert(emitter.name().to_lowercase(), emitter);
    }

    /// Get an emitter by output extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentEmitter>> {
        self.emitters.get(&ext.to_lowercase()).cloned()
    }

    /// Get an emitter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentEmitter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.emitters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.emitters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Render a parsed document with the emitter for `ext`.
    pub fn emit(
        &self,
        doc: &Document,
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let emitter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedOutput(ext.to_string()))?;
        emitter.emit(doc, options)
    }

    /// Parse `input` and write it to `output`, choosing the emitter from
    /// the output extension.
    ///
    /// Relative image paths resolve against the input's directory unless
    /// an asset directory is already set. The output file is overwritten.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let ext = output
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedOutput(output.display().to_string()))?;
        let emitter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedOutput(ext.to_string()))?;

        let source = fs::read_to_string(input)?;
        let doc = parser::parse(&source, &options.parse)?;

        let mut options = options.clone();
        if options.render.asset_dir.is_none() {
            options.render.asset_dir = input.parent().map(Path::to_path_buf);
        }

        let result = emitter.emit(&doc, &options)?;
        fs::write(output, &result.output)?;
        log::info!(
            "wrote {} ({} bytes, {} skipped)",
            output.display(),
            result.content_len(),
            result.skipped.len()
        );
        Ok(result)
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convert `input` to `output` with the default emitters.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    EmitterRegistry::with_defaults().convert_file(input, output, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .strict()
            .with_table_header_marker("Item")
            .with_title("Survey")
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.parse.error_mode, ErrorMode::Strict);
        assert_eq!(options.render.error_mode, ErrorMode::Strict);
        assert_eq!(options.parse.table_header_marker.as_deref(), Some("Item"));
        assert_eq!(options.render.document_title, "Survey");
        assert_eq!(options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = EmitterRegistry::with_defaults();
        assert!(registry.supports("html"));
        assert!(registry.supports("PDF"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("docx"));
        assert_eq!(
            registry.supported_extensions(),
            vec!["htm", "html", "json", "pdf"]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = EmitterRegistry::with_defaults();
        let emitter = registry.get_by_extension("htm").unwrap();
        assert_eq!(emitter.name(), "html");
        assert_eq!(emitter.format(), OutputFormat::Html);
        assert!(registry.get_by_name("PDF").is_some());
    }

    #[test]
    fn test_emit_unsupported() {
        let registry = EmitterRegistry::with_defaults();
        let err = registry
            .emit(&Document::new(), "docx", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOutput(_)));
    }

    #[test]
    fn test_emit_html_text() {
        let registry = EmitterRegistry::with_defaults();
        let doc = parser::parse("# Title", &ParseOptions::default()).unwrap();
        let result = registry.emit(&doc, "html", &ConvertOptions::default()).unwrap();

        assert_eq!(result.mime_type(), "text/html");
        assert!(result.as_text().unwrap().contains("<h1>Title</h1>"));
        assert_eq!(result.stats.heading_count, 1);
    }
}
