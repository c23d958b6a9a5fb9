//! Integration tests for the convert module.

use std::fs;
use std::sync::Arc;

use mdreport::convert::{
    convert_file, ConvertOptions, ConvertResult, DocumentEmitter, EmitterRegistry, OutputFormat,
};
use mdreport::error::{Error, Result};
use mdreport::model::Document;
use mdreport::render::RenderStats;

/// Emitter writing one line per block, for registry tests.
struct OutlineEmitter;

impl DocumentEmitter for OutlineEmitter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "outline"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn emit(&self, doc: &Document, _options: &ConvertOptions) -> Result<ConvertResult> {
        let text: Vec<String> = doc
            .blocks
            .iter()
            .filter_map(|b| b.plain_text())
            .collect();
        Ok(ConvertResult {
            output: text.join("\n").into_bytes(),
            metadata: doc.metadata.clone(),
            stats: RenderStats::from_document(doc),
            skipped: Vec::new(),
            format: self.format(),
        })
    }
}

#[test]
fn test_registry_new_is_empty() {
    let registry = EmitterRegistry::new();
    assert!(!registry.supports("html"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_registry_register_custom() {
    let mut registry = EmitterRegistry::new();
    registry.register(Arc::new(OutlineEmitter));

    assert!(registry.supports("TXT"));
    assert_eq!(registry.get_by_name("outline").unwrap().name(), "outline");

    let doc = mdreport::parse_str("# One\n\nTwo").unwrap();
    let result = registry
        .emit(&doc, "txt", &ConvertOptions::default())
        .unwrap();
    assert_eq!(result.as_text(), Some("One\nTwo"));
}

#[test]
fn test_convert_file_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("overview.md");
    let output = dir.path().join("overview.html");
    fs::write(&input, "# Feasibility\n\nBody & more.\n").unwrap();

    let result = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(result.format, OutputFormat::Html);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.as_bytes(), result.output.as_slice());
    assert!(written.contains("<h1>Feasibility</h1>"));
    assert!(written.contains("<p>Body &amp; more.</p>"));
}

#[test]
fn test_convert_file_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("overview.md");
    let output = dir.path().join("overview.html");
    fs::write(&input, "Fresh").unwrap();
    fs::write(&output, "stale content").unwrap();

    convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("stale content"));
    assert!(written.contains("<p>Fresh</p>"));
}

#[test]
fn test_convert_file_resolves_images_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("images")).unwrap();
    image::RgbImage::from_pixel(8, 8, image::Rgb([0, 128, 255]))
        .save(dir.path().join("images").join("site.png"))
        .unwrap();

    let input = dir.path().join("overview.md");
    fs::write(&input, "![Site](images/site.png)\n").unwrap();

    let html = convert_file(
        &input,
        &dir.path().join("overview.html"),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert!(html.skipped.is_empty());
    assert!(html
        .as_text()
        .unwrap()
        .contains("<img src=\"images/site.png\" alt=\"Site\">"));

    let pdf = convert_file(
        &input,
        &dir.path().join("overview.pdf"),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert!(pdf.skipped.is_empty());
    assert_eq!(pdf.stats.image_count, 1);
    assert_eq!(pdf.mime_type(), "application/pdf");
}

#[test]
fn test_convert_file_strict_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("overview.md");
    let output = dir.path().join("overview.pdf");
    fs::write(&input, "![Gone](gone.png)\n").unwrap();

    let err = convert_file(&input, &output, &ConvertOptions::new().strict()).unwrap_err();
    assert!(matches!(err, Error::MissingImage(_)));
    assert!(!output.exists());
}

#[test]
fn test_convert_file_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("overview.md");
    fs::write(&input, "text").unwrap();

    let err = convert_file(
        &input,
        &dir.path().join("overview.docx"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedOutput(_)));
}

#[test]
fn test_convert_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(
        &dir.path().join("overview.md"),
        &dir.path().join("overview.html"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("overview.md");
    fs::write(&input, "# Title\n\n**Prepared by:** Jane Doe\n").unwrap();

    let result = convert_file(
        &input,
        &dir.path().join("overview.json"),
        &ConvertOptions::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&result.output).unwrap();
    assert_eq!(value["metadata"]["title"], "Title");
    assert_eq!(value["metadata"]["fields"][0]["label"], "Prepared by:");
    assert_eq!(value["metadata"]["fields"][0]["value"], "Jane Doe");
}
