//! Rendering module for converting parsed reports to output formats.

mod html;
mod json;
mod options;
pub mod pdf;
mod result;

pub use html::{escape_text, to_html, to_html_with_report, HtmlBuilder, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{mm, PageSetup, RenderOptions, DEFAULT_DOCUMENT_TITLE, PT_PER_MM};
pub use pdf::{to_pdf, to_pdf_with_report, PdfRenderer};
pub use result::{RenderResult, RenderStats};
