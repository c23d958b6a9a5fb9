//! Error types for mdreport library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or rendering a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error assembling or serializing the PDF object tree.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// Error decoding an image referenced by the document.
    #[error("Image decoding error: {0}")]
    Image(String),

    /// An image reference could not be resolved (strict mode only).
    #[error("Image not found: {}", .0.display())]
    MissingImage(PathBuf),

    /// An image line did not contain a `(path)` target (strict mode only).
    #[error("Malformed image reference on line {0}")]
    MalformedImage(usize),

    /// The image bytes are not in a supported format.
    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedImageFormat(PathBuf),

    /// JSON serialization of the document model failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No emitter is registered for the requested output.
    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}
