//! Rendering options and configuration.

use std::path::{Path, PathBuf};

use crate::parser::ErrorMode;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to PDF points.
pub fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

/// Default `<title>` of the HTML shell and fallback PDF title.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Feasibility Report";

/// Options for rendering a parsed report.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory image paths are resolved against (`None` = working directory)
    pub asset_dir: Option<PathBuf>,

    /// Title written into the HTML head and used when the report has no `# ` heading
    pub document_title: String,

    /// What to do with images that cannot be emitted
    pub error_mode: ErrorMode,

    /// PDF page size and margins
    pub page: PageSetup,

    /// Box (width, height) in points that PDF images are fitted into
    pub image_box: (f32, f32),

    /// PDF table column widths in points
    pub table_column_widths: Vec<f32>,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory image paths are resolved against.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on missing or undecodable images.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the PDF page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set the PDF image box in millimetres.
    pub fn with_image_box_mm(mut self, width: f32, height: f32) -> Self {
        self.image_box = (mm(width), mm(height));
        self
    }

    /// Set the PDF table column widths in millimetres.
    pub fn with_column_widths_mm(mut self, widths: &[f32]) -> Self {
        self.table_column_widths = widths.iter().map(|w| mm(*w)).collect();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Resolve an image path as written in the source.
    pub fn resolve_asset(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.asset_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_dir: None,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            error_mode: ErrorMode::Lenient,
            page: PageSetup::a4(),
            image_box: (mm(160.0), mm(120.0)),
            table_column_widths: vec![mm(45.0), mm(80.0), mm(25.0)],
            collect_stats: false,
        }
    }
}

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Top margin
    pub margin_top: f32,
    /// Bottom margin
    pub margin_bottom: f32,
}

impl PageSetup {
    /// A4 portrait with 20 mm sides, 30 mm top and 20 mm bottom margins.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_left: mm(20.0),
            margin_right: mm(20.0),
            margin_top: mm(30.0),
            margin_bottom: mm(20.0),
        }
    }

    /// Set all four margins in millimetres.
    pub fn with_margins_mm(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.margin_left = mm(left);
        self.margin_right = mm(right);
        self.margin_top = mm(top);
        self.margin_bottom = mm(bottom);
        self
    }

    /// Width available to flowables.
    pub fn frame_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available to flowables on one page.
    pub fn frame_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Y coordinate of the top of the frame (PDF origin is bottom-left).
    pub fn frame_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}
