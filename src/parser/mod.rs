//! Markdown report parsing module.

mod inline;
mod line;
mod options;
mod scanner;

pub use inline::{strip_bold_markers, InlineParser};
pub use line::{is_separator_row, split_cells, LineClassifier, LineKind};
pub use options::{ErrorMode, ParseOptions, DEFAULT_METADATA_LABELS};
pub use scanner::{parse, Scanner};
