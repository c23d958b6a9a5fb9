//! Parsing options and configuration.

/// Labels whose bold form (`**Label:**`) marks a report metadata line.
pub const DEFAULT_METADATA_LABELS: [&str; 4] = ["Prepared by:", "Department:", "Date:", "Company:"];

/// Options for parsing Markdown reports.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Text a pipe line must contain to open a table (`None` = any pipe line)
    pub table_header_marker: Option<String>,

    /// Labels recognised as metadata lines, without the `**` markers
    pub metadata_labels: Vec<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on malformed image references instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Only open a table on pipe lines containing `marker` (e.g. `"Item"`).
    pub fn with_table_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.table_header_marker = Some(marker.into());
        self
    }

    /// Replace the metadata labels.
    pub fn with_metadata_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.metadata_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            table_header_marker: None,
            metadata_labels: DEFAULT_METADATA_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Error handling mode for elements that cannot be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any unusable element
    Strict,
    /// Record the element as skipped and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .strict()
            .with_table_header_marker("Item")
            .with_metadata_labels(["Author:"]);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.table_header_marker.as_deref(), Some("Item"));
        assert_eq!(options.metadata_labels, vec!["Author:".to_string()]);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.table_header_marker.is_none());
        assert_eq!(options.metadata_labels.len(), 4);
    }
}
