//! Inline bold-span parsing.

use regex::Regex;

use crate::model::{MetadataField, TextRun};

/// Splits text on `**...**` spans.
#[derive(Debug, Clone)]
pub struct InlineParser {
    bold_pattern: Regex,
}

impl InlineParser {
    /// Create a new inline parser.
    pub fn new() -> Self {
        Self {
            bold_pattern: Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"),
        }
    }

    /// Split text into plain and bold runs.
    ///
    /// Spans are matched non-greedily left to right. An unpaired `**` is
    /// kept as literal text.
    pub fn parse(&self, text: &str) -> Vec<TextRun> {
        let mut runs = Vec::new();
        let mut last = 0;

        for caps in self.bold_pattern.captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                runs.push(TextRun::new(&text[last..whole.start()]));
            }
            if !inner.as_str().is_empty() {
                runs.push(TextRun::bold(inner.as_str()));
            }
            last = whole.end();
        }

        if last < text.len() {
            runs.push(TextRun::new(&text[last..]));
        }
        runs
    }

    /// Split a metadata line into its bold label and the trailing value.
    ///
    /// Returns `None` when the line does not open with a bold span.
    pub fn metadata_field(&self, line: &str) -> Option<MetadataField> {
        let runs = self.parse(line);
        let (first, rest) = runs.split_first()?;
        if !first.style.bold {
            return None;
        }
        let value: String = rest.iter().map(|r| r.text.as_str()).collect();
        Some(MetadataField::new(first.text.trim(), value.trim()))
    }
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove every `**` marker from text.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let runs = InlineParser::new().parse("No markup here.");
        assert_eq!(runs, vec![TextRun::new("No markup here.")]);
    }

    #[test]
    fn test_parse_multiple_spans() {
        let runs = InlineParser::new().parse("A **bold** and **another** one");
        assert_eq!(
            runs,
            vec![
                TextRun::new("A "),
                TextRun::bold("bold"),
                TextRun::new(" and "),
                TextRun::bold("another"),
                TextRun::new(" one"),
            ]
        );
    }

    #[test]
    fn test_unpaired_marker_is_literal() {
        let runs = InlineParser::new().parse("**one** two **three");
        assert_eq!(
            runs,
            vec![
                TextRun::bold("one"),
                TextRun::new(" two **three"),
            ]
        );
    }

    #[test]
    fn test_metadata_field() {
        let parser = InlineParser::new();
        let field = parser.metadata_field("**Prepared by:** Jane Doe").unwrap();
        assert_eq!(field.label, "Prepared by:");
        assert_eq!(field.value, "Jane Doe");

        assert!(parser.metadata_field("Prepared by **Jane**").is_none());
    }

    #[test]
    fn test_strip_bold_markers() {
        assert_eq!(strip_bold_markers("**Date:** 1 May"), "Date: 1 May");
    }
}
