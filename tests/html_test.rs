//! Integration tests for HTML output.

use mdreport::render::{to_html, to_html_with_report, RenderOptions};
use mdreport::{markdown_to_html, parse_str, parse_str_with_options, Block, ParseOptions};

fn body(html: &str) -> &str {
    let start = html.find("<body>").unwrap() + "<body>".len();
    let end = html.rfind("</body>").unwrap();
    &html[start..end]
}

#[test]
fn test_headings_are_verbatim() {
    for (line, tag) in [
        ("# Tom & Jerry", "h1"),
        ("## <Scope>", "h2"),
        ("### Costs", "h3"),
    ] {
        let html = markdown_to_html(line).unwrap();
        let text = line.trim_start_matches('#').trim();
        assert!(
            html.contains(&format!("<{tag}>{text}</{tag}>")),
            "missing {tag} for {line:?}"
        );
    }
}

#[test]
fn test_paragraph_escaped_before_bold() {
    let html = markdown_to_html("Use **a < b** & <c>").unwrap();
    assert!(html.contains("<p>Use <strong>a &lt; b</strong> &amp; &lt;c&gt;</p>"));
}

#[test]
fn test_bullets_verbatim() {
    let html = markdown_to_html("- Keep **this** & that\n* Star item").unwrap();
    assert!(html.contains("<li>Keep **this** & that</li>"));
    assert!(html.contains("<li>Star item</li>"));
    assert!(!html.contains("<ul>"));
}

#[test]
fn test_report_scenario() {
    let input = "# Title\n\n**Prepared by:** Jane Doe\n\n- First point\n- Second point\n";
    let html = markdown_to_html(input).unwrap();
    let body = body(&html);

    let title = body.find("<h1>Title</h1>").unwrap();
    let meta = body
        .find("<div class=\"metadata\"><p>Prepared by: Jane Doe</p></div>")
        .unwrap();
    let first = body.find("<li>First point</li>").unwrap();
    let second = body.find("<li>Second point</li>").unwrap();
    assert!(title < meta && meta < first && first < second);
}

#[test]
fn test_table_round_trip() {
    let doc = parse_str("| Item | Cost |\n|------|------|\n| **Camera** | 120 |\n").unwrap();
    let Block::Table(table) = &doc.blocks[0] else {
        panic!("expected a table");
    };
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.body().len(), 1);
    assert!(table.rows.iter().all(|r| r.cells.len() == 2));

    let html = to_html(&doc, &RenderOptions::default()).unwrap();
    assert!(html.contains("<tr><th>Item</th><th>Cost</th></tr>"));
    assert!(html.contains("<tr><td><strong>Camera</strong></td><td>120</td></tr>"));
}

#[test]
fn test_header_only_table() {
    let html = markdown_to_html("| Item | Cost |\n|------|------|\n\nAfter").unwrap();
    assert!(html.contains("<table>\n<tr><th>Item</th><th>Cost</th></tr>\n</table>\n"));
    assert!(!html.contains("<td>"));
    assert!(html.contains("<p>After</p>"));
}

#[test]
fn test_metadata_label_inside_bullet_and_paragraph() {
    let html = markdown_to_html("- Review on **Date:** 5 May").unwrap();
    assert!(html.contains("<li>Review on **Date:** 5 May</li>"));
    assert!(!html.contains("class=\"metadata\"><p>"));

    let html = markdown_to_html("R&D <lead> moved the **Date:** again").unwrap();
    assert!(html.contains("<p>R&amp;D &lt;lead&gt; moved the <strong>Date:</strong> again</p>"));
    assert!(!html.contains("class=\"metadata\"><p>"));
}

#[test]
fn test_table_marker_gates_tables() {
    let input = "| a | b |\n| Item | Cost |\n| x | 1 |";
    let options = ParseOptions::new().with_table_header_marker("Item");
    let doc = parse_str_with_options(input, &options).unwrap();

    assert!(doc.blocks[0].is_paragraph());
    assert!(doc.blocks[1].is_table());
}

#[test]
fn test_rule_emitted() {
    let html = markdown_to_html("Before\n\n---\n\nAfter").unwrap();
    assert!(html.contains("<p>Before</p>\n<hr>\n<p>After</p>"));
}

#[test]
fn test_missing_image_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let doc = parse_str("![Chart](charts/none.png)\n\nAfter").unwrap();
    let options = RenderOptions::new().with_asset_dir(dir.path());

    let result = to_html_with_report(&doc, &options).unwrap();
    assert!(!result.output.contains("<img"));
    assert!(result.output.contains("<p>After</p>"));
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].line, 1);
}

#[test]
fn test_idempotent() {
    let input = "# Title\n\n| A | B |\n| 1 | 2 |\n\nSome **bold** text.\n";
    assert_eq!(
        markdown_to_html(input).unwrap(),
        markdown_to_html(input).unwrap()
    );
}

#[test]
fn test_page_structure() {
    let html = markdown_to_html("").unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<title>Feasibility Report</title>"));
    assert!(html.contains("@page"));
    assert!(html.ends_with("</body>\n</html>"));
}
