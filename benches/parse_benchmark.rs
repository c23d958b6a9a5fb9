//! Benchmarks for mdreport parsing and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic report with repeated sections.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mdreport::render::{to_html, to_pdf, RenderOptions};
use mdreport::{parse_str, parse_str_with_options, ParseOptions};

/// Creates a synthetic report with the given number of sections.
fn create_test_report(sections: usize) -> String {
    let mut report = String::from("# Feasibility Study\n\n");
    report.push_str("**Prepared by:** Benchmark Team\n");
    report.push_str("**Date:** 2024-01-01\n\n---\n\n");

    for i in 0..sections {
        report.push_str(&format!("## Section {}\n\n", i + 1));
        report.push_str(
            "The proposed system **reduces** manual effort & improves <throughput> \
             across all sites. It relies on existing infrastructure where possible.\n\n",
        );
        report.push_str("### Key points\n\n");
        report.push_str("- Lower operating cost\n- Faster rollout\n* Fewer handoffs\n\n");
        report.push_str("| Item | Description | Cost |\n|------|-------------|------|\n");
        for row in 0..5 {
            report.push_str(&format!(
                "| **Unit {row}** | Hardware and installation for site {i} | {} |\n",
                (row + 1) * 100
            ));
        }
        report.push('\n');
    }
    report
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [1, 10, 50] {
        let report = create_test_report(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &report, |b, input| {
            b.iter(|| parse_str(black_box(input)))
        });
    }

    let report = create_test_report(10);
    let options = ParseOptions::new().with_table_header_marker("Item");
    group.bench_function("table_marker", |b| {
        b.iter(|| parse_str_with_options(black_box(&report), &options))
    });

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let options = RenderOptions::default();

    for sections in [1, 10, 50] {
        let Ok(doc) = parse_str(&create_test_report(sections)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("html", sections), &doc, |b, doc| {
            b.iter(|| to_html(black_box(doc), &options))
        });
        group.bench_with_input(BenchmarkId::new("pdf", sections), &doc, |b, doc| {
            b.iter(|| to_pdf(black_box(doc), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_render);
criterion_main!(benches);
