//! mdreport CLI - Markdown report to HTML/PDF tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdreport::{
    convert_file, parse_file_with_options, ConvertOptions, JsonFormat, OutputFormat, RenderStats,
};

const DEFAULT_INPUT: &str = "overview.md";

#[derive(Parser)]
#[command(name = "mdreport")]
#[command(version)]
#[command(about = "Render Markdown feasibility reports to HTML and PDF", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    #[command(flatten)]
    report: ReportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct ReportArgs {
    /// Fail on missing or unreadable images instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Only treat pipe lines containing this text as table headers
    #[arg(long, value_name = "TEXT")]
    table_marker: Option<String>,

    /// HTML page title, also the PDF title when the input has no top-level heading
    #[arg(long)]
    title: Option<String>,
}

impl ReportArgs {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new();
        if self.strict {
            options = options.strict();
        }
        if let Some(marker) = &self.table_marker {
            options = options.with_table_header_marker(marker.clone());
        }
        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to a styled HTML page
    Html {
        /// Input Markdown file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file (defaults to the input name with .html)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Convert Markdown to an A4 PDF
    Pdf {
        /// Input Markdown file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file (defaults to the input name with .pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Dump the parsed document as JSON
    Json {
        /// Input Markdown file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show document information
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            report,
        }) => cmd_convert(&input, output, OutputFormat::Html, &report),
        Some(Commands::Pdf {
            input,
            output,
            report,
        }) => cmd_convert(&input, output, OutputFormat::Pdf, &report),
        Some(Commands::Json {
            input,
            output,
            compact,
            report,
        }) => cmd_json(&input, output.as_deref(), compact, &report),
        Some(Commands::Info { input, report }) => cmd_info(&input, &report),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_convert_all(&cli.input, &cli.report),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Output path next to the input, with the format's extension.
fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    format: OutputFormat,
    report: &ReportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| default_output(input, format));
    let result = convert_file(input, &output, &report.options())?;

    for skipped in &result.skipped {
        println!("{} {}", "Skipped".yellow(), skipped);
    }

    println!(
        "{} created successfully: {}",
        format,
        output.display().to_string().green()
    );
    if format == OutputFormat::Html {
        println!("Open this file in your browser and print to PDF");
    }

    Ok(())
}

fn cmd_convert_all(input: &Path, report: &ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let formats = [OutputFormat::Html, OutputFormat::Pdf];
    let options = report.options();

    let pb = ProgressBar::new(formats.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        pb.set_message(format!("Generating {}...", format));
        let output = default_output(input, format);
        let result = convert_file(input, &output, &options)?;
        written.push((format, output, result.skipped));
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    for (format, output, skipped) in written {
        for element in &skipped {
            println!("{} {}", "Skipped".yellow(), element);
        }
        println!(
            "{} created successfully: {}",
            format,
            output.display().to_string().green()
        );
    }
    println!("Open the HTML file in your browser and print to PDF");

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    report: &ReportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = report.options();
    let doc = parse_file_with_options(input, &options.parse)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = mdreport::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, report: &ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = report.options();
    let doc = parse_file_with_options(input, &options.parse)?;
    let stats = RenderStats::from_document(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    for field in &doc.metadata.fields {
        println!("{}: {}", field.label.bold(), field.value);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Rules".bold(), stats.horizontal_rule_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if !doc.skipped.is_empty() {
        println!();
        println!("{}", "Skipped".yellow().bold());
        for skipped in &doc.skipped {
            println!("  {} {}", "•".dimmed(), skipped);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdreport".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown report to HTML and PDF tool");
    println!();
    println!("License: MIT");
}
