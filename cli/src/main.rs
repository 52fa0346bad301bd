//! pdfoutline CLI - PDF title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{process_directory_with_progress, BatchEvent};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{
    sections, BatchOptions, ExtractOptions, HeadingLevel, Outliner, PageSelection, PdfParser,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Detect the title and heading outline of PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file (or JSON line dump)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or save the outline of a document
    Outline {
        /// Input PDF file (or JSON line dump)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output a Markdown table of contents instead of JSON
        #[arg(long, conflicts_with = "compact")]
        markdown: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Append the outline to a JSON array file
        #[arg(long, value_name = "FILE")]
        append: Option<PathBuf>,

        /// Keep wrapped heading lines as separate headings
        #[arg(long)]
        no_merge: bool,
    },

    /// Dump the extracted text lines as JSON
    Lines {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print the text of each outline section
    Sections {
        /// Input PDF file (or JSON line dump)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Deepest level to show (1-3)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=3))]
        level: u8,
    },

    /// Show detection statistics
    Info {
        /// Input PDF file (or JSON line dump)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write an outline for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to DIR/outlines)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            markdown,
            pages,
            append,
            no_merge,
        }) => cmd_outline(
            &input,
            OutlineArgs {
                output: output.as_deref(),
                compact,
                markdown,
                pages: pages.as_deref(),
                append: append.as_deref(),
                no_merge,
            },
        ),
        Some(Commands::Lines {
            input,
            output,
            pages,
        }) => cmd_lines(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Sections { input, level }) => cmd_sections(&input, level),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
        }) => cmd_batch(&input, output, sequential, compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_outline(&input, OutlineArgs::default())
            } else {
                println!("{}", "Usage: pdfoutline <FILE>".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[derive(Default)]
struct OutlineArgs<'a> {
    output: Option<&'a Path>,
    compact: bool,
    markdown: bool,
    pages: Option<&'a str>,
    append: Option<&'a Path>,
    no_merge: bool,
}

fn page_selection(pages: Option<&str>) -> pdfoutline::Result<PageSelection> {
    pages.map_or(Ok(PageSelection::All), PageSelection::parse)
}

fn cmd_outline(input: &Path, args: OutlineArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let mut outliner = Outliner::new()
        .with_pages(page_selection(args.pages)?)
        .lenient();
    if args.no_merge {
        outliner = outliner.unmerged();
    }

    let lines = outliner.load_lines(input)?;
    log::debug!("Loaded {} lines from {}", lines.len(), input.display());
    let outline = outliner.detect(&lines).outline;

    if let Some(path) = args.append {
        render::append_json_record(path, &outline)?;
        println!("{} {}", "Appended to".green(), path.display());
    }

    let rendered = if args.markdown {
        render::to_markdown(&outline)
    } else if args.compact {
        render::to_json(&outline, JsonFormat::Compact)?
    } else {
        render::to_json(&outline, JsonFormat::Pretty)?
    };

    if let Some(path) = args.output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else if args.append.is_none() {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_lines(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions::new()
        .lenient()
        .with_pages(page_selection(pages)?);
    let lines = PdfParser::open_with_options(input, options)?.extract_lines()?;
    let json = render::lines_to_json(&lines, JsonFormat::Pretty)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} lines to {}",
            "Saved".green(),
            lines.len(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_sections(input: &Path, max_level: u8) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = Outliner::new().lenient();
    let lines = outliner.load_lines(input)?;
    let detection = outliner.detect(&lines);

    if let Some(title) = &detection.outline.title {
        println!("{}", title.cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
    }

    let max_level = HeadingLevel::from_depth(max_level);
    for section in sections(&lines, &detection) {
        if section.level > max_level {
            continue;
        }
        let indent = "  ".repeat(usize::from(section.level.depth() - 1));
        println!(
            "{}{} {} {}",
            indent,
            section.level.as_str().yellow(),
            section.heading.bold(),
            format!("(p. {}, {} words)", section.page, section.word_count()).dimmed()
        );
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = Outliner::new().lenient();
    let lines = outliner.load_lines(input)?;
    let detection = outliner.detect(&lines);
    let outline = &detection.outline;

    println!("{}", "Outline Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Lines".bold(), lines.len());
    if let Some(last) = lines.last() {
        println!("{}: {}", "Pages".bold(), last.page);
    }
    println!("{}: {}", "Body size".bold(), detection.reference_size);
    println!("{}: {}", "Candidates".bold(), detection.candidate_count);
    println!("{}: {}", "Headings".bold(), detection.headings.len());
    println!(
        "{}: {}",
        "Title".bold(),
        outline.title.as_deref().unwrap_or("(none)")
    );

    println!();
    println!("{}", "Levels".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        println!("{}: {}", level.as_str().bold(), outline.entries_at(level).count());
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<PathBuf>,
    sequential: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new()
        .with_parallel(!sequential)
        .with_extract_options(ExtractOptions::new().lenient());
    if compact {
        options = options.with_format(JsonFormat::Compact);
    }
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let dir = input.to_path_buf();
    let worker = thread::spawn(move || process_directory_with_progress(&dir, &options, tx));

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for event in rx {
        match event {
            BatchEvent::Started(total) => pb.set_length(total as u64),
            BatchEvent::Processed(entry) => {
                let name = entry
                    .file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                pb.set_message(name);
                pb.inc(1);
            }
        }
    }
    pb.finish_and_clear();

    let report = worker
        .join()
        .map_err(|_| "batch worker panicked".to_string())??;

    for entry in &report.documents {
        match (&entry.output, &entry.error) {
            (Some(output), _) => println!(
                "{} {} {}",
                "✓".green(),
                output.display(),
                format!("({} headings)", entry.headings).dimmed()
            ),
            (None, Some(error)) => {
                println!("{} {}: {}", "✗".red(), entry.file.display(), error)
            }
            (None, None) => {}
        }
    }

    println!(
        "\n{} {}/{} documents processed at {}",
        "Done!".green().bold(),
        report.succeeded(),
        report.documents.len(),
        report.processed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
