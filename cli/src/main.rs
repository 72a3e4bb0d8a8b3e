//! fundsheet CLI - factsheet PDF to structured JSON converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use fundsheet::{parse_file_with_options, JsonFormat, Node, PageSelection, ParseOptions};

#[derive(Parser)]
#[command(name = "fundsheet")]
#[command(version)]
#[command(about = "Convert factsheet PDFs to hierarchical JSON", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (defaults to the input name with .json)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a factsheet PDF to structured JSON
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Document password
        #[arg(long, env = "FUNDSHEET_PASSWORD")]
        password: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Continue past pages that fail to parse
        #[arg(long)]
        lenient: bool,

        /// Skip table extraction
        #[arg(long)]
        no_tables: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Check whether a file is a supported PDF
    Detect {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            pages,
            password,
            compact,
            lenient,
            no_tables,
        }) => cmd_convert(
            &input,
            output.as_deref(),
            pages.as_deref(),
            password,
            compact,
            lenient,
            no_tables,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Detect { input }) => cmd_detect(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                let output = cli
                    .output
                    .unwrap_or_else(|| default_output_path(&input));
                cmd_convert(&input, Some(&output), None, None, false, false, false)
            } else {
                println!("{}", "Usage: fundsheet <FILE> [OUTPUT]".yellow());
                println!("       fundsheet --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}.json", stem))
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    password: Option<String>,
    compact: bool,
    lenient: bool,
    no_tables: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p)?
    } else {
        PageSelection::All
    };

    let mut options = ParseOptions::new().with_pages(page_selection);
    if lenient {
        options = options.lenient();
    }
    if no_tables {
        options = options.text_only();
    }
    if let Some(password) = password {
        options = options.with_password(password);
    }

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing factsheet...");
    let doc = parse_file_with_options(input, options)?;
    pb.inc(1);

    pb.set_message("Serializing...");
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = fundsheet::render::to_json(&doc, format)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    pb.inc(1);
    pb.finish_and_clear();

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} pages)",
            "Saved to".green(),
            path.display(),
            doc.page_count()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient mode so metadata still shows when some pages fail
    let options = ParseOptions::new().lenient();
    let doc = parse_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if doc.metadata.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = doc.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Structure Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut counts = NodeCounts::default();
    for page in &doc.pages {
        count_nodes(&page.content, &mut counts);
    }

    println!("{}: {}", "Sections".bold(), counts.sections);
    println!("{}: {}", "Subsections".bold(), counts.subsections);
    println!("{}: {}", "Paragraphs".bold(), counts.paragraphs);
    println!("{}: {}", "Tables".bold(), counts.tables);

    Ok(())
}

#[derive(Default)]
struct NodeCounts {
    sections: usize,
    subsections: usize,
    paragraphs: usize,
    tables: usize,
}

fn count_nodes(nodes: &[Node], counts: &mut NodeCounts) {
    for node in nodes {
        match node {
            Node::Section { content, .. } => {
                counts.sections += 1;
                count_nodes(content, counts);
            }
            Node::Subsection { content, .. } => {
                counts.subsections += 1;
                count_nodes(content, counts);
            }
            Node::Paragraph { .. } => counts.paragraphs += 1,
            Node::Table { .. } => counts.tables += 1,
        }
    }
}

fn cmd_detect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = fundsheet::detect_format(input)?;
    println!("{}: {}", input.display(), format.to_string().green());
    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "fundsheet".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Factsheet PDF to structured JSON converter");
    println!();
    println!("License: MIT");
}
