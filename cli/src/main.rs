//! labeldiff CLI - compare two versions of a package-insert PDF

mod terminal;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use labeldiff::render::{escape_html, to_json};
use labeldiff::{
    Comparison, FileComparison, Granularity, JsonFormat, LabelDiff, Normalizer, PageSelection,
    Side,
};

#[derive(Parser)]
#[command(name = "labeldiff")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compare the clinical sections of two package-insert PDFs", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Previous version (PDF)
    #[arg(value_name = "OLD")]
    old: Option<PathBuf>,

    /// New version (PDF)
    #[arg(value_name = "NEW")]
    new: Option<PathBuf>,

    #[command(flatten)]
    options: CompareOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two PDF versions
    #[command(alias = "diff")]
    Compare {
        /// Previous version (PDF)
        #[arg(value_name = "OLD")]
        old: PathBuf,

        /// New version (PDF)
        #[arg(value_name = "NEW")]
        new: PathBuf,

        #[command(flatten)]
        options: CompareOptions,
    },

    /// Print the target sections extracted from a PDF
    Sections {
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

    /// Normalize a UTF-8 text file and print the result
    Normalize {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Normalization granularity
        #[arg(long, value_enum, default_value = "word", env = "LABELDIFF_GRANULARITY")]
        granularity: GranularityArg,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct CompareOptions {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "terminal", env = "LABELDIFF_FORMAT")]
    format: OutputFormat,

    /// Comparison granularity
    #[arg(long, value_enum, default_value = "word", env = "LABELDIFF_GRANULARITY")]
    granularity: GranularityArg,

    /// Compare the full text instead of the target sections
    #[arg(long)]
    whole_document: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Print the extracted sections of both files before the diff
    #[arg(long)]
    show_sections: bool,

    /// Disable the popular-token heuristic of the matcher
    #[arg(long)]
    no_autojunk: bool,

    /// Process both files in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Colored diff on the terminal
    Terminal,
    /// Standalone HTML page
    Html,
    /// Edit script and statistics as JSON
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum GranularityArg {
    /// Words and line breaks
    Word,
    /// Single characters, spacing-only changes ignored
    Character,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Word => Granularity::Word,
            GranularityArg::Character => Granularity::Character,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Compare { old, new, options }) => cmd_compare(&old, &new, &options),
        Some(Commands::Sections {
            input,
            output,
            pages,
        }) => cmd_sections(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Normalize { input, granularity }) => cmd_normalize(&input, granularity),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.old, cli.new) {
            // Default behavior: compare if both inputs are provided
            (Some(old), Some(new)) => cmd_compare(&old, &new, &cli.options),
            _ => {
                println!("{}", "Usage: labeldiff <OLD> <NEW>".yellow());
                println!("       labeldiff --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn ensure_exists(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn cmd_compare(
    old: &Path,
    new: &Path,
    options: &CompareOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(old)?;
    ensure_exists(new)?;

    let mut builder = LabelDiff::new()
        .granularity(options.granularity.into())
        .with_pages(parse_pages(options.pages.as_deref())?)
        .autojunk(!options.no_autojunk)
        .parallel(options.parallel);
    if options.whole_document {
        builder = builder.whole_document();
    }
    let comparator = builder.build();

    log::debug!("Comparing {} -> {} with {:?}", old.display(), new.display(), comparator);

    let pb = spinner("Analyzing documents...")?;
    let result = comparator.compare_files(old, new);
    pb.finish_and_clear();

    if options.show_sections {
        print_sections(old, new, &result);
    }

    if options.format == OutputFormat::Json {
        let json = to_json(&result.comparison, JsonFormat::Pretty)?;
        return emit(options.output.as_deref(), &json);
    }

    match &result.comparison {
        Comparison::NothingToCompare { side } => {
            let which = match side {
                Side::Old => old.display().to_string(),
                Side::New => new.display().to_string(),
                Side::Both => "either file".to_string(),
            };
            println!(
                "{} No target sections (efficacy, dosage, precautions) found in {}",
                "Warning:".yellow().bold(),
                which
            );
            println!(
                "{}",
                "The document may be image-only, or its section headers were not recognized."
                    .dimmed()
            );
        }
        Comparison::Identical(_) => {
            println!(
                "{}",
                "The target sections of both documents are identical.".green().bold()
            );
            println!(
                "{}",
                "(Line wrapping, spacing and sentence-ending variants were ignored.)".dimmed()
            );
        }
        Comparison::Changed(report) => {
            match options.format {
                OutputFormat::Html => {
                    let page = html_page(old, new, &report.markup);
                    emit(options.output.as_deref(), &page)?;
                }
                _ => emit(options.output.as_deref(), &terminal::render(&report.script))?,
            }

            let stats = &report.stats;
            eprintln!();
            eprintln!(
                "{} {} replaced, {} removed, {} added",
                "Changes:".cyan().bold(),
                stats.replace_ops,
                stats.delete_ops,
                stats.insert_ops
            );
        }
    }

    Ok(())
}

fn print_sections(old: &Path, new: &Path, result: &FileComparison) {
    for (path, text) in [(old, &result.old_text), (new, &result.new_text)] {
        println!("{} {}", "Extracted from".cyan().bold(), path.display());
        println!("{}", "─".repeat(40).dimmed());
        if text.trim().is_empty() {
            println!("{}", "(nothing)".dimmed());
        } else {
            println!("{}", text.trim_start());
        }
        println!();
    }
}

fn html_page(old: &Path, new: &Path, markup: &str) -> String {
    let old = escape_html(&old.display().to_string());
    let new = escape_html(&new.display().to_string());
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{old} → {new}</title>\n</head>\n<body>\n\
         <h1 style=\"font-size: 20px;\">{old} → {new}</h1>\n{markup}\n</body>\n</html>\n"
    )
}

fn cmd_sections(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(input)?;

    let comparator = LabelDiff::new().with_pages(parse_pages(pages)?).build();
    let sections = comparator.extract_sections_from_path(input);

    if sections.is_empty() {
        println!(
            "{} No target sections found in {}",
            "Warning:".yellow().bold(),
            input.display()
        );
        return Ok(());
    }

    emit(output, sections.trim_start())
}

fn cmd_normalize(input: &Path, granularity: GranularityArg) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let normalizer = match Granularity::from(granularity) {
        Granularity::Word => Normalizer::word(),
        Granularity::Character => Normalizer::character(),
    };
    println!("{}", normalizer.normalize(&text));
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "labeldiff".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Package-insert PDF comparison tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_compare_arguments() {
        let cli = Cli::try_parse_from(["labeldiff", "old.pdf", "new.pdf", "--granularity", "character"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.old, Some(PathBuf::from("old.pdf")));
        assert!(cli.options.granularity == GranularityArg::Character);
    }

    #[test]
    fn test_compare_subcommand() {
        let cli = Cli::try_parse_from([
            "labeldiff", "compare", "a.pdf", "b.pdf", "--format", "json", "--pages", "1-3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Compare { options, .. }) => {
                assert!(options.format == OutputFormat::Json);
                assert_eq!(options.pages.as_deref(), Some("1-3"));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_html_page_escapes_names() {
        let page = html_page(Path::new("a<b>.pdf"), Path::new("c.pdf"), "<div></div>");
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("a&lt;b&gt;.pdf"));
        assert!(page.contains("<div></div>"));
    }

    #[test]
    fn test_normalize_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, "효과가\n있습니다.".as_bytes()).unwrap();
        assert!(cmd_normalize(file.path(), GranularityArg::Word).is_ok());
    }
}
