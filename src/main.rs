//! Certificate Generator CLI

use anyhow::{Context, Result};
use certgen::batch;
use certgen::cli::{print_summary, run_interactive_mode, ProgressObserver};
use certgen::report::{generate_report, ReportFormat};
use certgen::{packager, source, validator};
use certgen::{BatchOutcome, Config, LibreOfficeConverter};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "certgen")]
#[command(about = "Generate PDF certificates from a spreadsheet and a DOCX template", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON5 configuration file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate certificates, convert them to PDF and archive the PDFs
    Generate(GenerateArgs),

    /// Show matching records and which template tokens will be substituted
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Choose input, template and filters with prompts
    Interactive,
}

#[derive(Args)]
struct SourceArgs {
    /// Spreadsheet (.xlsx, .xls, .ods) or .csv with one row per recipient
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// DOCX template containing the placeholder tokens
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Field delimiter for CSV input
    #[arg(long)]
    delimiter: Option<char>,

    /// Only records whose street contains this text
    #[arg(long)]
    street: Option<String>,

    /// Only records with exactly this customer name
    #[arg(long)]
    customer: Option<String>,

    /// Only records with exactly this EAN code
    #[arg(long)]
    ean: Option<String>,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory for intermediate DOCX files
    #[arg(long)]
    docx_dir: Option<PathBuf>,

    /// Directory for generated PDFs
    #[arg(long)]
    pdf_dir: Option<PathBuf>,

    /// Zip archive written after the batch
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Converter executable (libreoffice, soffice, ...)
    #[arg(long)]
    converter: Option<String>,

    /// Seconds before a conversion is abandoned
    #[arg(long)]
    timeout: Option<u64>,

    /// Date text for the date placeholder instead of today
    #[arg(long)]
    date: Option<String>,

    /// Write a report (.md or .json) after the batch
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Show a progress bar instead of per-record log lines
    #[arg(long)]
    progress: bool,
}

impl SourceArgs {
    fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(template) = self.template {
            config.template = template;
        }
        if self.sheet.is_some() {
            config.sheet = self.sheet;
        }
        if let Some(delimiter) = self.delimiter {
            config.csv_delimiter = delimiter;
        }
        if self.street.is_some() {
            config.filters.street_contains = self.street;
        }
        if self.customer.is_some() {
            config.filters.customer = self.customer;
        }
        if self.ean.is_some() {
            config.filters.code = self.ean;
        }
    }
}

impl GenerateArgs {
    fn apply(self, config: &mut Config) {
        self.source.apply(config);
        if let Some(dir) = self.docx_dir {
            config.docx_dir = dir;
        }
        if let Some(dir) = self.pdf_dir {
            config.pdf_dir = dir;
        }
        if let Some(archive) = self.archive {
            config.archive = archive;
        }
        if let Some(binary) = self.converter {
            config.converter.binary = binary;
        }
        if self.timeout.is_some() {
            config.converter.timeout_secs = self.timeout;
        }
        if self.date.is_some() {
            config.date = self.date;
        }
    }
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

fn main() {
    let cli = Cli::parse();

    let quiet_logs = matches!(&cli.command, Commands::Generate(args) if args.progress);
    init_logging(if quiet_logs { "warn" } else { "info" });

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Generate(args) => handle_generate(config, args),
        Commands::Inspect { source } => handle_inspect(config, source),
        Commands::Interactive => run_interactive_mode(config),
    });

    if let Err(e) = result {
        eprintln!("{}", "❌ Run aborted!".red().bold());
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn handle_generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    let report_path = args.report.clone();
    let progress = args.progress;
    args.apply(&mut config);

    println!("{}", "Certificate Generator".bold().blue());
    println!("{}", "=".repeat(50).blue());
    println!();

    let converter = LibreOfficeConverter::new(config.converter.clone());
    let mut observer = ProgressObserver::new(!progress);

    match batch::run_with_observer(&config, &converter, &mut observer)? {
        BatchOutcome::NoMatchingRecords => {
            println!("{}", "⚠️ No matching entries found.".yellow());
        }
        BatchOutcome::Completed(summary) => {
            if summary.converted() == summary.total() {
                println!("{}", "✅ All certificates generated!".green().bold());
            } else {
                println!("{}", "⚠️  Batch finished with failures".yellow().bold());
            }
            print_summary(&summary);

            if let Some(path) = report_path {
                let content = generate_report(&summary, ReportFormat::for_path(&path))?;
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
                println!("  - Report: {}", path.display());
            }
        }
    }

    Ok(())
}

fn handle_inspect(mut config: Config, args: SourceArgs) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;

    println!("{}", "Inspecting inputs...".bold());
    println!();

    let records = source::load_filtered(&config.input, &config.source_options(), &config.filters)?;
    println!("{}", "📊 Records".bold().blue());
    println!("  Input: {}", config.input.display());
    println!("  Matching records: {}", records.len());
    for record in records.iter().take(10) {
        println!(
            "  - Row {}: {} | {} | {} | {}",
            record.row, record.customer, record.code, record.street, record.city
        );
    }
    if records.len() > 10 {
        println!("  ... and {} more", records.len() - 10);
    }
    println!();

    let template = packager::load_template(&config.template)?;
    let check = validator::check_tokens(&template, &config.tokens)?;
    println!("{}", "📄 Template".bold().blue());
    println!("  Template: {}", config.template.display());
    for token in &check.found {
        println!("  {} {}", "✓".green(), token);
    }
    for token in &check.missing {
        println!("  {} {} {}", "✗".red(), token, "(not found in a single run or cell)".dimmed());
    }
    if check.is_complete() {
        println!();
        println!("{}", "✅ All tokens will be substituted".green());
    }

    Ok(())
}
