//! Interactive CLI mode for the certificate generator

use super::progress::{print_summary, ProgressObserver};
use crate::batch;
use crate::config::Config;
use crate::converter::LibreOfficeConverter;
use crate::models::BatchOutcome;
use anyhow::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

/// Files in the current directory with one of `extensions`, sorted
fn find_nearby_files(extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = fs::read_dir(".") {
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            // Office lock files
            let is_lock = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("~$") || n.starts_with(".~lock"))
                .unwrap_or(false);
            if matches && !is_lock && path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// Prompt for a file, offering detected candidates first
fn prompt_for_file(prompt_text: &str, extensions: &[&str], fallback: &Path) -> Result<PathBuf> {
    let nearby = find_nearby_files(extensions);

    if nearby.is_empty() {
        let input_path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt_text)
            .with_initial_text(fallback.display().to_string())
            .interact_text()?;
        return Ok(PathBuf::from(input_path));
    }

    let mut options: Vec<String> = nearby
        .iter()
        .map(|p| format!("📁 {} (detected)", p.display()))
        .collect();
    options.push("✏️  Enter custom path".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt_text)
        .items(&options)
        .default(0)
        .interact()?;

    if selection < nearby.len() {
        Ok(nearby[selection].clone())
    } else {
        let input_path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter path")
            .with_initial_text(fallback.display().to_string())
            .interact_text()?;
        Ok(PathBuf::from(input_path))
    }
}

/// Optional text; an empty answer means unset
fn prompt_optional(prompt_text: &str) -> Result<Option<String>> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt_text)
        .allow_empty(true)
        .interact_text()?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Run the interactive CLI mode, starting from `base`
pub fn run_interactive_mode(base: Config) -> Result<()> {
    print_banner();

    let mut config = base;
    config.input = prompt_for_file(
        "📊 Select the recipient spreadsheet",
        &["xlsx", "xlsm", "xls", "ods", "csv"],
        &config.input,
    )?;
    config.template = prompt_for_file("📄 Select the DOCX template", &["docx"], &config.template)?;

    if Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("🔍 Only generate for some records?")
        .default(false)
        .interact()?
    {
        config.filters.street_contains = prompt_optional("Street contains (empty for any)")?;
        config.filters.customer = prompt_optional("Customer name equals (empty for any)")?;
        config.filters.code = prompt_optional("EAN equals (empty for any)")?;
    }

    println!();
    println!("  Input:    {}", config.input.display());
    println!("  Template: {}", config.template.display());
    println!("  PDFs:     {}", config.pdf_dir.display());
    println!("  Archive:  {}", config.archive.display());
    println!();

    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("🚀 Generate certificates?")
        .default(true)
        .interact()?;
    if !proceed {
        println!("{}", "Nothing generated.".dimmed());
        return Ok(());
    }

    let converter = LibreOfficeConverter::new(config.converter.clone());
    let mut observer = ProgressObserver::new(true);

    match batch::run_with_observer(&config, &converter, &mut observer)? {
        BatchOutcome::NoMatchingRecords => {
            println!("{}", "⚠️ No matching entries found.".yellow());
        }
        BatchOutcome::Completed(summary) => {
            println!("{}", "✅ Batch finished!".green().bold());
            print_summary(&summary);
        }
    }

    Ok(())
}

fn print_banner() {
    println!("{}", "╔═══════════════════════════════════════════════════════════════╗".blue());
    println!("{}", "║                                                               ║".blue());
    println!("{}", "║     📜 Certificate Generator                                  ║".blue().bold());
    println!("{}", "║                                                               ║".blue());
    println!("{}", "║     Merge spreadsheet rows into a DOCX template and           ║".blue());
    println!("{}", "║     convert every certificate to PDF                          ║".blue());
    println!("{}", "║                                                               ║".blue());
    println!("{}", "╚═══════════════════════════════════════════════════════════════╝".blue());
    println!();
}
