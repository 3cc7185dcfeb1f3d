use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use fillgap_sdk::{
    BatchReport, FileOutcome, FsDocumentStore, MergeChange, ReconcileOptions, Reconciler,
};

use crate::cli::*;
use crate::config::FillgapConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let batch = match cli.command {
        Command::Merge(args) => cmd_merge(args)?,
        Command::Run(args) => cmd_run(args)?,
    };
    print_batch(&batch, &cli.format, cli.verbose)?;
    if batch.has_failures() {
        bail!("{} of {} document(s) failed", batch.failed(), batch.len());
    }
    Ok(())
}

fn options(write: &WriteArgs, backup: bool) -> ReconcileOptions {
    ReconcileOptions {
        dry_run: write.dry_run,
        backup: backup && !write.no_backup,
    }
}

/// Split a file path into the directory a store is rooted at and the
/// document name inside it.
fn split_path(path: &Path) -> anyhow::Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} does not name a file", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name.to_string()))
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<BatchReport> {
    let (source_dir, source_name) = split_path(&args.source)?;
    let (target_dir, target_name) = split_path(&args.target)?;

    let reconciler = Reconciler::new(
        FsDocumentStore::new(source_dir),
        FsDocumentStore::new(target_dir),
        options(&args.write, true),
    );
    let outcome = reconciler
        .reconcile_as(&source_name, &target_name)
        .unwrap_or_else(|e| FileOutcome::Failed {
            name: target_name.clone(),
            error: e.to_string(),
        });
    Ok(BatchReport {
        outcomes: vec![outcome],
    })
}

fn cmd_run(args: RunArgs) -> anyhow::Result<BatchReport> {
    let config = FillgapConfig::discover(args.config.as_deref())?;
    let source_dir = args.source_dir.unwrap_or(config.source_dir);
    let target_dir = args.target_dir.unwrap_or(config.target_dir);

    let reconciler = Reconciler::new(
        FsDocumentStore::new(source_dir),
        FsDocumentStore::new(target_dir),
        options(&args.write, config.backup),
    );
    let source_root = reconciler.source().root();

    let files = if !args.files.is_empty() {
        args.files
    } else if !config.files.is_empty() {
        config.files
    } else {
        reconciler
            .discover()
            .with_context(|| format!("listing documents in {}", source_root.display()))?
    };

    tracing::debug!(
        count = files.len(),
        source = %source_root.display(),
        target = %reconciler.target().root().display(),
        dry_run = reconciler.options().dry_run,
        backup = reconciler.options().backup,
        "starting run"
    );
    Ok(reconciler.reconcile_all(&files))
}

fn print_batch(batch: &BatchReport, format: &OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(batch)?),
        OutputFormat::Text => {
            for outcome in &batch.outcomes {
                print_outcome(outcome, verbose);
            }
            if batch.len() > 1 {
                println!(
                    "\n{} merged, {} unchanged, {} skipped, {} failed",
                    batch.merged().to_string().green(),
                    batch.unchanged(),
                    batch.skipped().to_string().yellow(),
                    batch.failed().to_string().red(),
                );
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &FileOutcome, verbose: bool) {
    match outcome {
        FileOutcome::Merged { name, report, backup, saved } => {
            let (mark, note) = if *saved {
                ("✓".green().bold(), "")
            } else {
                ("~".yellow().bold(), " (dry run)")
            };
            println!(
                "{} {}: {} filled, {} appended{}",
                mark,
                name.bold(),
                report.filled(),
                report.appended(),
                note.dimmed(),
            );
            if let Some(backup) = backup {
                println!("  Backup: {}", backup.cyan());
            }
            if verbose {
                for change in &report.changes {
                    match change {
                        MergeChange::Filled { path, placeholder: None } => {
                            println!("  {} {}", "+".green(), path)
                        }
                        MergeChange::Filled { path, placeholder: Some(old) } => {
                            println!("  {} {} (was {})", "~".yellow(), path, old)
                        }
                        MergeChange::Appended { path, id } => {
                            println!("  {} {} (id {})", "+".green(), path, id)
                        }
                    }
                }
            }
        }
        FileOutcome::Unchanged { name } => println!("{} {}: up to date", "·".dimmed(), name),
        FileOutcome::Skipped { name, reason } => {
            println!("{} {}: skipped, {}", "-".yellow(), name, reason)
        }
        FileOutcome::Failed { name, error } => {
            println!("{} {}: {}", "✗".red().bold(), name.bold(), error.red())
        }
    }
}
