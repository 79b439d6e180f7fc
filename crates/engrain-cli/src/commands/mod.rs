//! Command implementations

use std::path::Path;

use colored::Colorize;

use engrain_core::Engine;
use engrain_fs::NormalizedPath;

use crate::error::Result;

/// Build the engine for a project root and the global CLI flags.
fn engine_for(root: &Path, target: &str, docs_root: &str) -> Engine {
    let root = NormalizedPath::new(root);
    let cache_dir = dirs::cache_dir()
        .map(|d| NormalizedPath::new(d).join("engrain"))
        .unwrap_or_else(|| root.join(".engrain").join("cache"));
    Engine::new(root, target, docs_root, cache_dir)
}

/// Run the add command
pub fn run_add(
    root: &Path,
    target: &str,
    docs_root: &str,
    source: &str,
    name: Option<&str>,
    reference: Option<&str>,
    force: bool,
) -> Result<()> {
    println!("{} Embedding {}...", "=>".blue().bold(), source.cyan());

    let engine = engine_for(root, target, docs_root);
    let outcome = engine.add(source, name, reference, force)?;
    report_outcome(&outcome, target);
    Ok(())
}

/// Run the remove command
pub fn run_remove(root: &Path, target: &str, docs_root: &str, name: &str) -> Result<()> {
    let engine = engine_for(root, target, docs_root);
    if engine.remove(name)? {
        println!("{} Removed {}.", "OK".green().bold(), name.cyan());
    } else {
        println!(
            "{} Nothing to remove: no document named {}.",
            "--".dimmed(),
            name.cyan()
        );
    }
    Ok(())
}

/// Run the update command
pub fn run_update(root: &Path, target: &str, docs_root: &str, name: Option<&str>) -> Result<()> {
    let engine = engine_for(root, target, docs_root);
    let outcomes = engine.update(name)?;
    if outcomes.is_empty() {
        println!("{} No documents recorded yet.", "--".dimmed());
        return Ok(());
    }
    for outcome in &outcomes {
        report_outcome(outcome, target);
    }
    Ok(())
}

/// Run the list command
pub fn run_list(root: &Path, target: &str, docs_root: &str) -> Result<()> {
    let engine = engine_for(root, target, docs_root);
    let documents = engine.list()?;
    if documents.is_empty() {
        println!("{} No documents recorded yet.", "--".dimmed());
        return Ok(());
    }
    for (name, record) in documents {
        let origin = match &record.commit {
            Some(commit) => format!("{} @ {}", record.source, &commit[..commit.len().min(12)]),
            None => record.source.clone(),
        };
        println!("  {} {} ({})", "-".dimmed(), name.cyan().bold(), origin);
    }
    Ok(())
}

/// Run the check command
pub fn run_check(root: &Path, target: &str, docs_root: &str) -> Result<()> {
    println!("{} Checking embedded documents...", "=>".blue().bold());

    let engine = engine_for(root, target, docs_root);
    let reports = engine.check()?;
    if reports.is_empty() {
        println!("{} No documents recorded yet.", "--".dimmed());
        return Ok(());
    }

    let mut healthy = true;
    for report in &reports {
        if report.block_missing {
            healthy = false;
            println!(
                "{} {}: block missing from {}",
                "MISSING".red().bold(),
                report.name.cyan(),
                target
            );
        } else if report.drifted {
            healthy = false;
            println!(
                "{} {}: docs tree no longer matches the embedded index",
                "DRIFTED".yellow().bold(),
                report.name.cyan()
            );
        }
        for warning in &report.warnings {
            println!("   {} {}", "!".yellow(), warning);
        }
    }

    if healthy {
        println!("{} All embedded documents are up to date.", "OK".green().bold());
    } else {
        println!();
        println!("Run {} to repair.", "engrain update".cyan());
    }
    Ok(())
}

fn report_outcome(outcome: &engrain_core::AddOutcome, target: &str) {
    let verb = if outcome.replaced { "Updated" } else { "Added" };
    let commit = outcome
        .commit
        .as_deref()
        .map(|c| format!(" @ {}", &c[..c.len().min(12)]))
        .unwrap_or_default();
    println!(
        "{} {} {} in {} ({} files{})",
        "OK".green().bold(),
        verb,
        outcome.name.cyan().bold(),
        target,
        outcome.file_count,
        commit
    );
    if !outcome.changed && outcome.replaced {
        println!("   {} index unchanged since last run", "-".dimmed());
    }
    for warning in &outcome.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }
}
