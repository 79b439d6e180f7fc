//! engrain CLI
//!
//! Embeds machine-readable documentation indexes into agent instruction
//! files and keeps them up to date.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.target, &cli.docs_root),
        None => {
            println!("{} docs index embedder", "engrain".green().bold());
            println!();
            println!("Run {} for available commands.", "engrain --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, target: &str, docs_root: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Add {
            source,
            name,
            reference,
            force,
        } => commands::run_add(
            &cwd,
            target,
            docs_root,
            &source,
            name.as_deref(),
            reference.as_deref(),
            force,
        ),
        Commands::Remove { name } => commands::run_remove(&cwd, target, docs_root, &name),
        Commands::Update { name } => commands::run_update(&cwd, target, docs_root, name.as_deref()),
        Commands::List => commands::run_list(&cwd, target, docs_root),
        Commands::Check => commands::run_check(&cwd, target, docs_root),
    }
}
