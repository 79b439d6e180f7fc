//! Command-line argument definitions

use clap::{Parser, Subcommand};

/// Embed machine-readable docs indexes into agent instruction files.
#[derive(Debug, Parser)]
#[command(name = "engrain", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Target document the indexes are injected into
    #[arg(long, global = true, default_value = "AGENTS.md")]
    pub target: String,

    /// Directory docs trees are copied into (also the index root label)
    #[arg(long, global = true, default_value = ".engrain/docs")]
    pub docs_root: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a documentation source and embed its index
    Add {
        /// Git URL or local directory to take the docs tree from
        source: String,

        /// Document name (derived from the source when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Git ref (branch, tag, or commit) to fetch
        #[arg(long = "ref")]
        reference: Option<String>,

        /// Replace an existing block of the same name
        #[arg(short, long)]
        force: bool,
    },

    /// Remove an embedded document and its copied docs tree
    Remove {
        /// Document name
        name: String,
    },

    /// Re-fetch and re-embed one document, or all of them
    Update {
        /// Document name (all documents when omitted)
        name: Option<String>,
    },

    /// List embedded documents
    List,

    /// Validate recorded documents against their docs trees
    Check,
}
