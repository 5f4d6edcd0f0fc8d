//! CLI command definitions and implementations.

pub mod clean;
pub mod completions;
pub mod list;
mod utils;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Clean up git branches that are gone or merged.
#[derive(Parser)]
#[command(name = "sweep", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List local and remote branches with their merge status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip the fetch/prune against remotes
        #[arg(long)]
        no_fetch: bool,

        /// Integration branch to classify against (defaults to main/master)
        #[arg(long)]
        target: Option<String>,
    },

    /// Delete branches that are merged or whose upstream is gone
    Clean {
        /// Additional protected branch patterns (comma-separated globs)
        #[arg(short, long, value_delimiter = ',')]
        protect: Vec<String>,

        /// Also delete unmerged branches
        #[arg(short, long)]
        force: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would be deleted without deleting anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip the fetch/prune against remotes
        #[arg(long)]
        no_fetch: bool,

        /// Integration branch to classify against (defaults to main/master)
        #[arg(long)]
        target: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
