//! Sweep CLI - clean up git branches that are gone or merged.

use clap::Parser;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            json,
            no_fetch,
            target,
        } => commands::list::run(json, no_fetch, target.as_deref()),
        Commands::Clean {
            protect,
            force,
            yes,
            dry_run,
            no_fetch,
            target,
        } => commands::clean::run(&protect, force, yes, dry_run, no_fetch, target.as_deref()),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
