//! `sweep list` command - show every branch with its classification.

use anyhow::Result;
use chrono::DateTime;
use colored::Colorize;
use serde::Serialize;
use sweep_core::{BranchStatus, Snapshot, classify};
use sweep_git::Repository;

use super::utils::{open_repo, refresh_remotes, resolve_target};
use crate::output;

/// Run the list command.
pub fn run(json: bool, no_fetch: bool, target: Option<&str>) -> Result<()> {
    let repo = open_repo()?;
    let prune = refresh_remotes(&repo, no_fetch)?;
    let target = resolve_target(&repo, target)?;
    let snapshot = classify(&repo, &target, prune.as_ref())?;

    if json {
        print_json(&snapshot)?;
    } else {
        print_table(&repo, &snapshot);
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    target: &'a str,
    branches: Vec<JsonBranch>,
}

#[derive(Serialize)]
struct JsonBranch {
    name: String,
    status: BranchStatus,
    current: bool,
    remote: bool,
}

fn print_json(snapshot: &Snapshot) -> Result<()> {
    let branches = snapshot
        .branches
        .iter()
        .map(|cb| JsonBranch {
            name: cb.branch.full_name(),
            status: cb.status,
            current: cb.branch.is_current,
            remote: cb.branch.is_remote(),
        })
        .collect();

    let json_output = JsonOutput {
        target: &snapshot.target,
        branches,
    };
    println!("{}", serde_json::to_string_pretty(&json_output)?);
    Ok(())
}

fn print_table(repo: &Repository, snapshot: &Snapshot) {
    println!();
    output::info(&format!("Branches (target: {})", snapshot.target));
    output::hr();

    for cb in &snapshot.branches {
        let indicator = output::status_indicator(cb.status);
        let label = output::branch_label(&cb.branch.full_name(), cb.branch.is_current);
        let status = output::status_label(cb.status);
        let meta = last_commit_line(repo, cb.tip);

        println!("{indicator} {label:<40} {status:<10} {}", meta.dimmed());
    }
    println!();
}

/// Display-only last-commit column: date and author.
fn last_commit_line(repo: &Repository, tip: Option<sweep_git::Oid>) -> String {
    tip.and_then(|oid| repo.commit_summary(oid).ok())
        .map(|summary| {
            let date = DateTime::from_timestamp(summary.seconds, 0)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!("{date} {}", summary.author)
        })
        .unwrap_or_default()
}
