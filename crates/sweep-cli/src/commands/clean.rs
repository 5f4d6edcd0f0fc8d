//! `sweep clean` command - delete merged and gone branches.

use anyhow::{Context, Result};
use inquire::Confirm;
use sweep_core::{Config, DeletionPlan, ProtectionList, apply_deletions, classify, plan_deletions};

use super::utils::{open_repo, refresh_remotes, resolve_target};
use crate::output;

/// Run the clean command.
pub fn run(
    protect: &[String],
    force: bool,
    yes: bool,
    dry_run: bool,
    no_fetch: bool,
    target: Option<&str>,
) -> Result<()> {
    let repo = open_repo()?;

    let mut config = Config::load_default().context("Failed to load config")?;
    config.apply_env();

    // Flags extend the configured patterns rather than replacing them.
    let mut patterns = config.protected.clone();
    patterns.extend(protect.iter().cloned());
    let protection = ProtectionList::new(&patterns)?;

    let dry_run = dry_run || config.dry_run;
    let interactive = !yes && config.interactive;

    // A dry run must not touch the repository, remote-tracking refs included.
    let prune = refresh_remotes(&repo, no_fetch || dry_run)?;

    let target = resolve_target(&repo, target)?;
    let snapshot = classify(&repo, &target, prune.as_ref())?;
    let plan = plan_deletions(&snapshot, &protection, force);

    if plan.is_empty() {
        output::success("No branches to delete");
        return Ok(());
    }

    if dry_run {
        output::info("Dry run - the following branches would be deleted:");
        print_plan(&plan);
        return Ok(());
    }

    output::info("The following branches will be deleted:");
    print_plan(&plan);

    if interactive && !confirm(plan.len()) {
        output::info("Operation cancelled");
        return Ok(());
    }

    let report = apply_deletions(&repo, &plan, false)?;
    for name in &report.deleted {
        output::success(&format!("Deleted {name}"));
    }
    for failure in &report.failed {
        output::warn(&format!(
            "Failed to delete {}: {}",
            failure.branch, failure.reason
        ));
    }

    Ok(())
}

fn print_plan(plan: &DeletionPlan) {
    for cb in &plan.branches {
        output::detail(&format!(
            "  {} ({})",
            cb.branch.full_name(),
            output::status_label(cb.status)
        ));
    }
}

/// Any non-affirmative answer (or an aborted prompt) cancels.
fn confirm(count: usize) -> bool {
    Confirm::new(&format!("Delete {count} branch(es)?"))
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}
