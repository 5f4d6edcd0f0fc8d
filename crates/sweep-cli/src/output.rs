//! Terminal output formatting utilities.

use colored::Colorize;
use sweep_core::BranchStatus;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Print a detail line without prefix.
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    println!("{msg}");
}

/// Print a horizontal line.
pub fn hr() {
    println!("{}", "─".repeat(50).dimmed());
}

/// Get the status indicator for a branch status.
#[must_use]
pub fn status_indicator(status: BranchStatus) -> String {
    match status {
        BranchStatus::Merged => "●".green().to_string(),
        BranchStatus::Gone => "●".yellow().to_string(),
        BranchStatus::Unmerged => "●".red().to_string(),
        BranchStatus::Skipped => "○".dimmed().to_string(),
    }
}

/// Get the colored status word for a branch status.
#[must_use]
pub fn status_label(status: BranchStatus) -> String {
    let text = status.to_string();
    match status {
        BranchStatus::Merged => text.green().to_string(),
        BranchStatus::Gone => text.yellow().to_string(),
        BranchStatus::Unmerged => text.red().to_string(),
        BranchStatus::Skipped => text.dimmed().to_string(),
    }
}

/// Get a colored branch name with current indicator.
#[must_use]
pub fn branch_label(name: &str, is_current: bool) -> String {
    if is_current {
        format!("{} {}", "▶".cyan(), name.cyan().bold())
    } else {
        format!("  {name}")
    }
}
