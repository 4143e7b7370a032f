// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal output helpers.

use std::io::IsTerminal;

use colored::{ColoredString, Colorize};
use smartfarm_core::AlertStatus;

/// Colors only when requested and stdout is a terminal.
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled && std::io::stdout().is_terminal());
}

pub fn heading(text: &str) {
    println!();
    println!("  {}", text.bold());
    println!("  {}", "-".repeat(50));
}

pub fn success(text: &str) {
    println!("  {} {text}", "✓".green());
}

pub fn warning(text: &str) {
    println!("  {} {}", "!".yellow(), text.yellow());
}

pub fn failure(text: &str) {
    eprintln!("  {} {}", "✗".red(), text.red());
}

pub fn status(status: AlertStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        AlertStatus::Ok => label.green(),
        AlertStatus::Warning => label.yellow(),
        AlertStatus::Critical => label.red().bold(),
    }
}

/// Print the saved and failed counts of an ingestion action.
pub fn counts(saved: usize, failed: usize) {
    let failed_text = failed.to_string();
    let failed_text = if failed > 0 {
        failed_text.red()
    } else {
        failed_text.normal()
    };
    println!("  saved: {}  failed: {failed_text}", saved.to_string().green());
}
