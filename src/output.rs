//! Output rendering.
//!
//! Two [`EventSink`] implementations plus the listing/error printers used
//! by the CLI layer: `ConsoleSink` renders timestamped, colored log lines
//! for humans; `JsonSink` prints one JSON object per event for scripts.

use chrono::Local;
use colored::*;

use crate::events::{Event, EventSink};
use crate::file_organizer::CategoryListing;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn info_line(message: &str) {
    println!("{} - {} - {}", timestamp().dimmed(), "INFO".green(), message);
}

fn error_line(message: &str) {
    eprintln!("{} - {} - {}", timestamp().dimmed(), "ERROR".red(), message);
}

/// Prints an error line to stderr in the standard log format.
pub fn print_error(message: &str) {
    error_line(message);
}

/// Prints the simulate-mode banner.
pub fn dry_run_notice() {
    println!("{}", "DRY RUN - No files will be moved".yellow().bold());
    println!("{}", "=".repeat(50));
}

/// Renders events as human-readable log lines.
///
/// Informational events go to stdout, move failures to stderr.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: Event) {
        match event {
            Event::FolderCreated { category } => {
                info_line(&format!("Created folder: {category}"));
            }
            Event::FileMoved { name, category } => {
                info_line(&format!("Moved: {name} -> {category}/"));
            }
            Event::WouldMove { name, category } => {
                println!(
                    "{} - {} - Would move: {} -> {}/",
                    timestamp().dimmed(),
                    "INFO".yellow(),
                    name,
                    category
                );
            }
            Event::MoveFailed { name, cause } => {
                error_line(&format!("Error moving {name}: {cause}"));
            }
            Event::RunSummary { moved, skipped } => {
                info_line(&format!(
                    "Organization complete. Moved: {moved}, Skipped: {skipped}"
                ));
            }
        }
    }
}

/// Renders events as JSON lines on stdout.
pub struct JsonSink;

impl EventSink for JsonSink {
    fn emit(&self, event: Event) {
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{}", json);
        }
    }
}

/// Prints the per-category file listing with a total count.
pub fn print_listing(listing: &CategoryListing) {
    println!("\n{}", "Files by category:".bold());
    println!("{}", "-".repeat(50));

    for group in &listing.groups {
        println!("\n{}:", group.category.cyan());
        for file in &group.files {
            println!("  {}", file);
        }
    }

    println!(
        "\nTotal files: {}",
        listing.total.to_string().green().bold()
    );
}
