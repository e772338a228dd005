//! Command-line interface for downsort.
//!
//! Thin orchestration layer: parses arguments, resolves the root directory
//! and configuration, picks an event sink, and drives the organizer.

use clap::Parser;
use std::path::PathBuf;

use crate::config::OrganizerConfig;
use crate::events::EventSink;
use crate::file_organizer::{FileOrganizer, OrganizeError};
use crate::output::{self, ConsoleSink, JsonSink};

/// Sort a downloads folder into category subfolders.
#[derive(Parser, Debug)]
#[command(name = "downsort", version, about)]
pub struct Args {
    /// Directory to organize (default: the user's downloads folder)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Show what would be moved without actually moving files
    #[arg(short, long)]
    pub dry_run: bool,

    /// List files by category after organization
    #[arg(short, long)]
    pub list: bool,

    /// Emit machine-readable JSON events instead of log lines
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs the CLI with parsed arguments.
///
/// A missing root directory is reported and the run ends without
/// organizing anything; other failures are returned to the caller.
pub fn run(args: Args) -> Result<(), String> {
    let root = match args.path {
        Some(path) => path,
        None => default_downloads_dir()
            .ok_or_else(|| "Could not determine the downloads folder; pass --path".to_string())?,
    };

    let config = OrganizerConfig::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let compiled = config
        .compile()
        .map_err(|e| format!("Error compiling configuration: {}", e))?;

    let sink: Box<dyn EventSink> = if args.json {
        Box::new(JsonSink)
    } else {
        Box::new(ConsoleSink)
    };

    if args.dry_run && !args.json {
        output::dry_run_notice();
    }

    let organizer = FileOrganizer::new(root, compiled.table, sink.as_ref())
        .with_excludes(compiled.excludes);

    match organizer.organize(args.dry_run) {
        Ok(_summary) => {}
        Err(e @ OrganizeError::RootNotFound { .. }) => {
            output::print_error(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.to_string()),
    }

    if args.list {
        let listing = organizer.list_by_category().map_err(|e| e.to_string())?;
        output::print_listing(&listing);
    }

    Ok(())
}

/// The platform downloads directory for the current user.
fn default_downloads_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_short_flags() {
        let args =
            Args::try_parse_from(["downsort", "-p", "/tmp/dl", "-d", "-l"]).expect("parse failed");
        assert_eq!(args.path, Some(PathBuf::from("/tmp/dl")));
        assert!(args.dry_run);
        assert!(args.list);
        assert!(!args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["downsort"]).expect("parse failed");
        assert!(args.path.is_none());
        assert!(!args.dry_run);
        assert!(!args.list);
    }

    #[test]
    fn test_run_organizes_directory() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("notes.txt"), "notes").unwrap();

        let args = Args::try_parse_from(["downsort", "-p", temp_dir.path().to_str().unwrap()])
            .expect("parse failed");
        run(args).expect("run failed");

        assert!(temp_dir.path().join("Documents/notes.txt").is_file());
    }

    #[test]
    fn test_run_missing_root_reports_and_returns_ok() {
        let args = Args::try_parse_from(["downsort", "-p", "/no/such/downloads"])
            .expect("parse failed");
        assert!(run(args).is_ok());
    }
}
