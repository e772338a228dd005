//! downsort - sort a downloads folder into category subfolders
//!
//! This library classifies files by extension against an ordered category
//! table, moves them into matching subfolders with collision-safe naming,
//! and reports everything through an injectable event sink. The category
//! table and exclusion rules can be overridden via a TOML configuration
//! file.

pub mod cli;
pub mod config;
pub mod events;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use config::{CompiledConfig, CompiledExcludes, ConfigError, OrganizerConfig};
pub use events::{Event, EventSink};
pub use file_category::{CategoryTable, Classifier, FALLBACK_CATEGORY};
pub use file_organizer::{
    CategoryListing, FileOrganizer, MoveAction, MoveDecision, OrganizeError, OrganizeResult,
    OrganizeSummary,
};

pub use cli::{Args, run};
