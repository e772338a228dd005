//! Category table and exclusion configuration.
//!
//! The built-in category policy can be replaced, and files can be shielded
//! from organization, via an optional TOML configuration file. The file is
//! only ever read; nothing is persisted between runs.
//!
//! # Configuration File Format
//!
//! ```toml
//! [[categories]]
//! name = "Documents"
//! extensions = [".pdf", ".txt"]
//!
//! [[categories]]
//! name = "Images"
//! extensions = ["jpg", "png"]
//!
//! [exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.part"]
//! regex = ["^~\\$"]
//! ```
//!
//! A `[[categories]]` list replaces the built-in table entirely, in the
//! order written; the fallback category is appended when omitted. Excluded
//! files are silently left in place, exactly like hidden files.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_category::CategoryTable;

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// The same category name appears twice in the table.
    DuplicateCategory(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern { pattern: String, reason: String },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::DuplicateCategory(name) => {
                write!(f, "Category '{}' is defined more than once", name)
            }
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerConfig {
    /// Replacement category table; empty means use the built-in one.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,

    /// Rules for leaving files in place.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// One configured category and the extensions it claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    /// Extensions in any case, with or without the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to leave in place (e.g., "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to leave in place (e.g., "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to leave in place (for advanced users).
    #[serde(default)]
    pub regex: Vec<String>,
}

impl OrganizerConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.downsortrc.toml` in the current directory
    /// 3. Look for `~/.config/downsort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".downsortrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("downsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile configuration into the category table and exclusion matchers.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate category names or invalid glob/regex
    /// patterns. Duplicate extensions are not an error; the classifier
    /// resolves them first-registered-wins.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.categories {
            if !seen.insert(rule.name.clone()) {
                return Err(ConfigError::DuplicateCategory(rule.name.clone()));
            }
        }

        let table = if self.categories.is_empty() {
            CategoryTable::builtin()
        } else {
            CategoryTable::from_entries(
                self.categories
                    .into_iter()
                    .map(|rule| (rule.name, rule.extensions))
                    .collect(),
            )
        };

        let excludes = CompiledExcludes::new(self.exclude)?;

        Ok(CompiledConfig { table, excludes })
    }
}

/// Ready-to-use configuration: the category table plus exclusion matchers.
pub struct CompiledConfig {
    pub table: CategoryTable,
    pub excludes: CompiledExcludes,
}

/// Pre-compiled exclusion matchers.
///
/// Patterns are validated and compiled once at load so that matching each
/// file name is just a lookup plus a pass over the compiled rules.
#[derive(Debug, Default)]
pub struct CompiledExcludes {
    filenames: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledExcludes {
    fn new(rules: ExcludeRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.into_iter().collect(),
            patterns,
            regexes,
        })
    }

    /// Whether a file name matches any exclusion rule.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.filenames.contains(name)
            || self.patterns.iter().any(|pattern| pattern.matches(name))
            || self.regexes.iter().any(|regex| regex.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_category::Classifier;

    #[test]
    fn test_default_config_uses_builtin_table() {
        let compiled = OrganizerConfig::default().compile().unwrap();
        let classifier = Classifier::new(&compiled.table);
        assert_eq!(classifier.classify(".pdf"), "Documents");
        assert!(!compiled.excludes.is_excluded("anything.txt"));
    }

    #[test]
    fn test_custom_category_table() {
        let config: OrganizerConfig = toml::from_str(
            r#"
[[categories]]
name = "Books"
extensions = [".epub", "MOBI"]

[[categories]]
name = "Pictures"
extensions = ["jpg"]
"#,
        )
        .expect("Failed to parse config");

        let compiled = config.compile().unwrap();
        let names: Vec<_> = compiled.table.names().collect();
        assert_eq!(names, vec!["Books", "Pictures", "Others"]);

        let classifier = Classifier::new(&compiled.table);
        assert_eq!(classifier.classify(".mobi"), "Books");
        assert_eq!(classifier.classify(".jpg"), "Pictures");
        assert_eq!(classifier.classify(".pdf"), "Others");
    }

    #[test]
    fn test_duplicate_category_name_is_rejected() {
        let config: OrganizerConfig = toml::from_str(
            r#"
[[categories]]
name = "Docs"
extensions = [".pdf"]

[[categories]]
name = "Docs"
extensions = [".txt"]
"#,
        )
        .expect("Failed to parse config");

        let result = config.compile();
        assert!(matches!(result, Err(ConfigError::DuplicateCategory(name)) if name == "Docs"));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let config: OrganizerConfig = toml::from_str(
            r#"
[exclude]
filenames = ["Thumbs.db"]
"#,
        )
        .unwrap();
        let compiled = config.compile().unwrap();

        assert!(compiled.excludes.is_excluded("Thumbs.db"));
        assert!(!compiled.excludes.is_excluded("photo.jpg"));
    }

    #[test]
    fn test_exclude_glob_pattern() {
        let config: OrganizerConfig = toml::from_str(
            r#"
[exclude]
patterns = ["*.part", "setup-?.exe"]
"#,
        )
        .unwrap();
        let compiled = config.compile().unwrap();

        assert!(compiled.excludes.is_excluded("movie.mkv.part"));
        assert!(compiled.excludes.is_excluded("setup-1.exe"));
        assert!(!compiled.excludes.is_excluded("setup-10.exe"));
        assert!(!compiled.excludes.is_excluded("movie.mkv"));
    }

    #[test]
    fn test_exclude_regex() {
        let config: OrganizerConfig = toml::from_str(
            r#"
[exclude]
regex = ["^~\\$"]
"#,
        )
        .unwrap();
        let compiled = config.compile().unwrap();

        assert!(compiled.excludes.is_excluded("~$draft.docx"));
        assert!(!compiled.excludes.is_excluded("draft.docx"));
    }

    #[test]
    fn test_invalid_glob_pattern_returns_error() {
        let config = OrganizerConfig {
            exclude: ExcludeRules {
                patterns: vec!["[invalid".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidGlobPattern(_))
        ));
    }

    #[test]
    fn test_invalid_regex_returns_error() {
        let config = OrganizerConfig {
            exclude: ExcludeRules {
                regex: vec!["[invalid(".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidRegexPattern { .. })
        ));
    }

    #[test]
    fn test_load_missing_explicit_file_is_an_error() {
        let result = OrganizerConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
