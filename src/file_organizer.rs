/// Directory organization core.
///
/// This module walks one directory's immediate children, classifies each
/// regular file by extension, and moves it into the matching category
/// subfolder, resolving destination name collisions with a numeric suffix.
/// Progress is reported through the injected event sink; per-file failures
/// are counted and never abort the run.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::CompiledExcludes;
use crate::events::{Event, EventSink};
use crate::file_category::{CategoryTable, Classifier, file_extension};

/// Errors that abort an organization run.
///
/// Per-file move failures are not represented here; they surface as
/// [`MoveAction::Failed`] decisions and `MoveFailed` events while the run
/// continues.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root directory does not exist (or is not a directory).
    RootNotFound { path: PathBuf },
    /// A category folder could not be created under the root.
    FolderCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The root directory could not be enumerated.
    DirectoryReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Folder not found: {}", path.display())
            }
            Self::FolderCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create folder {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Failed to read folder {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What happened (or would happen) to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveAction {
    /// The file was moved to its destination.
    Moved,
    /// Simulate mode: the file would be moved, nothing was touched.
    WouldMove,
    /// The file already sits in its category folder; left untouched.
    AlreadyPlaced,
    /// The move failed with the given cause; the file stays put.
    Failed(String),
}

/// Per-file outcome of one organization pass.
#[derive(Debug, Clone)]
pub struct MoveDecision {
    pub source: PathBuf,
    pub category: String,
    /// Collision-free destination the file was (or would be) moved to.
    pub destination: PathBuf,
    pub action: MoveAction,
}

/// Counters for one organization run.
///
/// `moved` counts successful moves; `skipped` counts per-file move
/// failures. Files left alone on purpose (directories, hidden names,
/// excluded names, already-placed files) appear in neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub moved: usize,
    pub skipped: usize,
}

/// Files currently inside one category folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub files: Vec<String>,
}

/// Snapshot of all category folders, with a running file total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryListing {
    pub groups: Vec<CategoryGroup>,
    pub total: usize,
}

/// Organizes one directory's files into category subfolders.
///
/// Holds the root path, the category policy, and the event sink for the
/// duration of a run. All methods take `&self`; nothing is cached between
/// calls, so re-running on a changed directory is safe.
pub struct FileOrganizer<'a> {
    root: PathBuf,
    table: CategoryTable,
    classifier: Classifier,
    excludes: CompiledExcludes,
    sink: &'a dyn EventSink,
}

impl<'a> FileOrganizer<'a> {
    /// Creates an organizer for `root` using the given category table.
    pub fn new(root: PathBuf, table: CategoryTable, sink: &'a dyn EventSink) -> Self {
        let classifier = Classifier::new(&table);
        Self {
            root,
            table,
            classifier,
            excludes: CompiledExcludes::default(),
            sink,
        }
    }

    /// Attaches exclusion rules; matching files are silently left in place.
    pub fn with_excludes(mut self, excludes: CompiledExcludes) -> Self {
        self.excludes = excludes;
        self
    }

    /// Ensures every category folder exists directly under the root.
    ///
    /// Creating a folder that already exists is a no-op. Emits
    /// `FolderCreated` only for folders actually created. Creation failure
    /// is fatal for the run.
    pub fn ensure_category_folders(&self) -> OrganizeResult<()> {
        for name in self.table.names() {
            let path = self.root.join(name);
            if !path.exists() {
                fs::create_dir(&path).map_err(|e| OrganizeError::FolderCreationFailed {
                    path: path.clone(),
                    source: e,
                })?;
                self.sink.emit(Event::FolderCreated {
                    category: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Organizes the root directory's immediate children.
    ///
    /// With `simulate` set, nothing is moved and the would-be moves are
    /// reported instead; the moved/skipped counters stay at zero. The final
    /// summary is both emitted as an event and returned, so callers can
    /// assert on counts without parsing output.
    pub fn organize(&self, simulate: bool) -> OrganizeResult<OrganizeSummary> {
        if !self.root.is_dir() {
            return Err(OrganizeError::RootNotFound {
                path: self.root.clone(),
            });
        }

        self.ensure_category_folders()?;

        let entries = fs::read_dir(&self.root).map_err(|e| OrganizeError::DirectoryReadFailed {
            path: self.root.clone(),
            source: e,
        })?;

        let mut summary = OrganizeSummary::default();

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();

            // Directories, hidden names, and excluded names are left alone
            // and never counted.
            if name.starts_with('.') || self.excludes.is_excluded(&name) {
                continue;
            }
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                continue;
            }

            let decision = self.process_entry(&entry.path(), &name, simulate);
            match decision.action {
                MoveAction::Moved => {
                    summary.moved += 1;
                    self.sink.emit(Event::FileMoved {
                        name,
                        category: decision.category,
                    });
                }
                MoveAction::WouldMove => {
                    self.sink.emit(Event::WouldMove {
                        name,
                        category: decision.category,
                    });
                }
                MoveAction::AlreadyPlaced => {}
                MoveAction::Failed(cause) => {
                    summary.skipped += 1;
                    self.sink.emit(Event::MoveFailed { name, cause });
                }
            }
        }

        self.sink.emit(Event::RunSummary {
            moved: summary.moved,
            skipped: summary.skipped,
        });

        Ok(summary)
    }

    /// Classifies one child and moves it (or reports the would-be move).
    fn process_entry(&self, source: &Path, name: &str, simulate: bool) -> MoveDecision {
        let extension = file_extension(name);
        let category = self.classifier.classify(&extension).to_string();

        // A file whose parent folder already carries the category name is
        // correctly placed; re-runs leave it untouched.
        let parent_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if parent_name == category {
            return MoveDecision {
                source: source.to_path_buf(),
                destination: source.to_path_buf(),
                category,
                action: MoveAction::AlreadyPlaced,
            };
        }

        let destination = resolve_collision(&self.root.join(&category).join(name));

        let action = if simulate {
            MoveAction::WouldMove
        } else {
            match move_file(source, &destination) {
                Ok(()) => MoveAction::Moved,
                Err(e) => MoveAction::Failed(e.to_string()),
            }
        };

        MoveDecision {
            source: source.to_path_buf(),
            destination,
            category,
            action,
        }
    }

    /// Lists regular files per category folder, with a running total.
    ///
    /// Read-only companion to [`organize`](Self::organize): reports what
    /// currently sits in each category folder, in table order, skipping
    /// categories whose folder is missing or empty.
    pub fn list_by_category(&self) -> OrganizeResult<CategoryListing> {
        if !self.root.is_dir() {
            return Err(OrganizeError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let mut listing = CategoryListing::default();

        for name in self.table.names() {
            let dir = self.root.join(name);
            if !dir.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&dir).map_err(|e| OrganizeError::DirectoryReadFailed {
                path: dir.clone(),
                source: e,
            })?;

            let mut files: Vec<String> = entries
                .flatten()
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            files.sort();

            if !files.is_empty() {
                listing.total += files.len();
                listing.groups.push(CategoryGroup {
                    category: name.to_string(),
                    files,
                });
            }
        }

        Ok(listing)
    }
}

/// Finds an unused destination path, suffixing `_1`, `_2`, ... between the
/// name stem and its extension until nothing sits at the candidate path.
fn resolve_collision(destination: &Path) -> PathBuf {
    if !destination.exists() {
        return destination.to_path_buf();
    }

    let parent = destination.parent().unwrap_or_else(|| Path::new(""));
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = destination
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1u64;
    loop {
        let candidate = parent.join(format!("{stem}_{counter}{suffix}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves a file, falling back to copy+delete across filesystem boundaries.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }
        Err(e) => Err(e),
    }
}
