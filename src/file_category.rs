/// Extension-based file classification.
///
/// This module owns the category policy: an ordered table mapping category
/// names to the file extensions they claim, and a classifier that resolves
/// any extension to a category name.
///
/// # Examples
///
/// ```
/// use downsort::file_category::{CategoryTable, Classifier};
///
/// let classifier = Classifier::new(&CategoryTable::builtin());
/// assert_eq!(classifier.classify(".pdf"), "Documents");
/// assert_eq!(classifier.classify(".PNG"), "Images");
/// assert_eq!(classifier.classify(".xyz"), "Others");
/// ```
use std::collections::HashMap;

/// Catch-all category for extensions no table entry claims.
pub const FALLBACK_CATEGORY: &str = "Others";

/// One category and the extensions it claims, in registration order.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    /// Category name, doubling as the destination folder name.
    pub name: String,
    /// Claimed extensions, lowercase with leading dot.
    pub extensions: Vec<String>,
}

/// Ordered mapping from category names to extension sets.
///
/// The table is built once per run and never mutated afterwards. Order is
/// stable and determines folder-creation order and the tie-break when two
/// categories claim the same extension (first registered wins).
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<CategoryEntry>,
}

impl CategoryTable {
    /// Returns the built-in category policy.
    ///
    /// `.xls`/`.xlsx` and `.ppt`/`.pptx` are listed under two categories;
    /// the classifier resolves them to the first (Documents).
    pub fn builtin() -> Self {
        let raw: &[(&str, &[&str])] = &[
            (
                "Documents",
                &[
                    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt",
                    ".pptx",
                ],
            ),
            (
                "Images",
                &[
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".ico",
                ],
            ),
            ("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"]),
            ("Audio", &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a"]),
            (
                "Video",
                &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm"],
            ),
            (
                "Executables",
                &[".exe", ".msi", ".dmg", ".pkg", ".deb", ".rpm"],
            ),
            (
                "Code",
                &[
                    ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".php", ".rb", ".json",
                    ".xml",
                ],
            ),
            ("Spreadsheets", &[".csv", ".xls", ".xlsx", ".ods"]),
            ("Presentations", &[".ppt", ".pptx", ".odp"]),
            ("Fonts", &[".ttf", ".otf", ".woff", ".woff2"]),
            ("Torrents", &[".torrent"]),
            (FALLBACK_CATEGORY, &[]),
        ];

        let entries = raw
            .iter()
            .map(|(name, extensions)| CategoryEntry {
                name: (*name).to_string(),
                extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
            })
            .collect();

        Self { entries }
    }

    /// Builds a table from `(name, extensions)` pairs, preserving order.
    ///
    /// Extensions are normalized to lowercase with a leading dot. The
    /// fallback category is appended when the pairs omit it, so the
    /// fallback destination folder always exists.
    pub fn from_entries(pairs: Vec<(String, Vec<String>)>) -> Self {
        let mut entries: Vec<CategoryEntry> = pairs
            .into_iter()
            .map(|(name, extensions)| CategoryEntry {
                name,
                extensions: extensions
                    .iter()
                    .map(|ext| normalize_extension(ext))
                    .collect(),
            })
            .collect();

        if !entries.iter().any(|e| e.name == FALLBACK_CATEGORY) {
            entries.push(CategoryEntry {
                name: FALLBACK_CATEGORY.to_string(),
                extensions: Vec::new(),
            });
        }

        Self { entries }
    }

    /// Category entries in table order.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Category names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Normalizes an extension to the lookup form: lowercase, leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.is_empty() || lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Returns a file name's extension in lookup form, or an empty string.
///
/// The extension is the lowercase suffix including the leading dot, taken
/// from the last dot in the name. Names with no dot, and dotfile names like
/// `.env`, have no extension.
pub fn file_extension(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Resolves extensions to category names.
///
/// The reverse index is built once from a [`CategoryTable`] and is read-only
/// afterwards, so lookups are safe to share across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    index: HashMap<String, String>,
}

impl Classifier {
    /// Builds the extension index from a table.
    ///
    /// When two categories claim the same extension, the first in table
    /// order keeps it.
    pub fn new(table: &CategoryTable) -> Self {
        let mut index = HashMap::new();
        for entry in table.entries() {
            for ext in &entry.extensions {
                index
                    .entry(ext.clone())
                    .or_insert_with(|| entry.name.clone());
            }
        }
        Self { index }
    }

    /// Returns the category name for an extension.
    ///
    /// Total over all inputs: case-insensitive lookup with
    /// [`FALLBACK_CATEGORY`] for anything the table does not claim,
    /// including the empty extension.
    pub fn classify(&self, extension: &str) -> &str {
        self.index
            .get(&extension.to_lowercase())
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }
}
