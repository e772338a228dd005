//! Structured run events.
//!
//! The organizing core reports everything it does through an injectable
//! [`EventSink`] instead of a process-wide logger, so callers choose the
//! rendering (console lines, JSON lines) and tests capture events without
//! parsing text.

use serde::Serialize;

/// One observable step of an organization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A missing category folder was created under the root.
    FolderCreated { category: String },
    /// A file was moved into its category folder.
    FileMoved { name: String, category: String },
    /// Simulate mode: the file would be moved into this category.
    WouldMove { name: String, category: String },
    /// Moving a file failed; the run continues with the next file.
    MoveFailed { name: String, cause: String },
    /// Final counters for the run.
    RunSummary { moved: usize, skipped: usize },
}

/// Receiver for run events.
///
/// `emit` takes `&self` so sinks stay shareable; implementations that
/// accumulate events use interior mutability.
pub trait EventSink {
    fn emit(&self, event: Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_tag() {
        let json = serde_json::to_value(Event::FileMoved {
            name: "report.pdf".to_string(),
            category: "Documents".to_string(),
        })
        .unwrap();
        assert_eq!(json["event"], "file_moved");
        assert_eq!(json["name"], "report.pdf");
        assert_eq!(json["category"], "Documents");

        let json = serde_json::to_value(Event::RunSummary {
            moved: 5,
            skipped: 0,
        })
        .unwrap();
        assert_eq!(json["event"], "run_summary");
        assert_eq!(json["moved"], 5);
    }
}
