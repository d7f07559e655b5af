//! Line record and document data structures.
//!
//! This module defines the in-memory representation of a loaded log file:
//! individual line records with their parsed timestamps and derived display
//! state, plus the document that owns them.

use chrono::NaiveDateTime;

use super::relative;

/// One line of the loaded file plus its derived display state.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord {
    /// Raw line content, exactly as it appeared between newlines.
    pub text: String,
    /// Reconstructed timestamp, present only when the line matched the
    /// timestamp prefix pattern.
    pub timestamp: Option<NaiveDateTime>,
    /// Whether the line passes the current search filter.
    pub visible: bool,
    /// Signed millisecond offset from the selected reference line.
    pub delta_ms: Option<i64>,
}

impl LineRecord {
    /// Create a record for a line without a timestamp.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
            visible: true,
            delta_ms: None,
        }
    }

    /// Create a record for a line with a parsed timestamp.
    pub fn timestamped(text: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::plain(text)
        }
    }

    /// Whether this line can serve as a delta reference.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// The full in-memory state for one loaded file.
///
/// A document is created fresh on each successful load and replaces the
/// prior one wholesale. Records keep their file order for the lifetime of
/// the document; filtered-out records are hidden, never removed.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// Display name of the loaded file, used for the window title.
    pub name: String,
    /// All lines in file order.
    pub records: Vec<LineRecord>,
    /// Index of the reference line selected for delta display.
    pub reference: Option<usize>,
}

impl Document {
    /// Create a document for freshly parsed records.
    ///
    /// A new document starts with no reference selection and no deltas;
    /// loading a file therefore implicitly clears both.
    pub fn new(name: impl Into<String>, records: Vec<LineRecord>) -> Self {
        Self {
            name: name.into(),
            records,
            reference: None,
        }
    }

    /// Total number of lines, including hidden ones.
    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    /// Number of lines that carry a timestamp.
    pub fn timestamped_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_timestamp()).count()
    }

    /// Select the record at `index` as the delta reference and recompute
    /// deltas for the whole record list.
    ///
    /// Selecting a line without a timestamp (or an out-of-range index) is a
    /// no-op and returns false. Recomputation always covers the full
    /// unfiltered list; filter visibility does not gate it.
    pub fn select_reference(&mut self, index: usize) -> bool {
        let Some(reference) = self.records.get(index).and_then(|r| r.timestamp) else {
            return false;
        };
        self.reference = Some(index);
        relative::compute_deltas(&mut self.records, reference);
        true
    }
}
