//! Regular-expression search filter.
//!
//! This module owns the current search pattern, its compiled form, and a
//! validity flag. An empty pattern matches everything; an invalid pattern
//! is reported to the view and leaves the previous visibility
//! classification untouched.

use regex::Regex;

use super::document::LineRecord;

/// Live search filter over the loaded lines.
#[derive(Debug)]
pub struct SearchFilter {
    /// Pattern text as typed into the search box.
    pattern: String,
    /// Compiled form of the last valid non-empty pattern.
    compiled: Option<Regex>,
    /// Whether the current pattern text compiles (empty counts as valid).
    valid: bool,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            compiled: None,
            valid: true,
        }
    }
}

impl SearchFilter {
    /// Create a filter with an empty match-all pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern text currently held by the filter.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the current pattern text compiles. The view renders an
    /// "invalid" flag on the search control while this is false.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replace the pattern text and recompile it.
    ///
    /// Returns the new validity. On a compile failure the previously
    /// compiled pattern is kept, so visibility stays wherever the last
    /// valid pattern left it until the text compiles again.
    pub fn set_pattern(&mut self, pattern: &str) -> bool {
        self.pattern = pattern.to_owned();
        if pattern.is_empty() {
            self.compiled = None;
            self.valid = true;
        } else {
            match Regex::new(pattern) {
                Ok(regex) => {
                    self.compiled = Some(regex);
                    self.valid = true;
                }
                Err(_) => self.valid = false,
            }
        }
        self.valid
    }

    /// Classify a single line: visible iff the pattern matches anywhere in
    /// the text. Case-sensitive, unanchored, no flags.
    pub fn matches(&self, text: &str) -> bool {
        match &self.compiled {
            Some(regex) => regex.is_match(text),
            None => true,
        }
    }

    /// Reclassify visibility of every record against the current pattern.
    ///
    /// A no-op while the pattern is invalid: the stale classification from
    /// the last valid pattern persists, and no partial filter is applied.
    pub fn apply(&self, records: &mut [LineRecord]) {
        if !self.valid {
            return;
        }
        for record in records {
            record.visible = self.matches(&record.text);
        }
    }
}
