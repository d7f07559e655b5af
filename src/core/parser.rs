//! Plain-text log parser.
//!
//! This module turns raw file text into an ordered sequence of
//! [`LineRecord`]s. Each line is matched against a fixed prefix pattern
//! (`MM-DD HH:MM:SS.mmm`, a process id, and a thread id); matching lines get
//! a timestamp reconstructed by prefixing a fixed literal year onto the
//! captured substring.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::document::LineRecord;

/// Literal year prefixed onto the captured datetime substring. The log
/// format does not carry a year, so every timestamp lands in this one;
/// deltas across a Dec-to-Jan boundary are wrong (known limitation).
const YEAR_PREFIX: &str = "2021-";

/// Format of the reconstructed datetime.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Prefix shape of a timestamped line: datetime, process id, thread id,
/// then mandatory whitespace. Anchored at position 0; leading whitespace is
/// not skipped.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})\s+(\d+)\s+(\d+)\s")
        .expect("line pattern is a valid regex")
});

/// Parse raw file text into line records, in file order.
///
/// Splits strictly on `'\n'`: carriage returns are not trimmed and line
/// endings are not normalized, so a `\r` stays in the record text. Lines
/// that do not match the prefix pattern (continuation lines, blank lines)
/// produce records without a timestamp; that is normal, not an error.
///
/// The empty string yields exactly one record with empty text, since
/// splitting it on newline yields one empty segment.
pub fn parse(raw: &str) -> Vec<LineRecord> {
    raw.split('\n').map(parse_line).collect()
}

/// Parse a single line into a record.
fn parse_line(line: &str) -> LineRecord {
    match extract_timestamp(line) {
        Some(timestamp) => LineRecord::timestamped(line, timestamp),
        None => LineRecord::plain(line),
    }
}

/// Extract the reconstructed timestamp from a line, if its prefix matches.
///
/// A substring that matches the shape but fails calendar parsing (a month
/// of 13, a day of 32) degrades to `None` rather than raising.
fn extract_timestamp(line: &str) -> Option<NaiveDateTime> {
    let captures = LINE_PATTERN.captures(line)?;
    let datetime = format!("{YEAR_PREFIX}{}", &captures[1]);
    NaiveDateTime::parse_from_str(&datetime, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_preserves_line_count_and_text() {
        let records = parse("alpha\nbeta\n\ngamma");
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].text, "alpha");
        assert_eq!(records[1].text, "beta");
        assert_eq!(records[2].text, "");
        assert_eq!(records[3].text, "gamma");
    }

    #[test]
    fn test_parse_empty_input_yields_one_empty_record() {
        let records = parse("");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "");
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn test_trailing_newline_yields_trailing_empty_record() {
        let records = parse("one\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "");
    }

    #[test]
    fn test_carriage_return_stays_in_text() {
        let records = parse("01-01 00:00:00.000 1 2 msg\r\nnext");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "01-01 00:00:00.000 1 2 msg\r");
        assert!(records[0].timestamp.is_some());
    }

    #[test]
    fn test_matching_line_gets_timestamp() {
        let records = parse("06-15 12:34:56.789 1234 5678 I Tag: message");
        let timestamp = records[0].timestamp.expect("timestamp expected");
        assert_eq!(timestamp.date().year(), 2021);
        assert_eq!(timestamp.date().month(), 6);
        assert_eq!(timestamp.date().day(), 15);
    }

    #[test]
    fn test_offset_match_is_not_a_timestamp() {
        // The pattern must match from position 0.
        let records = parse("x01-01 00:00:00.000 1 2 msg");
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn test_leading_whitespace_is_not_skipped() {
        let records = parse(" 01-01 00:00:00.000 1 2 msg");
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn test_missing_ids_or_trailing_whitespace_rejects_line() {
        // No pid/tid columns.
        assert!(parse("01-01 00:00:00.000 message")[0].timestamp.is_none());
        // Ids present but nothing after them.
        assert!(parse("01-01 00:00:00.000 1 2")[0].timestamp.is_none());
    }

    #[test]
    fn test_malformed_calendar_date_degrades_to_no_timestamp() {
        // Shape matches, but there is no month 13 or day 32.
        assert!(parse("13-01 00:00:00.000 1 2 msg")[0].timestamp.is_none());
        assert!(parse("01-32 00:00:00.000 1 2 msg")[0].timestamp.is_none());
    }

    #[test]
    fn test_identical_substrings_yield_equal_timestamps() {
        let records = parse("03-04 05:06:07.008 1 2 a\n03-04 05:06:07.008 9 9 b");
        assert_eq!(records[0].timestamp, records[1].timestamp);
    }

    #[test]
    fn test_timestamp_ordering_is_chronological() {
        let records = parse("01-01 00:00:00.000 1 2 a\n01-01 00:00:00.001 1 2 b");
        assert!(records[0].timestamp < records[1].timestamp);
    }

    #[test]
    fn test_mixed_file_scenario() {
        let raw = "01-01 00:00:00.000 1 2 start\nbad line\n01-01 00:00:01.500 1 2 end\n";
        let records = parse(raw);
        assert_eq!(records.len(), 4);
        assert!(records[0].timestamp.is_some());
        assert!(records[1].timestamp.is_none());
        assert!(records[2].timestamp.is_some());
        assert!(records[3].timestamp.is_none());
    }
}
