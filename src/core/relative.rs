//! Relative-time computation.
//!
//! Given a reference timestamp, recomputes the signed millisecond offset of
//! every timestamped record. The computation always runs over the full
//! record list; filter visibility never gates which records get a delta.

use chrono::NaiveDateTime;

use super::document::LineRecord;

/// Recompute `delta_ms` for every record relative to `reference`.
///
/// Records without a timestamp keep `delta_ms: None`; the record the
/// reference came from ends up with a delta of exactly 0. Calling this
/// again with the same reference yields identical results.
pub fn compute_deltas(records: &mut [LineRecord], reference: NaiveDateTime) {
    for record in records {
        record.delta_ms = record
            .timestamp
            .map(|ts| ts.signed_duration_since(reference).num_milliseconds());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser;

    const SAMPLE: &str =
        "01-01 00:00:00.000 1 2 start\nbad line\n01-01 00:00:01.500 1 2 end\n";

    #[test]
    fn test_reference_line_delta_is_zero() {
        let mut records = parser::parse(SAMPLE);
        let reference = records[2].timestamp.expect("timestamp expected");
        compute_deltas(&mut records, reference);

        assert_eq!(records[0].delta_ms, Some(-1500));
        assert_eq!(records[2].delta_ms, Some(0));
    }

    #[test]
    fn test_untimestamped_records_keep_no_delta() {
        let mut records = parser::parse(SAMPLE);
        let reference = records[0].timestamp.expect("timestamp expected");
        compute_deltas(&mut records, reference);

        assert_eq!(records[1].delta_ms, None);
        assert_eq!(records[3].delta_ms, None);
    }

    #[test]
    fn test_idempotent_for_same_reference() {
        let mut records = parser::parse(SAMPLE);
        let reference = records[0].timestamp.expect("timestamp expected");

        compute_deltas(&mut records, reference);
        let first: Vec<_> = records.iter().map(|r| r.delta_ms).collect();
        compute_deltas(&mut records, reference);
        let second: Vec<_> = records.iter().map(|r| r.delta_ms).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_antisymmetry_between_references() {
        let mut records = parser::parse(SAMPLE);
        let a = records[0].timestamp.expect("timestamp expected");
        let b = records[2].timestamp.expect("timestamp expected");

        compute_deltas(&mut records, b);
        let delta_a_ref_b = records[0].delta_ms.expect("delta expected");
        compute_deltas(&mut records, a);
        let delta_b_ref_a = records[2].delta_ms.expect("delta expected");

        assert_eq!(delta_a_ref_b, -delta_b_ref_a);
    }

    #[test]
    fn test_visibility_does_not_gate_recomputation() {
        let mut records = parser::parse(SAMPLE);
        records[0].visible = false;
        let reference = records[2].timestamp.expect("timestamp expected");
        compute_deltas(&mut records, reference);

        // Hidden rows still get their delta recomputed.
        assert_eq!(records[0].delta_ms, Some(-1500));
    }
}
