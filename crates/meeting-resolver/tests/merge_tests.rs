//! Tests for busy-interval merging.

use chrono::{DateTime, TimeZone, Utc};
use meeting_resolver::interval::{merge_busy_map, merge_intervals, TimeInterval};
use meeting_resolver::{BusyMap, Participant};

/// Helper to build a UTC instant on 2026-03-17 (a Tuesday).
fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 17, hour, minute, 0).unwrap()
}

fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeInterval {
    TimeInterval::new(at(start_hour, start_min), at(end_hour, end_min)).unwrap()
}

#[test]
fn empty_input_produces_empty_timeline() {
    assert!(merge_intervals(&[]).is_empty());
}

#[test]
fn unsorted_disjoint_intervals_are_sorted() {
    let merged = merge_intervals(&[busy(14, 0, 15, 0), busy(9, 0, 10, 0), busy(11, 0, 12, 0)]);
    assert_eq!(
        merged,
        vec![busy(9, 0, 10, 0), busy(11, 0, 12, 0), busy(14, 0, 15, 0)]
    );
}

#[test]
fn overlapping_intervals_merge() {
    let merged = merge_intervals(&[busy(9, 0, 11, 0), busy(10, 0, 12, 0)]);
    assert_eq!(merged, vec![busy(9, 0, 12, 0)]);
}

#[test]
fn touching_intervals_merge() {
    // Participant A busy 14:00-15:00, participant B busy 15:00-16:00.
    let merged = merge_intervals(&[busy(15, 0, 16, 0), busy(14, 0, 15, 0)]);
    assert_eq!(merged, vec![busy(14, 0, 16, 0)]);
}

#[test]
fn contained_interval_is_absorbed() {
    let merged = merge_intervals(&[busy(9, 0, 17, 0), busy(12, 0, 13, 0)]);
    assert_eq!(merged, vec![busy(9, 0, 17, 0)]);
}

#[test]
fn equal_starts_never_produce_duplicate_starts() {
    let merged = merge_intervals(&[busy(9, 0, 9, 30), busy(9, 0, 11, 0), busy(9, 0, 10, 0)]);
    assert_eq!(merged, vec![busy(9, 0, 11, 0)]);
}

#[test]
fn cascading_overlaps_collapse_to_one_block() {
    let merged = merge_intervals(&[
        busy(11, 0, 12, 0),
        busy(9, 0, 10, 30),
        busy(10, 0, 11, 30),
    ]);
    assert_eq!(merged, vec![busy(9, 0, 12, 0)]);
}

#[test]
fn merging_merged_output_is_idempotent() {
    let once = merge_intervals(&[
        busy(9, 0, 10, 0),
        busy(9, 30, 10, 30),
        busy(14, 0, 15, 0),
        busy(15, 0, 15, 30),
    ]);
    let twice = merge_intervals(&once);
    assert_eq!(once, twice);
    assert_eq!(once, vec![busy(9, 0, 10, 30), busy(14, 0, 15, 30)]);
}

#[test]
fn busy_map_merges_across_participants() {
    let mut map = BusyMap::new();
    map.insert(
        Participant::new("alice@example.com").unwrap(),
        vec![busy(14, 0, 15, 0)],
    );
    map.insert(
        Participant::new("bob@example.com").unwrap(),
        vec![busy(15, 0, 16, 0), busy(9, 0, 9, 30)],
    );
    map.insert(Participant::new("carol@example.com").unwrap(), vec![]);

    let merged = merge_busy_map(&map);
    assert_eq!(merged, vec![busy(9, 0, 9, 30), busy(14, 0, 16, 0)]);
}

#[test]
fn interval_constructor_rejects_inverted_and_empty_ranges() {
    assert!(TimeInterval::new(at(10, 0), at(9, 0)).is_err());
    assert!(TimeInterval::new(at(10, 0), at(10, 0)).is_err());
    let ok = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
    assert_eq!(ok.duration_minutes(), 60);
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    let a = busy(9, 0, 10, 0);
    let b = busy(10, 0, 11, 0);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
    assert!(a.overlaps(&busy(9, 59, 10, 30)));
    assert!(a.contains(at(9, 59)));
    assert!(!a.contains(at(10, 0)));
}

#[test]
fn intervals_deserialize_from_rfc3339() {
    let json = r#"{"start":"2026-03-17T14:00:00Z","end":"2026-03-17T15:00:00Z"}"#;
    let interval: TimeInterval = serde_json::from_str(json).unwrap();
    assert_eq!(interval, busy(14, 0, 15, 0));
    assert!(interval.validate().is_ok());

    let inverted = r#"{"start":"2026-03-17T15:00:00Z","end":"2026-03-17T14:00:00Z"}"#;
    let interval: TimeInterval = serde_json::from_str(inverted).unwrap();
    assert!(interval.validate().is_err());
}
