//! Property-based tests for interval merging and slot generation.
//!
//! These verify invariants that should hold for *any* busy timeline, not just
//! the hand-picked cases in `merge_tests.rs` and `generator_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use meeting_resolver::interval::{merge_intervals, TimeInterval};
use meeting_resolver::preferences::{SchedulingPreferences, UrgencyTier, WorkingHours};
use meeting_resolver::{generate_candidates, ResolverConfig};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

fn minutes(m: i64) -> DateTime<Utc> {
    base() + Duration::minutes(m)
}

/// An interval starting within the first two days, 1 to 240 minutes long.
fn arb_interval() -> impl Strategy<Value = TimeInterval> {
    (0i64..2880, 1i64..=240).prop_map(|(start, len)| TimeInterval {
        start: minutes(start),
        end: minutes(start + len),
    })
}

fn arb_intervals() -> impl Strategy<Value = Vec<TimeInterval>> {
    prop::collection::vec(arb_interval(), 0..30)
}

fn covered(intervals: &[TimeInterval], instant: DateTime<Utc>) -> bool {
    intervals.iter().any(|i| i.contains(instant))
}

// ---------------------------------------------------------------------------
// Merger properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn merged_output_is_sorted_and_disjoint(intervals in arb_intervals()) {
        let merged = merge_intervals(&intervals);
        for pair in merged.windows(2) {
            // Strictly after: touching intervals would have been merged.
            prop_assert!(pair[0].end < pair[1].start, "{:?} then {:?}", pair[0], pair[1]);
        }
        for interval in &merged {
            prop_assert!(interval.start < interval.end);
        }
    }

    #[test]
    fn merged_output_covers_exactly_the_input_union(intervals in arb_intervals()) {
        let merged = merge_intervals(&intervals);
        // Every generated boundary is on the minute grid, so sampling each
        // minute decides union equality.
        for m in 0..(2880 + 240) {
            let instant = minutes(m);
            prop_assert_eq!(covered(&intervals, instant), covered(&merged, instant), "minute {}", m);
        }
    }

    #[test]
    fn merging_is_idempotent(intervals in arb_intervals()) {
        let once = merge_intervals(&intervals);
        let twice = merge_intervals(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_ignores_input_order(intervals in arb_intervals()) {
        let mut reversed = intervals.clone();
        reversed.reverse();
        prop_assert_eq!(merge_intervals(&intervals), merge_intervals(&reversed));
    }
}

// ---------------------------------------------------------------------------
// Generator properties
// ---------------------------------------------------------------------------

fn arb_duration() -> impl Strategy<Value = u32> {
    prop_oneof![Just(15u32), Just(30), Just(45), Just(60), Just(90)]
}

fn arb_buffer() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(5), Just(10), Just(15), Just(30)]
}

fn arb_working_hours() -> impl Strategy<Value = WorkingHours> {
    (6u32..=11, 14u32..=20).prop_map(|(start_hour, end_hour)| WorkingHours {
        start_hour,
        end_hour,
    })
}

proptest! {
    #[test]
    fn candidates_respect_window_hours_and_buffered_busy_time(
        intervals in arb_intervals(),
        duration in arb_duration(),
        buffer in arb_buffer(),
        hours in arb_working_hours(),
        now_offset in 0i64..1440,
    ) {
        let prefs = SchedulingPreferences {
            duration_minutes: duration,
            working_hours: hours,
            buffer_minutes: buffer,
            window_start: minutes(0),
            window_end: minutes(2880),
            timezone: "UTC".to_string(),
            urgency_tier: UrgencyTier::Medium,
        };
        let now = minutes(now_offset);
        let merged = merge_intervals(&intervals);
        let config = ResolverConfig::default();

        let candidates = generate_candidates(&merged, &prefs, now, &config).unwrap();
        prop_assert!(candidates.len() <= config.max_candidates);

        let buffer = Duration::minutes(i64::from(buffer));
        for slot in &candidates {
            prop_assert_eq!(slot.duration_minutes(), i64::from(duration));
            prop_assert!(slot.start >= prefs.window_start && slot.end <= prefs.window_end);
            prop_assert!(slot.start >= now);
            prop_assert_eq!(slot.start.minute() % 15, 0);

            let start_minute = slot.start.hour() * 60 + slot.start.minute();
            prop_assert!(start_minute >= hours.start_hour * 60);
            prop_assert!(start_minute + duration <= hours.end_hour * 60);

            for busy in &merged {
                let widened = TimeInterval {
                    start: busy.start - buffer,
                    end: busy.end + buffer,
                };
                prop_assert!(!slot.interval().overlaps(&widened), "{:?} hits {:?}", slot, widened);
            }
        }

        for pair in candidates.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
    }
}
