//! Candidate slot generation over the merged busy timeline.
//!
//! Walks the free gaps between merged busy intervals (plus the leading gap
//! before the first and the trailing gap after the last), shrinks each gap by
//! the buffer on every side that touches a busy interval, and emits
//! fixed-duration slots on a 15-minute grid that sit inside working hours.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;
use crate::preferences::SchedulingPreferences;
use crate::resolver::ResolverConfig;

/// A meeting slot of exactly the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CandidateSlot {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Generate candidate slots, earliest first.
///
/// `merged` must be the output of [`merge_intervals`](crate::interval::merge_intervals)
/// (sorted and disjoint). Slots never start before `now` or `window_start`,
/// never end after `window_end`, keep `buffer_minutes` clear of every busy
/// interval, and start and finish inside working hours in the preferences'
/// timezone. At most `config.max_candidates` slots are returned; later ones are
/// dropped.
///
/// An empty result is not an error here; the resolver turns it into
/// `ResolverError::NoAvailability`. A meeting longer than the working day
/// yields no slots without walking the window.
///
/// This is a public entry point in its own right, so it checks `config`
/// itself rather than relying on the resolver having done so.
///
/// # Errors
/// Returns `ResolverError::Validation` if `config` is invalid or the
/// preferences' timezone is unknown.
pub fn generate_candidates(
    merged: &[TimeInterval],
    prefs: &SchedulingPreferences,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<Vec<CandidateSlot>> {
    config.validate()?;
    let tz = prefs.tz()?;
    let step = Duration::minutes(i64::from(config.slot_step_minutes));
    let duration = Duration::minutes(i64::from(prefs.duration_minutes));

    let mut candidates = Vec::new();
    if u64::from(prefs.duration_minutes) > prefs.working_hours.length_minutes() {
        return Ok(candidates);
    }

    for (gap_start, gap_end) in free_gaps(merged, prefs, now) {
        let mut start = snap_up(gap_start, step);
        while let Some(end) = start.checked_add_signed(duration) {
            if end > gap_end {
                break;
            }
            if within_working_hours(start, prefs, &tz) {
                candidates.push(CandidateSlot { start, end });
                if candidates.len() == config.max_candidates {
                    return Ok(candidates);
                }
            }
            start += step;
        }
    }

    Ok(candidates)
}

/// Usable gaps as `(start, end)` pairs, with the buffer already subtracted.
///
/// The cursor only moves forward, so busy intervals that begin before the
/// window or before `now` simply push the first gap later.
fn free_gaps(
    merged: &[TimeInterval],
    prefs: &SchedulingPreferences,
    now: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let buffer = Duration::minutes(i64::from(prefs.buffer_minutes));
    let window_end = prefs.window_end;

    let mut gaps = Vec::new();
    let mut cursor = prefs.window_start.max(now);

    for busy in merged {
        if cursor >= window_end {
            break;
        }
        let gap_end = (busy.start - buffer).min(window_end);
        if cursor < gap_end {
            gaps.push((cursor, gap_end));
        }
        cursor = cursor.max(busy.end + buffer);
    }

    // Trailing gap after the last busy interval.
    if cursor < window_end {
        gaps.push((cursor, window_end));
    }

    gaps
}

/// Round `instant` up to the next multiple of `step` since the Unix epoch.
/// Instants already on the grid are returned unchanged.
fn snap_up(instant: DateTime<Utc>, step: Duration) -> DateTime<Utc> {
    let step_seconds = step.num_seconds();
    let past_grid = Duration::seconds(instant.timestamp().rem_euclid(step_seconds))
        + Duration::nanoseconds(i64::from(instant.timestamp_subsec_nanos()));
    if past_grid == Duration::zero() {
        instant
    } else {
        instant - past_grid + step
    }
}

/// The slot must begin at or after the opening hour and finish by the closing
/// hour, judged on the local wall clock of the start.
fn within_working_hours(start: DateTime<Utc>, prefs: &SchedulingPreferences, tz: &Tz) -> bool {
    let local = start.with_timezone(tz);
    let start_minute = local.hour() * 60 + local.minute();
    prefs
        .working_hours
        .admits(start_minute, prefs.duration_minutes)
}
