//! Heuristic slot scoring and selection.
//!
//! Each candidate gets an additive desirability score from its distance to
//! "now", its local hour, and its local weekday. The best-scoring candidate is
//! chosen; the next ones by score rank become the alternatives.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::generator::CandidateSlot;

/// Slots starting sooner than this get no "not too soon" bonus.
const MIN_LEAD_HOURS: f64 = 2.0;
const LEAD_TIME_BONUS: f64 = 100.0;

/// Core hours are `[10:00, 16:00)` local.
const CORE_HOURS: std::ops::Range<u32> = 10..16;
const CORE_HOURS_BONUS: f64 = 50.0;

const MIDWEEK_BONUS: f64 = 20.0;
const EDGE_OF_WEEK_PENALTY: f64 = -30.0;

/// Linear bonus that decays from its maximum at "now" to zero at the horizon.
const PROXIMITY_HORIZON_HOURS: f64 = 48.0;
const PROXIMITY_MAX_BONUS: f64 = 50.0;

/// A candidate slot with its desirability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredSlot {
    #[serde(flatten)]
    pub slot: CandidateSlot,
    pub score: f64,
}

/// The chosen slot plus its runners-up, all in descending score order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub chosen: ScoredSlot,
    pub alternatives: Vec<ScoredSlot>,
}

/// Score a single slot. Hour and weekday are read in `tz`.
///
/// - `+100` if the slot starts more than 2 hours after `now`
/// - `+50` if the local start hour is in `[10, 16)`
/// - `+20` on Tuesday, Wednesday, or Thursday
/// - `-30` on Monday before 10:00 or Friday from 16:00
/// - up to `+50` for slots within 48 hours of `now`, falling linearly to 0
pub fn score_slot(slot: &CandidateSlot, now: DateTime<Utc>, tz: &Tz) -> f64 {
    let hours_until = (slot.start - now).num_seconds() as f64 / 3600.0;
    let local = slot.start.with_timezone(tz);
    let hour = local.hour();
    let weekday = local.weekday();

    let mut score = 0.0;

    if hours_until > MIN_LEAD_HOURS {
        score += LEAD_TIME_BONUS;
    }

    if CORE_HOURS.contains(&hour) {
        score += CORE_HOURS_BONUS;
    }

    if matches!(weekday, Weekday::Tue | Weekday::Wed | Weekday::Thu) {
        score += MIDWEEK_BONUS;
    }

    let early_monday = weekday == Weekday::Mon && hour < 10;
    let late_friday = weekday == Weekday::Fri && hour > 15;
    if early_monday || late_friday {
        score += EDGE_OF_WEEK_PENALTY;
    }

    if (0.0..PROXIMITY_HORIZON_HOURS).contains(&hours_until) {
        score += PROXIMITY_MAX_BONUS * (1.0 - hours_until / PROXIMITY_HORIZON_HOURS);
    }

    score
}

/// Score every candidate and order them best-first.
///
/// The sort is stable, so candidates with equal scores keep their input
/// (chronological) order and the earlier slot wins a tie.
pub fn rank_slots(candidates: &[CandidateSlot], now: DateTime<Utc>, tz: &Tz) -> Vec<ScoredSlot> {
    let mut ranked: Vec<ScoredSlot> = candidates
        .iter()
        .map(|slot| ScoredSlot {
            slot: *slot,
            score: score_slot(slot, now, tz),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Pick the top-ranked slot and up to `max_alternatives` runners-up.
///
/// Alternatives are the next entries by score rank, not the slots nearest in
/// time to the chosen one. Returns `None` when `ranked` is empty.
pub fn select_slot(ranked: &[ScoredSlot], max_alternatives: usize) -> Option<Selection> {
    let (chosen, rest) = ranked.split_first()?;
    Some(Selection {
        chosen: *chosen,
        alternatives: rest.iter().take(max_alternatives).copied().collect(),
    })
}
