//! End-to-end meeting resolution.
//!
//! Validate the request, await the busy-interval fetch, then run the pure
//! stages synchronously: merge, generate, rank and select, estimate
//! confidence. Every stage produces new values; nothing is shared between
//! requests, so concurrent calls need no coordination.
//!
//! The caller always supplies "now". The resolver never reads the system
//! clock, which keeps results reproducible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::confidence::estimate_confidence;
use crate::error::{ResolverError, Result};
use crate::generator::{generate_candidates, CandidateSlot};
use crate::interval::merge_busy_map;
use crate::participant::Participant;
use crate::preferences::SchedulingPreferences;
use crate::scoring::{rank_slots, select_slot};
use crate::source::{BusyIntervalSource, BusyMap};

/// Tunables for the generation and selection stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Grid on which candidate start times are placed.
    pub slot_step_minutes: u32,
    /// Upper bound on generated candidates; the earliest ones are kept.
    pub max_candidates: usize,
    /// Number of runner-up slots returned alongside the chosen one.
    pub max_alternatives: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            slot_step_minutes: 15,
            max_candidates: 20,
            max_alternatives: 3,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.slot_step_minutes == 0 {
            return Err(ResolverError::Validation(
                "slot_step_minutes must be greater than zero".to_string(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(ResolverError::Validation(
                "max_candidates must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The resolved meeting slot, handed to the booking collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub chosen: CandidateSlot,
    /// Runners-up in descending score order.
    pub alternatives: Vec<CandidateSlot>,
    /// Informational; see [`estimate_confidence`].
    pub confidence: f64,
    /// The requested timezone, passed through unchanged.
    pub timezone: String,
    /// How many feasible candidates were considered.
    pub candidate_count: usize,
}

/// Resolve a meeting slot with the default [`ResolverConfig`].
pub async fn resolve<S>(
    source: &S,
    participants: &[Participant],
    prefs: &SchedulingPreferences,
    now: DateTime<Utc>,
) -> Result<SchedulingResult>
where
    S: BusyIntervalSource + ?Sized,
{
    resolve_with_config(source, participants, prefs, now, &ResolverConfig::default()).await
}

/// Resolve a meeting slot.
///
/// The request is validated before `source` is called. The fetch is the only
/// suspension point and is awaited in full before merging begins.
///
/// # Errors
/// - `ResolverError::Validation` for malformed preferences, participants,
///   config, or busy intervals.
/// - `ResolverError::Provider` carrying the source's error unchanged.
/// - `ResolverError::NoAvailability` when no candidate slot exists.
pub async fn resolve_with_config<S>(
    source: &S,
    participants: &[Participant],
    prefs: &SchedulingPreferences,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<SchedulingResult>
where
    S: BusyIntervalSource + ?Sized,
{
    config.validate()?;
    prefs.validate()?;
    let participants = validate_participants(participants)?;

    debug!(
        participants = participants.len(),
        window_start = %prefs.window_start,
        window_end = %prefs.window_end,
        "fetching busy intervals"
    );
    let busy = source
        .fetch_busy_intervals(&participants, prefs.window_start, prefs.window_end)
        .await
        .map_err(ResolverError::Provider)?;

    resolve_busy(&busy, prefs, now, config)
}

/// Run the synchronous stages over busy data that is already in hand.
///
/// # Errors
/// Same as [`resolve_with_config`], minus `Provider`.
pub fn resolve_busy(
    busy: &BusyMap,
    prefs: &SchedulingPreferences,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<SchedulingResult> {
    config.validate()?;
    let tz = prefs.validate()?;
    validate_busy(busy)?;

    let merged = merge_busy_map(busy);
    debug!(busy_intervals = merged.len(), "merged busy timeline");

    let candidates = generate_candidates(&merged, prefs, now, config)?;
    if candidates.is_empty() {
        warn!(
            window_start = %prefs.window_start,
            window_end = %prefs.window_end,
            duration_minutes = prefs.duration_minutes,
            "no candidate slots"
        );
        return Err(no_availability(prefs));
    }
    debug!(candidates = candidates.len(), "generated candidate slots");

    let ranked = rank_slots(&candidates, now, &tz);
    let selection =
        select_slot(&ranked, config.max_alternatives).ok_or_else(|| no_availability(prefs))?;
    debug!(
        chosen = %selection.chosen.slot.start,
        score = selection.chosen.score,
        "selected slot"
    );

    Ok(SchedulingResult {
        chosen: selection.chosen.slot,
        alternatives: selection.alternatives.iter().map(|s| s.slot).collect(),
        confidence: estimate_confidence(candidates.len()),
        timezone: prefs.timezone.clone(),
        candidate_count: candidates.len(),
    })
}

/// Reject an empty list or blank identifiers; drop repeats, keeping first-seen
/// order.
fn validate_participants(participants: &[Participant]) -> Result<Vec<Participant>> {
    if participants.is_empty() {
        return Err(ResolverError::Validation(
            "at least one participant is required".to_string(),
        ));
    }

    let mut unique: Vec<Participant> = Vec::with_capacity(participants.len());
    for participant in participants {
        if participant.as_str().trim().is_empty() {
            return Err(ResolverError::Validation(
                "participant identifier is empty".to_string(),
            ));
        }
        if !unique.contains(participant) {
            unique.push(participant.clone());
        }
    }
    Ok(unique)
}

fn validate_busy(busy: &BusyMap) -> Result<()> {
    for (participant, intervals) in busy {
        if let Some(bad) = intervals.iter().find(|i| i.start >= i.end) {
            return Err(ResolverError::Validation(format!(
                "busy interval for {} has start {} not before end {}",
                participant,
                bad.start.to_rfc3339(),
                bad.end.to_rfc3339()
            )));
        }
    }
    Ok(())
}

fn no_availability(prefs: &SchedulingPreferences) -> ResolverError {
    ResolverError::NoAvailability(format!(
        "no {} minute slot between {} and {} within working hours {}-{}",
        prefs.duration_minutes,
        prefs.window_start.to_rfc3339(),
        prefs.window_end.to_rfc3339(),
        prefs.working_hours.start_hour,
        prefs.working_hours.end_hour
    ))
}
