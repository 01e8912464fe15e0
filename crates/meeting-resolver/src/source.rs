//! The busy-interval source seam.
//!
//! Calendar providers live outside this crate. The resolver only needs one
//! call from them: fetch every requested participant's busy intervals inside a
//! window. Implementations are handed to the resolver per request; nothing is
//! cached between calls.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ProviderError;
use crate::interval::TimeInterval;
use crate::participant::Participant;

/// Busy intervals keyed by participant. A participant absent from the map has
/// no busy time.
pub type BusyMap = HashMap<Participant, Vec<TimeInterval>>;

/// A provider of busy intervals (Google Calendar, Outlook, an in-memory map, ...).
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so concurrent scheduling requests can
/// share one source.
#[async_trait]
pub trait BusyIntervalSource: Send + Sync {
    /// Fetch busy intervals for `participants` within `[window_start, window_end)`.
    ///
    /// Failures are returned as-is; the resolver neither retries nor falls back.
    async fn fetch_busy_intervals(
        &self,
        participants: &[Participant],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<BusyMap, ProviderError>;
}

/// In-memory busy source.
///
/// Holds a fixed busy map and answers queries from it. Useful for tests,
/// command-line requests that carry their own busy data, and callers that have
/// already fetched everything up front.
#[derive(Debug, Clone, Default)]
pub struct StaticBusySource {
    busy: BusyMap,
}

impl StaticBusySource {
    pub fn new(busy: BusyMap) -> Self {
        Self { busy }
    }

    /// Add a busy interval for a participant.
    pub fn with_busy(mut self, participant: Participant, interval: TimeInterval) -> Self {
        self.busy.entry(participant).or_default().push(interval);
        self
    }
}

#[async_trait]
impl BusyIntervalSource for StaticBusySource {
    async fn fetch_busy_intervals(
        &self,
        participants: &[Participant],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<BusyMap, ProviderError> {
        let mut result = BusyMap::with_capacity(participants.len());
        for participant in participants {
            let Some(intervals) = self.busy.get(participant) else {
                continue;
            };
            let in_window: Vec<TimeInterval> = intervals
                .iter()
                .filter(|i| i.start < window_end && i.end > window_start)
                .copied()
                .collect();
            result.insert(participant.clone(), in_window);
        }
        Ok(result)
    }
}

impl From<BusyMap> for StaticBusySource {
    fn from(busy: BusyMap) -> Self {
        Self::new(busy)
    }
}
