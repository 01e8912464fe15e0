//! Scheduling preferences supplied by the caller.
//!
//! Preferences are validated once, before any busy data is fetched. The
//! timezone is carried through to the result and used to read the local hour
//! and weekday of each slot; no other conversion is performed.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};

/// Local working hours, `start_hour:00` to `end_hour:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl WorkingHours {
    /// Whether a slot starting at `start_minute` (minutes since local
    /// midnight) and lasting `duration_minutes` lies entirely inside working
    /// hours on the same day.
    pub fn admits(&self, start_minute: u32, duration_minutes: u32) -> bool {
        let open = u64::from(self.start_hour) * 60;
        let close = u64::from(self.end_hour) * 60;
        let start = u64::from(start_minute);
        start >= open && start + u64::from(duration_minutes) <= close
    }

    /// Length of the working day in minutes. Zero when the hours are inverted.
    pub fn length_minutes(&self) -> u64 {
        u64::from(self.end_hour.saturating_sub(self.start_hour)) * 60
    }
}

/// Coarse priority of a meeting request.
///
/// The resolver never reads the tier; callers use it to decide how wide a
/// window to request (see [`SchedulingPreferences::for_urgency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    #[default]
    Medium,
    High,
}

impl UrgencyTier {
    /// Width of the scheduling window for this tier.
    pub fn window_length(&self) -> Duration {
        match self {
            UrgencyTier::High => Duration::days(2),
            UrgencyTier::Medium => Duration::days(7),
            UrgencyTier::Low => Duration::days(14),
        }
    }
}

/// Constraints for a single scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPreferences {
    /// Length of the meeting in minutes.
    pub duration_minutes: u32,
    #[serde(default)]
    pub working_hours: WorkingHours,
    /// Idle time required on each side of a busy interval.
    #[serde(default)]
    pub buffer_minutes: u32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// IANA timezone name (e.g., "America/New_York").
    pub timezone: String,
    #[serde(default)]
    pub urgency_tier: UrgencyTier,
}

impl SchedulingPreferences {
    /// Preferences whose window opens at `now` and spans the tier's window
    /// length. Working hours default to 9-17 with no buffer.
    pub fn for_urgency(
        now: DateTime<Utc>,
        urgency_tier: UrgencyTier,
        duration_minutes: u32,
        timezone: &str,
    ) -> Self {
        Self {
            duration_minutes,
            working_hours: WorkingHours::default(),
            buffer_minutes: 0,
            window_start: now,
            window_end: now + urgency_tier.window_length(),
            timezone: timezone.to_string(),
            urgency_tier,
        }
    }

    /// Check every invariant and return the parsed timezone.
    ///
    /// # Errors
    /// Returns `ResolverError::Validation` for a zero duration, an empty or
    /// inverted window, inverted or out-of-range working hours, or an unknown
    /// timezone.
    pub fn validate(&self) -> Result<Tz> {
        if self.duration_minutes == 0 {
            return Err(ResolverError::Validation(
                "duration_minutes must be greater than zero".to_string(),
            ));
        }
        if self.window_start >= self.window_end {
            return Err(ResolverError::Validation(format!(
                "window_start {} is not before window_end {}",
                self.window_start.to_rfc3339(),
                self.window_end.to_rfc3339()
            )));
        }

        let WorkingHours {
            start_hour,
            end_hour,
        } = self.working_hours;
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ResolverError::Validation(format!(
                "working hours {}-{} must satisfy start < end <= 24",
                start_hour, end_hour
            )));
        }

        self.tz()
    }

    /// Parse the IANA timezone name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ResolverError::Validation(format!("unknown timezone: {}", self.timezone))
        })
    }
}
