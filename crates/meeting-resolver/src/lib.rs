//! # meeting-resolver
//!
//! Deterministic meeting-slot resolution for scheduling agents.
//!
//! Given every participant's busy intervals and a set of scheduling
//! preferences, the resolver merges the busy time into one shared timeline,
//! walks the gaps for fixed-duration candidate slots, scores them, and picks
//! a preferred slot plus ranked alternatives. Fetching busy data and booking
//! the result are left to external collaborators.
//!
//! ## Modules
//!
//! - [`interval`]: Busy intervals and the interval merger
//! - [`participant`]: Canonical participant identifiers and input normalization
//! - [`preferences`]: Scheduling preferences, working hours, urgency tiers
//! - [`source`]: The busy-interval source seam and an in-memory source
//! - [`generator`]: Candidate slot generation over the merged timeline
//! - [`scoring`]: Heuristic slot scoring and selection
//! - [`confidence`]: Coarse confidence from the candidate count
//! - [`resolver`]: The end-to-end pipeline
//! - [`error`]: Error types

pub mod confidence;
pub mod error;
pub mod generator;
pub mod interval;
pub mod participant;
pub mod preferences;
pub mod resolver;
pub mod scoring;
pub mod source;

pub use confidence::estimate_confidence;
pub use error::{ProviderError, ResolverError};
pub use generator::{generate_candidates, CandidateSlot};
pub use interval::{merge_busy_map, merge_intervals, TimeInterval};
pub use participant::{normalize_all, Participant, ParticipantInput};
pub use preferences::{SchedulingPreferences, UrgencyTier, WorkingHours};
pub use resolver::{
    resolve, resolve_busy, resolve_with_config, ResolverConfig, SchedulingResult,
};
pub use scoring::{rank_slots, score_slot, select_slot, ScoredSlot, Selection};
pub use source::{BusyIntervalSource, BusyMap, StaticBusySource};
