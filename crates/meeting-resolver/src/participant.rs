//! Canonical participant identifiers.
//!
//! Chat and calendar integrations describe attendees in several shapes: a bare
//! string, an object carrying an `email`, or an object carrying a `login`.
//! [`ParticipantInput`] accepts all of them at the ingestion boundary and
//! normalizes to a single [`Participant`] before the resolver sees the data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};

/// An opaque participant identifier, usually an email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Build a participant from a raw identifier. Surrounding whitespace is
    /// trimmed.
    ///
    /// # Errors
    /// Returns `ResolverError::Validation` if the identifier is blank.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ResolverError::Validation(
                "participant identifier is empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant as it arrives from an external integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantInput {
    /// `"alice@example.com"`
    Id(String),
    /// `{"email": "alice@example.com"}`
    Email { email: String },
    /// `{"login": "alice"}`
    Login { login: String },
}

impl ParticipantInput {
    pub fn normalize(&self) -> Result<Participant> {
        match self {
            ParticipantInput::Id(id) => Participant::new(id),
            ParticipantInput::Email { email } => Participant::new(email),
            ParticipantInput::Login { login } => Participant::new(login),
        }
    }
}

impl TryFrom<ParticipantInput> for Participant {
    type Error = ResolverError;

    fn try_from(input: ParticipantInput) -> Result<Self> {
        input.normalize()
    }
}

/// Normalize a batch of inputs, dropping repeated identifiers while keeping
/// first-seen order.
pub fn normalize_all(inputs: &[ParticipantInput]) -> Result<Vec<Participant>> {
    let mut participants: Vec<Participant> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let participant = input.normalize()?;
        if !participants.contains(&participant) {
            participants.push(participant);
        }
    }
    Ok(participants)
}
