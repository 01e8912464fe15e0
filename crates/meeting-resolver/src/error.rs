//! Error types for meeting-resolver operations.

use thiserror::Error;

/// Opaque failure reported by a [`BusyIntervalSource`](crate::source::BusyIntervalSource).
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid scheduling request: {0}")]
    Validation(String),

    #[error("Busy-interval provider failed: {0}")]
    Provider(#[source] ProviderError),

    #[error("No availability: {0}")]
    NoAvailability(String),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
