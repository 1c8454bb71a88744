//! Error types for civil-hours operations.

use thiserror::Error;

use crate::timestamp::DateTimeKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HourError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    /// A UTC-only operation received a timestamp tagged with another kind.
    #[error("Expected a UTC timestamp, found kind {found}")]
    NotUtc { found: DateTimeKind },

    #[error("Overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, HourError>;
