//! Shared newtypes and enums.

use crate::error::LeadscoutError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for data source identifiers with validation.
///
/// Source IDs are lowercase alphanumeric with hyphens or underscores,
/// 2-50 characters, and must start and end with an alphanumeric character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Create a new `SourceId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, LeadscoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), LeadscoutError> {
        static SOURCE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SOURCE_REGEX.get_or_init(|| {
            Regex::new(r"^[a-z0-9][a-z0-9_-]{0,48}[a-z0-9]$").expect("valid regex")
        });

        if id.len() < 2 || id.len() > 50 {
            return Err(LeadscoutError::Validation(format!(
                "invalid source ID: must be 2-50 characters, got {} characters",
                id.len()
            )));
        }

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(LeadscoutError::Validation(format!(
                "invalid source ID: must be lowercase alphanumeric with hyphens or underscores, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SourceId {
    type Error = LeadscoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceId> for String {
    fn from(id: SourceId) -> Self {
        id.0
    }
}

impl FromStr for SourceId {
    type Err = LeadscoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// Position of a lead in the matching lifecycle.
///
/// Ordered: `Raw < Scored < Recommended`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Freshly produced by a source adapter, not yet seen by a matcher
    #[default]
    Raw,
    /// Evaluated by a matcher
    Scored,
    /// Evaluated and judged a fit for the customer
    Recommended,
}

impl MatchStatus {
    /// Stable lowercase name used in history records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Scored => "scored",
            Self::Recommended => "recommended",
        }
    }

    /// The status directly after this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Raw => Some(Self::Scored),
            Self::Scored => Some(Self::Recommended),
            Self::Recommended => None,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only entry in a lead's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatusRecord {
    /// Status before the change
    pub from_status: MatchStatus,
    /// Status after the change
    pub to_status: MatchStatus,
    /// Why the change happened
    pub reason: String,
    /// Who or what made the change
    pub updated_by: String,
    /// When the change happened
    pub timestamp: Timestamp,
}
