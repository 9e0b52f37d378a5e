//! Lifecycle status of a certificate or CA

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shown to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Inside the validity window and not revoked
    Active,
    /// Active, but `not_after` falls inside the configured horizon
    Expiring,
    /// Outside the validity window, including not yet valid
    Expired,
    /// Revoked, whatever the validity window says
    Revoked,
}

impl Status {
    /// Lowercase display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify against `now`
///
/// `Revoked` wins over the validity window. Both window bounds are inclusive,
/// and a time before `not_before` counts as `Expired`. Never returns
/// [`Status::Expiring`].
#[must_use]
pub fn classify(
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    revoked: bool,
    now: DateTime<Utc>,
) -> Status {
    if revoked {
        Status::Revoked
    } else if now < not_before || now > not_after {
        Status::Expired
    } else {
        Status::Active
    }
}

/// [`classify`], reporting `Expiring` when an active item's remaining
/// lifetime `not_after - now` is at most `horizon`
#[must_use]
pub fn classify_with_horizon(
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    revoked: bool,
    now: DateTime<Utc>,
    horizon: Duration,
) -> Status {
    match classify(not_before, not_after, revoked, now) {
        Status::Active if not_after - now <= horizon => Status::Expiring,
        status => status,
    }
}
