//! Snapshots — one refresh of the source device's state.
//!
//! A snapshot is an immutable value produced fresh on each refresh call. The
//! next refresh supersedes it entirely; nothing is ever merged.

use chrono::NaiveDate;

use crate::time::Timestamp;

/// Kind tag of the latest recorded activity on the litter box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    /// A cleaning cycle finished — the event this system waits for.
    CleanCycleComplete,
    /// Any other activity the vendor reports, carried by its raw tag.
    Other(String),
}

/// When an activity happened, as reported by the vendor.
///
/// The upstream feed occasionally carries a bare date with no time of day.
/// That is a representable case here, not an exception: the trigger predicate
/// rejects it as a data-quality hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityTimestamp {
    /// A full instant.
    Instant(Timestamp),
    /// A date with no time-of-day component.
    DateOnly(NaiveDate),
}

/// The most recent activity record on the source device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub timestamp: ActivityTimestamp,
}

/// One refreshed observation of the source device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDeviceSnapshot {
    /// Latest activity record, if the account exposes activity history.
    pub latest_activity: Option<Activity>,
    /// When the device last phoned home, if known.
    pub last_seen: Option<Timestamp>,
}

impl SourceDeviceSnapshot {
    /// A snapshot with nothing observed, mostly useful in tests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            latest_activity: None,
            last_seen: None,
        }
    }
}
