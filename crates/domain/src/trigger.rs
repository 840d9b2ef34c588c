//! Trigger predicate — pure decision over a snapshot and the current instant.
//!
//! Two strategies are available, selected by configuration:
//!
//! - [`TriggerPolicy::Activity`] fires when the latest activity record says a
//!   clean cycle completed recently. This is the preferred policy whenever
//!   the account exposes activity history: it answers "did the event we care
//!   about just happen".
//! - [`TriggerPolicy::Heartbeat`] fires when the device has recently phoned
//!   home. Strictly weaker evidence ("is the appliance powered and
//!   communicating"), retained as a degraded fallback.
//!
//! Every negative outcome carries a [`HoldReason`] so the loop can log why it
//! is still waiting. No input — including malformed timestamps — makes the
//! predicate fail; bad data holds, it never crashes.

use std::time::Duration;

use serde::Deserialize;

use crate::snapshot::{ActivityKind, ActivityTimestamp, SourceDeviceSnapshot};
use crate::time::Timestamp;

/// Which predicate strategy the loop runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Fire on a recent clean-cycle-complete activity record.
    #[default]
    Activity,
    /// Fire on a recent last-seen heartbeat.
    Heartbeat,
}

/// Why a trigger fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// The litter box reported a completed clean cycle within the window.
    CleanCycleComplete,
    /// The litter box phoned home within the window.
    RecentlySeen,
}

/// Why a trigger did not fire. Observability only — every variant means
/// "keep polling".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// The snapshot carries no activity record.
    NoActivity,
    /// The latest activity is not a completed clean cycle.
    NotCleanCycleComplete,
    /// The activity timestamp is a bare date — a data-quality problem in the
    /// upstream feed, rejected rather than guessed at.
    DateOnlyTimestamp,
    /// The clean cycle completed too long ago.
    StaleActivity,
    /// The device has never been seen.
    NeverSeen,
    /// The last heartbeat is too old.
    StaleHeartbeat,
}

/// The decision derived from one snapshot. Recomputed each poll; a fresh
/// refresh always invalidates the previous decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The awaited event just happened; act.
    Fired {
        reason: TriggerReason,
        observed_at: Timestamp,
    },
    /// Nothing to act on yet; keep polling.
    Held { reason: HoldReason },
}

impl TriggerEvent {
    /// Whether the decision is positive.
    #[must_use]
    pub fn fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

impl TriggerPolicy {
    /// Evaluate the predicate over `snapshot` at instant `now`.
    ///
    /// An observed instant is considered fresh while
    /// `now - observed <= staleness_window`, boundary inclusive.
    #[must_use]
    pub fn evaluate(
        self,
        snapshot: &SourceDeviceSnapshot,
        now: Timestamp,
        staleness_window: Duration,
    ) -> TriggerEvent {
        match self {
            Self::Activity => evaluate_activity(snapshot, now, staleness_window),
            Self::Heartbeat => evaluate_heartbeat(snapshot, now, staleness_window),
        }
    }
}

fn is_fresh(observed: Timestamp, now: Timestamp, staleness_window: Duration) -> bool {
    let age = now.signed_duration_since(observed);
    // A timestamp from the future counts as fresh; clock skew between the
    // vendor cloud and this host must not suppress the trigger.
    age <= chrono::Duration::from_std(staleness_window).unwrap_or(chrono::Duration::MAX)
}

fn evaluate_activity(
    snapshot: &SourceDeviceSnapshot,
    now: Timestamp,
    staleness_window: Duration,
) -> TriggerEvent {
    let Some(activity) = &snapshot.latest_activity else {
        return TriggerEvent::Held {
            reason: HoldReason::NoActivity,
        };
    };

    if activity.kind != ActivityKind::CleanCycleComplete {
        return TriggerEvent::Held {
            reason: HoldReason::NotCleanCycleComplete,
        };
    }

    let observed_at = match activity.timestamp {
        ActivityTimestamp::Instant(ts) => ts,
        ActivityTimestamp::DateOnly(_) => {
            return TriggerEvent::Held {
                reason: HoldReason::DateOnlyTimestamp,
            };
        }
    };

    if !is_fresh(observed_at, now, staleness_window) {
        return TriggerEvent::Held {
            reason: HoldReason::StaleActivity,
        };
    }

    TriggerEvent::Fired {
        reason: TriggerReason::CleanCycleComplete,
        observed_at,
    }
}

fn evaluate_heartbeat(
    snapshot: &SourceDeviceSnapshot,
    now: Timestamp,
    staleness_window: Duration,
) -> TriggerEvent {
    let Some(last_seen) = snapshot.last_seen else {
        return TriggerEvent::Held {
            reason: HoldReason::NeverSeen,
        };
    };

    if !is_fresh(last_seen, now, staleness_window) {
        return TriggerEvent::Held {
            reason: HoldReason::StaleHeartbeat,
        };
    }

    TriggerEvent::Fired {
        reason: TriggerReason::RecentlySeen,
        observed_at: last_seen,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::snapshot::Activity;

    const WINDOW: Duration = Duration::from_secs(600);

    fn at(secs_ago: i64, now: Timestamp) -> Timestamp {
        now - chrono::Duration::seconds(secs_ago)
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn clean_cycle_snapshot(ts: ActivityTimestamp) -> SourceDeviceSnapshot {
        SourceDeviceSnapshot {
            latest_activity: Some(Activity {
                kind: ActivityKind::CleanCycleComplete,
                timestamp: ts,
            }),
            last_seen: None,
        }
    }

    // ── Activity policy ────────────────────────────────────────────

    #[test]
    fn should_fire_on_recent_clean_cycle() {
        let now = now();
        let snapshot = clean_cycle_snapshot(ActivityTimestamp::Instant(at(120, now)));
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Fired {
                reason: TriggerReason::CleanCycleComplete,
                observed_at: at(120, now),
            }
        );
    }

    #[test]
    fn should_fire_exactly_at_staleness_boundary() {
        let now = now();
        let snapshot = clean_cycle_snapshot(ActivityTimestamp::Instant(at(600, now)));
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert!(event.fired());
    }

    #[test]
    fn should_hold_one_second_past_staleness_boundary() {
        let now = now();
        let snapshot = clean_cycle_snapshot(ActivityTimestamp::Instant(at(601, now)));
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::StaleActivity
            }
        );
    }

    #[test]
    fn should_hold_on_date_only_timestamp_without_panicking() {
        let now = now();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let snapshot = clean_cycle_snapshot(ActivityTimestamp::DateOnly(date));
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::DateOnlyTimestamp
            }
        );
    }

    #[test]
    fn should_hold_when_latest_activity_is_something_else() {
        let now = now();
        let snapshot = SourceDeviceSnapshot {
            latest_activity: Some(Activity {
                kind: ActivityKind::Other("clean_cycle_in_progress".to_string()),
                timestamp: ActivityTimestamp::Instant(at(30, now)),
            }),
            last_seen: None,
        };
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::NotCleanCycleComplete
            }
        );
    }

    #[test]
    fn should_hold_when_no_activity_history() {
        let event = TriggerPolicy::Activity.evaluate(&SourceDeviceSnapshot::empty(), now(), WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::NoActivity
            }
        );
    }

    #[test]
    fn should_fire_on_activity_timestamp_from_the_future() {
        let now = now();
        let snapshot = clean_cycle_snapshot(ActivityTimestamp::Instant(at(-30, now)));
        let event = TriggerPolicy::Activity.evaluate(&snapshot, now, WINDOW);
        assert!(event.fired());
    }

    // ── Heartbeat policy ───────────────────────────────────────────

    #[test]
    fn should_fire_on_recent_heartbeat() {
        let now = now();
        let snapshot = SourceDeviceSnapshot {
            latest_activity: None,
            last_seen: Some(at(60, now)),
        };
        let event = TriggerPolicy::Heartbeat.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Fired {
                reason: TriggerReason::RecentlySeen,
                observed_at: at(60, now),
            }
        );
    }

    #[test]
    fn should_hold_on_stale_heartbeat() {
        let now = now();
        let snapshot = SourceDeviceSnapshot {
            latest_activity: None,
            last_seen: Some(at(1200, now)),
        };
        let event = TriggerPolicy::Heartbeat.evaluate(&snapshot, now, WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::StaleHeartbeat
            }
        );
    }

    #[test]
    fn should_hold_when_never_seen() {
        let event =
            TriggerPolicy::Heartbeat.evaluate(&SourceDeviceSnapshot::empty(), now(), WINDOW);
        assert_eq!(
            event,
            TriggerEvent::Held {
                reason: HoldReason::NeverSeen
            }
        );
    }

    #[test]
    fn should_ignore_activity_under_heartbeat_policy() {
        let now = now();
        let mut snapshot = clean_cycle_snapshot(ActivityTimestamp::Instant(at(60, now)));
        snapshot.last_seen = None;
        let event = TriggerPolicy::Heartbeat.evaluate(&snapshot, now, WINDOW);
        assert!(!event.fired());
    }

    // ── Policy selection ───────────────────────────────────────────

    #[test]
    fn should_default_to_activity_policy() {
        assert_eq!(TriggerPolicy::default(), TriggerPolicy::Activity);
    }

    #[test]
    fn should_deserialize_policy_from_config_string() {
        let policy: TriggerPolicy = serde_json::from_str("\"heartbeat\"").unwrap();
        assert_eq!(policy, TriggerPolicy::Heartbeat);
    }
}
