//! Wire models for the Whisker cloud API.
//!
//! Only the fields litterlink reads are modeled; everything else in the
//! vendor payloads is ignored.

use chrono::{DateTime, NaiveDate};
use litterlink_domain::device::{SourceDevice, SourceDeviceKind};
use litterlink_domain::id::SourceDeviceId;
use litterlink_domain::snapshot::{Activity, ActivityKind, ActivityTimestamp};
use litterlink_domain::time::Timestamp;
use serde::Deserialize;

use crate::error::WhiskerError;

/// Response to a successful login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginPayload {
    pub token: String,
}

/// One robot as enumerated by the account endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RobotPayload {
    pub robot_id: String,
    pub name: String,
    pub model: String,
}

impl RobotPayload {
    /// Map the vendor's model string onto the domain kind tag.
    pub(crate) fn into_device(self) -> SourceDevice {
        let kind = match self.model.as_str() {
            "feederRobot" => SourceDeviceKind::Feeder,
            "litterRobot4" => SourceDeviceKind::LitterBox,
            other => SourceDeviceKind::Unknown(other.to_string()),
        };
        SourceDevice {
            id: SourceDeviceId::new(self.robot_id),
            name: self.name,
            kind,
        }
    }
}

/// Per-robot state as returned by the detail endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RobotStatePayload {
    pub last_seen: Option<Timestamp>,
}

/// One activity record from the robot's activity history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActivityPayload {
    pub action: String,
    pub timestamp: String,
}

impl ActivityPayload {
    /// Translate into a domain [`Activity`].
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::BadTimestamp`] when the timestamp string is
    /// neither RFC 3339 nor a bare date.
    pub(crate) fn into_activity(self) -> Result<Activity, WhiskerError> {
        let kind = match self.action.as_str() {
            "cleanCycleComplete" => ActivityKind::CleanCycleComplete,
            other => ActivityKind::Other(other.to_string()),
        };
        Ok(Activity {
            kind,
            timestamp: parse_activity_timestamp(&self.timestamp)?,
        })
    }
}

/// Parse the vendor's activity timestamp.
///
/// The feed usually carries RFC 3339 instants but occasionally degrades to a
/// bare `YYYY-MM-DD` date; both are representable downstream, so neither is
/// an error here.
fn parse_activity_timestamp(raw: &str) -> Result<ActivityTimestamp, WhiskerError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ActivityTimestamp::Instant(
            instant.with_timezone(&chrono::Utc),
        ));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(ActivityTimestamp::DateOnly(date));
    }
    Err(WhiskerError::BadTimestamp {
        raw: raw.to_string(),
    })
}
