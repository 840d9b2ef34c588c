//! Devices — the robots on both vendor accounts, and the startup rules that
//! pick which ones litterlink owns for the rest of its life.
//!
//! The source SDK's subclass-based device typing becomes a plain
//! [`SourceDeviceKind`] tag. Resolution runs once at startup into two named
//! ownership slots; the loop never re-queries devices by kind.

use serde::{Deserialize, Serialize};

use crate::error::DeviceNotFoundError;
use crate::id::{ActionDeviceId, SourceDeviceId};

/// Kind discriminant for robots on the source account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceDeviceKind {
    /// Automatic pet feeder.
    Feeder,
    /// Self-cleaning litter box.
    LitterBox,
    /// A model this system does not know; ignored by resolution.
    Unknown(String),
}

/// A robot enumerated from the source account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDevice {
    pub id: SourceDeviceId,
    pub name: String,
    pub kind: SourceDeviceKind,
}

/// A device enumerated from the action account's home topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDevice {
    pub id: ActionDeviceId,
    pub name: String,
}

/// The two source-account slots litterlink requires.
///
/// The feeder is never polled, but its absence still means the account is not
/// the one this deployment expects, so resolution enforces it.
#[derive(Debug, Clone)]
pub struct ResolvedSourceDevices {
    pub feeder: SourceDevice,
    pub litter_box: SourceDevice,
}

/// Resolve the feeder and litter box from the enumerated source devices.
///
/// Duplicate kinds resolve first-wins. Unknown kinds are skipped.
///
/// # Errors
///
/// Returns [`DeviceNotFoundError::Feeder`] or
/// [`DeviceNotFoundError::LitterBox`] when the respective kind is absent.
pub fn resolve_source_devices(
    devices: &[SourceDevice],
) -> Result<ResolvedSourceDevices, DeviceNotFoundError> {
    let feeder = devices
        .iter()
        .find(|d| d.kind == SourceDeviceKind::Feeder)
        .ok_or(DeviceNotFoundError::Feeder)?;
    let litter_box = devices
        .iter()
        .find(|d| d.kind == SourceDeviceKind::LitterBox)
        .ok_or(DeviceNotFoundError::LitterBox)?;

    Ok(ResolvedSourceDevices {
        feeder: feeder.clone(),
        litter_box: litter_box.clone(),
    })
}

/// Select the target device from the action account's home topology.
///
/// By contract of the deployment this is the **first** enumerated device — a
/// simplifying assumption, not a general selection policy.
///
/// # Errors
///
/// Returns [`DeviceNotFoundError::ActionDevice`] when the topology is empty.
pub fn select_action_device(devices: &[ActionDevice]) -> Result<ActionDevice, DeviceNotFoundError> {
    devices
        .first()
        .cloned()
        .ok_or(DeviceNotFoundError::ActionDevice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, kind: SourceDeviceKind) -> SourceDevice {
        SourceDevice {
            id: SourceDeviceId::new(id),
            name: format!("robot {id}"),
            kind,
        }
    }

    #[test]
    fn should_resolve_feeder_and_litter_box() {
        let devices = vec![
            device("f1", SourceDeviceKind::Feeder),
            device("lb1", SourceDeviceKind::LitterBox),
        ];
        let resolved = resolve_source_devices(&devices).unwrap();
        assert_eq!(resolved.feeder.id.as_str(), "f1");
        assert_eq!(resolved.litter_box.id.as_str(), "lb1");
    }

    #[test]
    fn should_fail_when_feeder_missing() {
        let devices = vec![device("lb1", SourceDeviceKind::LitterBox)];
        let err = resolve_source_devices(&devices).unwrap_err();
        assert_eq!(err, DeviceNotFoundError::Feeder);
    }

    #[test]
    fn should_fail_when_litter_box_missing() {
        let devices = vec![device("f1", SourceDeviceKind::Feeder)];
        let err = resolve_source_devices(&devices).unwrap_err();
        assert_eq!(err, DeviceNotFoundError::LitterBox);
    }

    #[test]
    fn should_fail_when_account_is_empty() {
        let err = resolve_source_devices(&[]).unwrap_err();
        assert_eq!(err, DeviceNotFoundError::Feeder);
    }

    #[test]
    fn should_skip_unknown_kinds() {
        let devices = vec![
            device("x1", SourceDeviceKind::Unknown("fountain".to_string())),
            device("f1", SourceDeviceKind::Feeder),
            device("lb1", SourceDeviceKind::LitterBox),
        ];
        let resolved = resolve_source_devices(&devices).unwrap();
        assert_eq!(resolved.litter_box.id.as_str(), "lb1");
    }

    #[test]
    fn should_resolve_duplicates_first_wins() {
        let devices = vec![
            device("f1", SourceDeviceKind::Feeder),
            device("lb1", SourceDeviceKind::LitterBox),
            device("lb2", SourceDeviceKind::LitterBox),
        ];
        let resolved = resolve_source_devices(&devices).unwrap();
        assert_eq!(resolved.litter_box.id.as_str(), "lb1");
    }

    #[test]
    fn should_select_first_action_device() {
        let devices = vec![
            ActionDevice {
                id: ActionDeviceId::new("duid-1"),
                name: "Vacuum downstairs".to_string(),
            },
            ActionDevice {
                id: ActionDeviceId::new("duid-2"),
                name: "Vacuum upstairs".to_string(),
            },
        ];
        let selected = select_action_device(&devices).unwrap();
        assert_eq!(selected.id.as_str(), "duid-1");
    }

    #[test]
    fn should_fail_when_home_topology_empty() {
        let err = select_action_device(&[]).unwrap_err();
        assert_eq!(err, DeviceNotFoundError::ActionDevice);
    }
}
