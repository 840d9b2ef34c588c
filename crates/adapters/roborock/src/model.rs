//! Wire models for the Roborock cloud API.

use litterlink_domain::device::ActionDevice;
use litterlink_domain::id::{ActionDeviceId, RoutineId};
use litterlink_domain::routine::ActionRoutine;
use serde::Deserialize;

/// Response to a successful login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginPayload {
    pub token: String,
}

/// The account's home topology.
#[derive(Debug, Deserialize)]
pub(crate) struct HomeDataPayload {
    pub devices: Vec<DevicePayload>,
}

/// One device in the home topology.
#[derive(Debug, Deserialize)]
pub(crate) struct DevicePayload {
    pub duid: String,
    pub name: String,
}

impl DevicePayload {
    pub(crate) fn into_device(self) -> ActionDevice {
        ActionDevice {
            id: ActionDeviceId::new(self.duid),
            name: self.name,
        }
    }
}

/// One routine ("scene") configured on a device.
///
/// The vendor mints numeric scene ids; they are carried downstream as opaque
/// strings and handed back untouched on execution.
#[derive(Debug, Deserialize)]
pub(crate) struct ScenePayload {
    pub id: serde_json::Number,
    pub name: String,
}

impl ScenePayload {
    pub(crate) fn into_routine(self) -> ActionRoutine {
        ActionRoutine {
            id: RoutineId::new(self.id.to_string()),
            name: self.name,
        }
    }
}
