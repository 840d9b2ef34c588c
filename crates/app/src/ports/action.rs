//! Action device port — routine listing and execution on the vacuum.

use std::future::Future;

use litterlink_domain::error::{DispatchError, NetworkError};
use litterlink_domain::id::RoutineId;
use litterlink_domain::routine::ActionRoutine;

/// Access to the target device's named automation routines.
pub trait ActionDeviceClient: Send + Sync {
    /// List the routines currently configured on the target device.
    ///
    /// A read; safe to retry on the next poll cycle.
    fn list_routines(
        &self,
    ) -> impl Future<Output = Result<Vec<ActionRoutine>, NetworkError>> + Send;

    /// Execute the routine with the given id.
    ///
    /// This actuates a physical device and is **not** idempotent. Callers
    /// must never retry a failed execution blindly — the call may have
    /// partially succeeded on the vendor side.
    fn execute_routine(
        &self,
        id: &RoutineId,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}
