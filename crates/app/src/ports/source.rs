//! Source device port — refreshed observations of the litter box.

use std::future::Future;

use litterlink_domain::error::NetworkError;
use litterlink_domain::snapshot::SourceDeviceSnapshot;

/// Read access to the tracked source device.
///
/// Account-level concerns (credentials, robot enumeration, session teardown)
/// belong to the adapter's session type and happen once at startup; the loop
/// only ever needs fresh snapshots.
pub trait SourceDeviceClient: Send + Sync {
    /// Fetch a fresh [`SourceDeviceSnapshot`].
    ///
    /// This is a pure read and must be safe to retry — the loop calls it on
    /// every poll, indefinitely.
    fn refresh(&self) -> impl Future<Output = Result<SourceDeviceSnapshot, NetworkError>> + Send;
}
