//! Error taxonomy shared across the workspace.
//!
//! Three classes with different recovery rules:
//!
//! - **fatal/startup** — [`AuthError`], [`DeviceNotFoundError`]: the account
//!   is misconfigured; abort immediately, never retry.
//! - **transient** — [`NetworkError`]: logged and absorbed by the poll cycle;
//!   the loop itself is the retry mechanism.
//! - **dispatch** — [`DispatchError`]: the one side-effecting write failed.
//!   Logged, never re-attempted in place (the vendor call may have partially
//!   succeeded and a duplicate execution actuates a physical device twice).
//!
//! Adapters define their own typed errors and convert into this taxonomy at
//! the port boundary.

use crate::id::RoutineId;

/// Umbrella error for the whole system.
#[derive(Debug, thiserror::Error)]
pub enum LitterLinkError {
    /// Credentials rejected by a vendor cloud.
    #[error("authentication failed")]
    Auth(#[from] AuthError),

    /// Transport-level failure talking to a vendor cloud.
    #[error("network failure")]
    Network(#[from] NetworkError),

    /// A required device is missing from an account.
    #[error("required device not found")]
    DeviceNotFound(#[from] DeviceNotFoundError),

    /// Routine execution failed.
    #[error("routine dispatch failed")]
    Dispatch(#[from] DispatchError),
}

impl LitterLinkError {
    /// Whether this error belongs to the fatal/startup class that must abort
    /// the process instead of being absorbed by the poll cycle.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::DeviceNotFound(_))
    }
}

/// A vendor cloud rejected the provided credentials.
#[derive(Debug, thiserror::Error)]
#[error("{account} rejected the provided credentials")]
pub struct AuthError {
    /// Which account the rejection came from (e.g. `"whisker"`).
    pub account: &'static str,
}

/// A transport failure on a read path. Safe to retry on the next poll.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed")]
pub struct NetworkError {
    /// The operation that failed (e.g. `"refresh litter box"`).
    pub operation: &'static str,
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl NetworkError {
    /// Wrap a transport error raised by the given operation.
    pub fn new(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation,
            source: Box::new(source),
        }
    }
}

/// A device that must exist on an account could not be found.
///
/// This indicates account misconfiguration, not transience: enumeration
/// succeeded and the device simply is not there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeviceNotFoundError {
    /// The source account has no feeder robot.
    #[error("no feeder robot on the source account")]
    Feeder,

    /// The source account has no litter box robot.
    #[error("no litter box robot on the source account")]
    LitterBox,

    /// The action account's home topology is empty.
    #[error("no device in the action account's home")]
    ActionDevice,
}

/// Routine execution failed. Never silently retried.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The vendor refused to run the routine (disabled, deleted, busy…).
    #[error("routine {id} is not executable")]
    NotExecutable {
        /// The routine that was refused.
        id: RoutineId,
    },

    /// Transport failure during the execute call. The call may have partially
    /// succeeded on the vendor side, so this is not treated as retriable.
    #[error("execute call failed")]
    Transport(#[source] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct FakeIoError;

    #[test]
    fn should_display_auth_error_with_account() {
        let err = AuthError { account: "whisker" };
        assert_eq!(err.to_string(), "whisker rejected the provided credentials");
    }

    #[test]
    fn should_display_network_error_with_operation() {
        let err = NetworkError::new("refresh litter box", FakeIoError);
        assert_eq!(err.to_string(), "refresh litter box failed");
    }

    #[test]
    fn should_expose_network_error_source() {
        let err = NetworkError::new("list routines", FakeIoError);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn should_classify_auth_as_fatal() {
        let err: LitterLinkError = AuthError { account: "roborock" }.into();
        assert!(err.is_fatal());
    }

    #[test]
    fn should_classify_device_not_found_as_fatal() {
        let err: LitterLinkError = DeviceNotFoundError::Feeder.into();
        assert!(err.is_fatal());
    }

    #[test]
    fn should_classify_network_as_transient() {
        let err: LitterLinkError = NetworkError::new("refresh litter box", FakeIoError).into();
        assert!(!err.is_fatal());
    }

    #[test]
    fn should_classify_dispatch_as_non_fatal() {
        let err: LitterLinkError = DispatchError::NotExecutable {
            id: RoutineId::new("abc"),
        }
        .into();
        assert!(!err.is_fatal());
    }

    #[test]
    fn should_display_not_executable_with_routine_id() {
        let err = DispatchError::NotExecutable {
            id: RoutineId::new("1797795"),
        };
        assert_eq!(err.to_string(), "routine 1797795 is not executable");
    }
}
