//! Roborock adapter error types.

use litterlink_domain::error::{AuthError, LitterLinkError, NetworkError};
use reqwest::StatusCode;

/// Errors specific to the Roborock adapter.
#[derive(Debug, thiserror::Error)]
pub enum RoborockError {
    /// The cloud rejected the account credentials.
    #[error("roborock rejected the account credentials")]
    Unauthorized,

    /// The vendor refused to run a routine (deleted, disabled, device busy).
    #[error("roborock refused to run the routine (status {status})")]
    RoutineRejected {
        /// The HTTP status the refusal came with.
        status: StatusCode,
    },

    /// Transport or decoding failure from the HTTP client.
    #[error("roborock request failed")]
    Http(#[from] reqwest::Error),
}

impl RoborockError {
    /// Convert into the domain taxonomy at the port boundary.
    #[must_use]
    pub fn into_domain(self) -> LitterLinkError {
        match self {
            Self::Unauthorized => AuthError { account: "roborock" }.into(),
            other => NetworkError::new("roborock request", other).into(),
        }
    }
}

impl From<RoborockError> for LitterLinkError {
    fn from(err: RoborockError) -> Self {
        err.into_domain()
    }
}
