//! Whisker adapter error types.

use litterlink_domain::error::{AuthError, LitterLinkError, NetworkError};

/// Errors specific to the Whisker adapter.
#[derive(Debug, thiserror::Error)]
pub enum WhiskerError {
    /// The cloud rejected the account credentials.
    #[error("whisker rejected the account credentials")]
    Unauthorized,

    /// Transport or decoding failure from the HTTP client.
    #[error("whisker request failed")]
    Http(#[from] reqwest::Error),

    /// A payload field could not be translated into the domain model.
    #[error("unrecognized whisker activity timestamp {raw:?}")]
    BadTimestamp {
        /// The raw timestamp string as received.
        raw: String,
    },
}

impl WhiskerError {
    /// Convert into the domain taxonomy at the port boundary.
    #[must_use]
    pub fn into_domain(self) -> LitterLinkError {
        match self {
            Self::Unauthorized => AuthError { account: "whisker" }.into(),
            other => NetworkError::new("whisker request", other).into(),
        }
    }
}

impl From<WhiskerError> for LitterLinkError {
    fn from(err: WhiskerError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unauthorized_error() {
        let err = WhiskerError::Unauthorized;
        assert_eq!(err.to_string(), "whisker rejected the account credentials");
    }

    #[test]
    fn should_display_bad_timestamp_with_raw_value() {
        let err = WhiskerError::BadTimestamp {
            raw: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized whisker activity timestamp \"yesterday\""
        );
    }

    #[test]
    fn should_convert_unauthorized_to_fatal_auth_error() {
        let err: LitterLinkError = WhiskerError::Unauthorized.into();
        assert!(err.is_fatal());
        assert!(matches!(err, LitterLinkError::Auth(_)));
    }

    #[test]
    fn should_convert_bad_timestamp_to_transient_network_error() {
        let err: LitterLinkError = WhiskerError::BadTimestamp {
            raw: "???".to_string(),
        }
        .into();
        assert!(!err.is_fatal());
        assert!(matches!(err, LitterLinkError::Network(_)));
    }
}
