//! Typed identifier newtypes backed by vendor-opaque strings.
//!
//! Both vendor clouds mint their own identifiers; litterlink never generates
//! one. The newtypes only prevent a routine id from being passed where a
//! device id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier received from the vendor API.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Access the raw identifier, e.g. for building request paths.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifier of a robot on the source (litter box) account.
    SourceDeviceId
);

define_id!(
    /// Identifier of a device on the action (vacuum) account.
    ActionDeviceId
);

define_id!(
    /// Identifier of an [`ActionRoutine`](crate::routine::ActionRoutine).
    RoutineId
);
