//! # litterlink-adapter-roborock
//!
//! Roborock cloud adapter — brings the vacuum account into litterlink.
//!
//! ## Responsibilities
//! - Authenticate against the Roborock cloud and fetch the home topology
//!   ([`RoborockSession`])
//! - List and execute the target device's routines ("scenes")
//!   ([`RoborockClient`], implementing the `ActionDeviceClient` port)
//!
//! Execution is the one non-idempotent write in the system: the client
//! issues it exactly once per call and never retries on its own.
//!
//! ## Dependency rule
//! Depends on `litterlink-app` (port traits) and `litterlink-domain` only.

mod client;
mod config;
mod error;
mod model;

pub use client::{RoborockClient, RoborockSession};
pub use config::RoborockConfig;
pub use error::RoborockError;
