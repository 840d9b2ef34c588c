//! # litterlink-adapter-whisker
//!
//! Whisker cloud adapter — brings the litter box account into litterlink.
//!
//! ## Responsibilities
//! - Authenticate against the Whisker cloud and enumerate the account's
//!   robots ([`WhiskerSession`])
//! - Refresh the tracked litter box's state as domain snapshots
//!   ([`WhiskerClient`], implementing the `SourceDeviceClient` port)
//! - Translate the vendor's JSON payloads — including its occasionally
//!   date-only activity timestamps — into domain types
//!
//! The vendor protocol is treated as an opaque HTTPS/JSON surface; only the
//! fields this system reads are modeled.
//!
//! ## Dependency rule
//! Depends on `litterlink-app` (port traits) and `litterlink-domain` only.

mod client;
mod config;
mod error;
mod model;

pub use client::{WhiskerClient, WhiskerSession};
pub use config::WhiskerConfig;
pub use error::WhiskerError;
