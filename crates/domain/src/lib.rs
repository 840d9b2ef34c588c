//! # litterlink-domain
//!
//! Pure domain model for the litterlink cross-device automation bridge.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define **Devices** (the source account's robots, the action account's
//!   vacuum) and the startup resolution rules over them
//! - Define **Snapshots** (one refresh of the source device's state)
//! - Define the **Trigger predicate** (pure decision over a snapshot and the
//!   current instant)
//! - Define **Routines** (named automation actions on the target device) and
//!   their name-based resolution
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod routine;
pub mod snapshot;
pub mod trigger;
