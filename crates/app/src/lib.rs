//! # litterlink-app
//!
//! Application layer — **port definitions** (traits) and the automation loop.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `SourceDeviceClient` — refresh the tracked litter box's state
//!   - `ActionDeviceClient` — list and execute the vacuum's routines
//! - Own the **`AutomationLoop`** state machine: poll, decide, delay,
//!   resolve, dispatch, cool down
//! - Orchestrate domain logic without knowing *how* either vendor cloud is
//!   reached
//!
//! ## Dependency rule
//! Depends on `litterlink-domain` only (plus `tokio::time` for the
//! scheduler). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod automation_loop;
pub mod ports;
