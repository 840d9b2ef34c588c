//! Routines — named automation actions executable on the target device.

use crate::id::RoutineId;

/// A vendor-defined automation routine ("scene") on the action device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoutine {
    /// Opaque identifier the vendor executes by.
    pub id: RoutineId,
    /// Display name the deployment configures against.
    pub name: String,
}

/// Find the routine to dispatch: the **first** entry whose name equals
/// `name`, by exact case-sensitive comparison.
///
/// Routine configuration lives on the vendor side and can change
/// independently of this process, so `None` is an expected outcome, not an
/// error.
#[must_use]
pub fn find_routine<'a>(routines: &'a [ActionRoutine], name: &str) -> Option<&'a ActionRoutine> {
    routines.iter().find(|routine| routine.name == name)
}
