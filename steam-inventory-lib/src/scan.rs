use steam_inventory_core::AppRecord;

use crate::error::ScanError;

/// Result of one sub-scan: whatever records were built, plus the error that
/// stopped the walk early, if any.
#[derive(Debug, Default)]
pub struct PartialScan {
    pub apps: Vec<AppRecord>,
    pub aborted: Option<ScanError>,
}

impl PartialScan {
    /// Wrap the outcome of a walk that appended into `apps`.
    pub fn from_walk(apps: Vec<AppRecord>, outcome: Result<(), ScanError>) -> Self {
        Self {
            apps,
            aborted: outcome.err(),
        }
    }
}
