//! Migration status tracking

use super::{MigrationId, VersionRecord};

/// Applied and pending migrations of one migrator
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Applied migrations (from the version table), oldest first
    pub applied: Vec<VersionRecord>,

    /// Pending migrations (known but not applied), oldest first
    pub pending: Vec<MigrationId>,

    /// Whether the version table exists yet
    pub installed: bool,
}

impl MigrationStatus {
    #[must_use]
    pub fn new(applied: Vec<VersionRecord>, pending: Vec<MigrationId>, installed: bool) -> Self {
        Self {
            applied,
            pending,
            installed,
        }
    }

    pub fn total(&self) -> usize {
        self.applied.len() + self.pending.len()
    }

    /// Check if all migrations are applied
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }

    /// Get the latest applied migration version
    #[must_use]
    pub fn latest_applied_version(&self) -> Option<i64> {
        self.applied.iter().map(VersionRecord::timestamp).max()
    }

    /// Get the next pending migration version
    #[must_use]
    pub fn next_pending_version(&self) -> Option<i64> {
        self.pending.first().map(|id| id.timestamp)
    }
}
