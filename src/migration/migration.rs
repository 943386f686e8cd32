//! Migration trait definition

use crate::model::Database;
use std::cmp::Ordering;
use std::fmt;

/// Identity of a migration: its timestamp plus an optional tag
///
/// Migrations order by timestamp; the tag only distinguishes otherwise equal
/// ids and never affects ordering between distinct timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MigrationId {
    /// Version timestamp (conventionally `YYYYMMDDHHMMSS`)
    pub timestamp: i64,
    /// Optional grouping tag, stored alongside the timestamp
    pub tag: Option<String>,
}

impl MigrationId {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            tag: None,
        }
    }

    pub fn tagged(timestamp: i64, tag: impl Into<String>) -> Self {
        Self {
            timestamp,
            tag: Some(tag.into()),
        }
    }
}

impl Ord for MigrationId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

impl PartialOrd for MigrationId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{} ({})", self.timestamp, tag),
            None => write!(f, "{}", self.timestamp),
        }
    }
}

/// Which way a step moves the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait that all migrations must implement
///
/// `up()` and `down()` only record operations into the given [`Database`];
/// nothing touches the target database until the step executor scripts and
/// runs the recorded model. Both directions are required so every applied
/// migration can be reverted.
pub trait Migration: Send + Sync {
    /// Migration version (timestamp: YYYYMMDDHHMMSS), must be positive
    fn version(&self) -> i64;

    /// Optional tag stored with the version record
    fn tag(&self) -> Option<&str> {
        None
    }

    /// Record the forward operations
    fn up(&self, db: &mut Database);

    /// Record the operations that undo [`Migration::up`]
    fn down(&self, db: &mut Database);

    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: self.version(),
            tag: self.tag().map(str::to_string),
        }
    }
}
