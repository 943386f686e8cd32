//! `VersionRecord` - one row of the version table

use super::MigrationId;
use crate::executor::{DbError, DbValue, Row};
use chrono::{DateTime, NaiveDateTime, Utc};

/// A migration recorded as applied in the version table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub id: MigrationId,
    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
}

impl VersionRecord {
    pub fn new(id: MigrationId, applied_at: DateTime<Utc>) -> Self {
        Self { id, applied_at }
    }

    pub fn timestamp(&self) -> i64 {
        self.id.timestamp
    }

    /// Create a `VersionRecord` from a database row
    ///
    /// Expected column order: `Timestamp`, `Tag`, `AppliedAt`.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Parse` if a column is missing or the timestamp cannot be parsed.
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        let timestamp = row.get_i64(0)?;
        let tag = match row.get(1) {
            None | Some(DbValue::Null) => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| DbError::Parse("Tag column is not text".to_string()))?
                    .to_string(),
            ),
        };
        let applied_at = match row.get(2) {
            Some(DbValue::TimestampTz(v)) => *v,
            Some(DbValue::Timestamp(v)) => v.and_utc(),
            // SQLite keeps timestamps as text
            Some(DbValue::Text(v)) => parse_applied_at(v)?,
            other => {
                return Err(DbError::Parse(format!(
                    "AppliedAt column has unexpected value {other:?}"
                )))
            }
        };

        Ok(Self {
            id: MigrationId { timestamp, tag },
            applied_at,
        })
    }
}

fn parse_applied_at(text: &str) -> Result<DateTime<Utc>, DbError> {
    if let Ok(v) = DateTime::parse_from_rfc3339(text) {
        return Ok(v.with_timezone(&Utc));
    }
    [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    .map(|naive| naive.and_utc())
    .ok_or_else(|| {
        DbError::Parse(format!(
            "Failed to parse timestamp '{text}': unrecognized format"
        ))
    })
}
