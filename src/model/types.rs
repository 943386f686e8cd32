//! Dialect-independent column types.

use serde::Deserialize;
use std::fmt;

/// Logical column type used by migration authors.
///
/// Providers translate each logical type into a native type expression
/// (see [`crate::provider::Capability`]). A logical type that a provider does
/// not declare cannot be scripted against that provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum LogicalType {
    /// Variable-length non-Unicode text
    AnsiString,
    /// Fixed-length non-Unicode text
    AnsiStringFixedLength,
    /// Variable-length binary data
    Binary,
    /// Unsigned 8-bit integer
    Byte,
    Boolean,
    /// Date without time of day
    Date,
    DateTime,
    /// Date and time with a larger fractional precision than `DateTime`
    DateTime2,
    /// Date and time with a UTC offset
    DateTimeOffset,
    /// Fixed-precision number; size is the precision
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    /// Signed 8-bit integer
    SByte,
    /// Single-precision floating point
    Single,
    /// Variable-length Unicode text
    String,
    /// Fixed-length Unicode text
    StringFixedLength,
    Time,
    Xml,
}

impl LogicalType {
    /// All logical types, in declaration order.
    pub const ALL: [LogicalType; 21] = [
        LogicalType::AnsiString,
        LogicalType::AnsiStringFixedLength,
        LogicalType::Binary,
        LogicalType::Byte,
        LogicalType::Boolean,
        LogicalType::Date,
        LogicalType::DateTime,
        LogicalType::DateTime2,
        LogicalType::DateTimeOffset,
        LogicalType::Decimal,
        LogicalType::Double,
        LogicalType::Guid,
        LogicalType::Int16,
        LogicalType::Int32,
        LogicalType::Int64,
        LogicalType::SByte,
        LogicalType::Single,
        LogicalType::String,
        LogicalType::StringFixedLength,
        LogicalType::Time,
        LogicalType::Xml,
    ];

    /// Whether values of this type are whole numbers (identity candidates)
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            LogicalType::Byte
                | LogicalType::SByte
                | LogicalType::Int16
                | LogicalType::Int32
                | LogicalType::Int64
                | LogicalType::Decimal
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_complete_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for ty in LogicalType::ALL {
            assert!(seen.insert(ty), "duplicate {ty}");
        }
        assert_eq!(seen.len(), 21);
    }

    #[test]
    fn test_integral_types() {
        assert!(LogicalType::Int32.is_integral());
        assert!(LogicalType::Decimal.is_integral());
        assert!(!LogicalType::String.is_integral());
        assert!(!LogicalType::Double.is_integral());
    }

    #[test]
    fn test_display_matches_variant_name() {
        assert_eq!(LogicalType::DateTimeOffset.to_string(), "DateTimeOffset");
    }
}
