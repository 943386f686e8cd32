//! Provider capability registry.
//!
//! Every supported dialect is described by one static [`Provider`] table:
//! which logical types it can store and how they render, the size/scale
//! bounds of each rendering, and the dialect quirks the scripter has to
//! respect. Tables are plain data, built at compile time; the
//! [`ProviderRegistry`] only indexes them by invariant name.
//!
//! ```rust
//! use strata::model::LogicalType;
//! use strata::provider::ProviderRegistry;
//!
//! let pg = ProviderRegistry::global().get("PostgreSQL").unwrap();
//! let native = pg.resolve(LogicalType::String, Some(50), None).unwrap();
//! assert_eq!(native.native, "VARCHAR(50)");
//! assert_eq!(pg.quote_identifier("Widgets"), "\"Widgets\"");
//! assert_eq!(pg.parameter_marker(1), "$1");
//! ```

mod mysql;
mod oracle;
mod postgres;
mod sql_server;
mod sqlite;
mod teradata;

use crate::model::LogicalType;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

pub use mysql::MYSQL;
pub use oracle::ORACLE;
pub use postgres::POSTGRESQL;
pub use sql_server::SQL_SERVER;
pub use sqlite::SQLITE;
pub use teradata::TERADATA;

/// One way a provider can store a logical type
///
/// `native` is a template; `{size}` and `{scale}` are substituted with the
/// column's values. A logical type may have several entries, e.g. a sized
/// `VARCHAR({size})` and an unsized large-object fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub logical_type: LogicalType,
    pub native: &'static str,
    /// Inclusive size bounds; `None` means the rendering takes no size
    pub size: Option<(u32, u32)>,
    /// Inclusive scale bounds; `None` means the rendering takes no scale
    pub scale: Option<(u32, u32)>,
    pub large_object: bool,
    /// Can back an identity column
    pub identity: bool,
    /// Can be part of a primary key
    pub primary_key: bool,
    /// Caveat reported whenever this rendering is used
    pub warning: Option<&'static str>,
}

impl Capability {
    pub const fn of(logical_type: LogicalType, native: &'static str) -> Self {
        Self {
            logical_type,
            native,
            size: None,
            scale: None,
            large_object: false,
            identity: false,
            primary_key: true,
            warning: None,
        }
    }

    pub const fn sized(
        logical_type: LogicalType,
        native: &'static str,
        min: u32,
        max: u32,
    ) -> Self {
        Self {
            size: Some((min, max)),
            ..Self::of(logical_type, native)
        }
    }

    pub const fn scaled(
        logical_type: LogicalType,
        native: &'static str,
        size: (u32, u32),
        scale: (u32, u32),
    ) -> Self {
        Self {
            size: Some(size),
            scale: Some(scale),
            ..Self::of(logical_type, native)
        }
    }

    /// Large object; never part of a primary key
    pub const fn lob(self) -> Self {
        Self {
            large_object: true,
            primary_key: false,
            ..self
        }
    }

    pub const fn identity(self) -> Self {
        Self {
            identity: true,
            ..self
        }
    }

    pub const fn warn(self, warning: &'static str) -> Self {
        Self {
            warning: Some(warning),
            ..self
        }
    }

    fn render(&self, size: Option<u32>, scale: Option<u32>) -> String {
        let mut native = self.native.to_string();
        if let Some(size) = size {
            native = native.replace("{size}", &size.to_string());
        }
        if let Some(scale) = scale {
            native = native.replace("{scale}", &scale.to_string());
        }
        native
    }
}

/// A capability resolved for concrete size/scale values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub native: String,
    pub capability: &'static Capability,
}

/// Why a logical type could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Unsupported,
    SizeRequired,
    SizeNotAllowed,
    ScaleNotAllowed,
    SizeOutOfRange { size: u32, min: u32, max: u32 },
    ScaleOutOfRange { scale: u32, min: u32, max: u32 },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unsupported => write!(f, "type is not supported"),
            ResolveError::SizeRequired => write!(f, "a size is required"),
            ResolveError::SizeNotAllowed => write!(f, "the type takes no size"),
            ResolveError::ScaleNotAllowed => write!(f, "the type takes no scale"),
            ResolveError::SizeOutOfRange { size, min, max } => {
                write!(f, "size {size} is outside {min}..={max}")
            }
            ResolveError::ScaleOutOfRange { scale, min, max } => {
                write!(f, "scale {scale} is outside {min}..={max}")
            }
        }
    }
}

/// How identity columns are declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySyntax {
    /// Clause placed right after the native type
    TypeSuffix(&'static str),
    /// Keyword following an inline `PRIMARY KEY`; the column must be the
    /// table's only key column
    AfterPrimaryKey(&'static str),
}

/// Statement parameter placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterStyle {
    /// `?`
    Positional,
    /// `$1`, `$2`, ...
    Dollar,
    /// Prefix plus index or name, e.g. `@p1` / `@name`
    Named(char),
}

/// Index DDL layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStyle {
    /// `CREATE INDEX n ON t (..)` / `DROP INDEX n`
    Standard,
    /// `CREATE INDEX n ON t (..)` / `DROP INDEX n ON t`
    DropOnTable,
    /// `CREATE INDEX n (..) ON t` / `DROP INDEX n ON t`
    ColumnsFirst,
}

/// How constraints are added and dropped after `CREATE TABLE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintStyle {
    /// `ALTER TABLE t ADD/DROP CONSTRAINT n ..`
    AlterTable,
    /// As `AlterTable`, but dropped with `DROP FOREIGN KEY` / `DROP INDEX`
    MySql,
    /// No `ALTER TABLE` constraints: unique constraints become unique
    /// indexes and foreign keys cannot be added or dropped
    IndexOnly,
}

/// Static description of one SQL dialect
#[derive(Debug)]
pub struct Provider {
    pub(crate) name: &'static str,
    pub(crate) capabilities: &'static [Capability],
    pub(crate) quotes: (char, char),
    pub(crate) parameters: ParameterStyle,
    pub(crate) max_identifier_length: Option<usize>,
    pub(crate) reserved_words: &'static [&'static str],
    pub(crate) lob_not_first: bool,
    pub(crate) identity: IdentitySyntax,
    pub(crate) row_version: Option<&'static str>,
    pub(crate) boolean_literals: (&'static str, &'static str),
    pub(crate) current_timestamp: &'static str,
    /// Whether nullable columns spell out `NULL`
    pub(crate) explicit_null: bool,
    pub(crate) add_column: &'static str,
    pub(crate) drop_column: &'static str,
    pub(crate) constraints: ConstraintStyle,
    pub(crate) indexes: IndexStyle,
    /// Counts tables named by parameter 1 in the current schema
    pub(crate) table_exists_query: &'static str,
}

impl Provider {
    /// Invariant name the provider is registered under
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        self.capabilities
    }

    pub fn supports(&self, logical_type: LogicalType) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.logical_type == logical_type)
    }

    /// Resolve a logical type and optional size/scale to a native type
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` when the provider has no rendering for the type
    /// or the size/scale does not fit any of its renderings.
    pub fn resolve(
        &self,
        logical_type: LogicalType,
        size: Option<u32>,
        scale: Option<u32>,
    ) -> Result<Resolved, ResolveError> {
        let candidates: Vec<&'static Capability> = self
            .capabilities
            .iter()
            .filter(|c| c.logical_type == logical_type)
            .collect();
        if candidates.is_empty() {
            return Err(ResolveError::Unsupported);
        }

        let shaped = candidates
            .iter()
            .find(|c| c.size.is_some() == size.is_some() && c.scale.is_some() == scale.is_some());

        let Some(capability) = shaped.copied() else {
            return Err(if scale.is_some() && candidates.iter().all(|c| c.scale.is_none()) {
                ResolveError::ScaleNotAllowed
            } else if size.is_some() && candidates.iter().all(|c| c.size.is_none()) {
                ResolveError::SizeNotAllowed
            } else {
                ResolveError::SizeRequired
            });
        };

        if let (Some(size), Some((min, max))) = (size, capability.size) {
            if size < min || size > max {
                return Err(ResolveError::SizeOutOfRange { size, min, max });
            }
        }
        if let (Some(scale), Some((min, max))) = (scale, capability.scale) {
            if scale < min || scale > max {
                return Err(ResolveError::ScaleOutOfRange { scale, min, max });
            }
        }

        Ok(Resolved {
            native: capability.render(size, scale),
            capability,
        })
    }

    /// Quote an identifier, doubling any embedded closing quote
    pub fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.quotes;
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for ch in name.chars() {
            if ch == close {
                quoted.push(close);
            }
            quoted.push(ch);
        }
        quoted.push(close);
        quoted
    }

    /// Placeholder for the 1-based positional parameter `index`
    pub fn parameter_marker(&self, index: usize) -> String {
        match self.parameters {
            ParameterStyle::Positional => "?".to_string(),
            ParameterStyle::Dollar => format!("${index}"),
            ParameterStyle::Named(prefix) => format!("{prefix}p{index}"),
        }
    }

    /// Placeholder for a named parameter bound at position `index`
    ///
    /// Dialects without named parameters fall back to the positional marker.
    pub fn parameter_specifier(&self, name: &str, index: usize) -> String {
        match self.parameters {
            ParameterStyle::Named(prefix) => format!("{prefix}{name}"),
            _ => self.parameter_marker(index),
        }
    }

    pub fn max_identifier_length(&self) -> Option<usize> {
        self.max_identifier_length
    }

    pub fn is_reserved(&self, identifier: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|w| w.eq_ignore_ascii_case(identifier))
    }

    /// Large-object columns may not be the first column of a table
    pub fn lob_not_first(&self) -> bool {
        self.lob_not_first
    }

    pub fn supports_row_version(&self) -> bool {
        self.row_version.is_some()
    }

    pub fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            self.boolean_literals.0
        } else {
            self.boolean_literals.1
        }
    }

    pub fn current_timestamp(&self) -> &'static str {
        self.current_timestamp
    }

    /// Catalog query counting tables named by the first parameter
    pub fn table_exists_query(&self) -> &'static str {
        self.table_exists_query
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Name-indexed set of every built-in provider
pub struct ProviderRegistry {
    providers: BTreeMap<String, &'static Provider>,
}

static REGISTRY: Lazy<ProviderRegistry> = Lazy::new(|| {
    ProviderRegistry::new(&[
        &SQL_SERVER,
        &POSTGRESQL,
        &MYSQL,
        &SQLITE,
        &ORACLE,
        &TERADATA,
    ])
});

impl ProviderRegistry {
    fn new(providers: &[&'static Provider]) -> Self {
        Self {
            providers: providers
                .iter()
                .map(|p| (p.name.to_ascii_lowercase(), *p))
                .collect(),
        }
    }

    /// The process-wide registry, built on first use
    pub fn global() -> &'static ProviderRegistry {
        &REGISTRY
    }

    /// Look up a provider by invariant name (ASCII case-insensitive)
    pub fn get(&self, name: &str) -> Option<&'static Provider> {
        self.providers.get(&name.to_ascii_lowercase()).copied()
    }

    /// Registered providers, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = &'static Provider> + '_ {
        self.providers.values().copied()
    }

    /// Registered provider names, in lexical order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.values().map(|p| p.name)
    }
}
