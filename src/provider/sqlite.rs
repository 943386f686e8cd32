use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

// SQLite ignores declared lengths; the bounds only keep models portable.
static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR({size})", 1, 1_000_000_000),
    Capability::of(T::AnsiString, "TEXT").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size})", 1, 1_000_000_000),
    Capability::of(T::Binary, "BLOB").lob(),
    Capability::of(T::Byte, "INTEGER").identity(),
    Capability::of(T::Boolean, "BOOLEAN"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "DATETIME"),
    Capability::of(T::DateTime2, "DATETIME"),
    Capability::scaled(T::Decimal, "NUMERIC({size},{scale})", (1, 38), (0, 38)),
    Capability::sized(T::Decimal, "NUMERIC({size})", 1, 38),
    Capability::of(T::Double, "REAL"),
    Capability::of(T::Guid, "TEXT"),
    Capability::of(T::Int16, "INTEGER").identity(),
    Capability::of(T::Int32, "INTEGER").identity(),
    Capability::of(T::Int64, "INTEGER").identity(),
    Capability::of(T::SByte, "INTEGER").identity(),
    Capability::of(T::Single, "REAL"),
    Capability::sized(T::String, "VARCHAR({size})", 1, 1_000_000_000),
    Capability::of(T::String, "TEXT").lob(),
    Capability::sized(T::StringFixedLength, "CHAR({size})", 1, 1_000_000_000),
    Capability::of(T::Time, "TIME"),
];

static RESERVED: &[&str] = &[
    "ABORT", "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "AUTOINCREMENT", "BETWEEN", "BY", "CASE",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE",
    "DESC", "DISTINCT", "DROP", "ELSE", "END", "ESCAPE", "EXCEPT", "EXISTS", "FOREIGN", "FROM",
    "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "LIMIT",
    "NOT", "NULL", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "SELECT", "SET", "TABLE", "THEN",
    "TO", "TRANSACTION", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
];

pub static SQLITE: Provider = Provider {
    name: "SQLite",
    capabilities: CAPABILITIES,
    quotes: ('"', '"'),
    parameters: ParameterStyle::Positional,
    max_identifier_length: None,
    reserved_words: RESERVED,
    lob_not_first: false,
    identity: IdentitySyntax::AfterPrimaryKey("AUTOINCREMENT"),
    row_version: None,
    boolean_literals: ("1", "0"),
    current_timestamp: "CURRENT_TIMESTAMP",
    explicit_null: false,
    add_column: "ADD COLUMN",
    drop_column: "DROP COLUMN",
    constraints: ConstraintStyle::IndexOnly,
    indexes: IndexStyle::Standard,
    table_exists_query: "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
};
