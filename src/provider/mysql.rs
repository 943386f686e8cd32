use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR({size}) CHARACTER SET latin1", 1, 65_532),
    Capability::of(T::AnsiString, "LONGTEXT CHARACTER SET latin1").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size}) CHARACTER SET latin1", 1, 255),
    Capability::sized(T::Binary, "VARBINARY({size})", 1, 65_532),
    Capability::of(T::Binary, "LONGBLOB").lob(),
    Capability::of(T::Byte, "TINYINT UNSIGNED").identity(),
    Capability::of(T::Boolean, "TINYINT(1)"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "DATETIME"),
    Capability::of(T::DateTime2, "DATETIME(6)"),
    Capability::of(T::DateTimeOffset, "DATETIME(6)")
        .warn("MySQL has no offset-aware date-time; the offset is dropped"),
    Capability::scaled(T::Decimal, "DECIMAL({size},{scale})", (1, 65), (0, 30)),
    Capability::sized(T::Decimal, "DECIMAL({size})", 1, 65),
    Capability::of(T::Double, "DOUBLE"),
    Capability::of(T::Guid, "CHAR(36)").warn("GUIDs are stored as CHAR(36) text"),
    Capability::of(T::Int16, "SMALLINT").identity(),
    Capability::of(T::Int32, "INT").identity(),
    Capability::of(T::Int64, "BIGINT").identity(),
    Capability::of(T::SByte, "TINYINT").identity(),
    Capability::of(T::Single, "FLOAT"),
    Capability::sized(T::String, "VARCHAR({size})", 1, 16_383),
    Capability::of(T::String, "LONGTEXT").lob(),
    Capability::sized(T::StringFixedLength, "CHAR({size})", 1, 255),
    Capability::of(T::Time, "TIME"),
];

static RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BIGINT", "BINARY", "BLOB", "BOTH", "BY",
    "CASCADE", "CASE", "CHANGE", "CHAR", "CHECK", "COLUMN", "CONSTRAINT", "CREATE", "CROSS",
    "DATABASE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DIV", "DOUBLE", "DROP", "ELSE", "EXISTS",
    "FALSE", "FLOAT", "FOR", "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX",
    "INSERT", "INT", "INTERVAL", "INTO", "IS", "JOIN", "KEY", "KEYS", "LEFT", "LIKE", "LIMIT",
    "LOCK", "MATCH", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY", "RANGE", "READ",
    "REFERENCES", "RENAME", "REPLACE", "RIGHT", "SCHEMA", "SELECT", "SET", "SHOW", "TABLE",
    "THEN", "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USE", "USING", "VALUES", "WHEN", "WHERE",
    "WITH",
];

pub static MYSQL: Provider = Provider {
    name: "MySQL",
    capabilities: CAPABILITIES,
    quotes: ('`', '`'),
    parameters: ParameterStyle::Positional,
    max_identifier_length: Some(64),
    reserved_words: RESERVED,
    lob_not_first: false,
    identity: IdentitySyntax::TypeSuffix("AUTO_INCREMENT"),
    row_version: Some("TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6)"),
    boolean_literals: ("1", "0"),
    current_timestamp: "CURRENT_TIMESTAMP",
    explicit_null: false,
    add_column: "ADD COLUMN",
    drop_column: "DROP COLUMN",
    constraints: ConstraintStyle::MySql,
    indexes: IndexStyle::DropOnTable,
    table_exists_query: "SELECT COUNT(*) FROM information_schema.tables \
                         WHERE table_schema = DATABASE() AND table_name = ?",
};
