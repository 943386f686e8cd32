use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR({size}) CHARACTER SET LATIN", 1, 64_000),
    Capability::of(T::AnsiString, "CLOB CHARACTER SET LATIN").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size}) CHARACTER SET LATIN", 1, 64_000),
    Capability::sized(T::Binary, "VARBYTE({size})", 1, 64_000),
    Capability::of(T::Binary, "BLOB").lob(),
    Capability::of(T::Byte, "BYTEINT").identity(),
    Capability::of(T::Boolean, "BYTEINT"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "TIMESTAMP(3)"),
    Capability::of(T::DateTime2, "TIMESTAMP(6)"),
    Capability::of(T::DateTimeOffset, "TIMESTAMP(6) WITH TIME ZONE"),
    Capability::scaled(T::Decimal, "DECIMAL({size},{scale})", (1, 38), (0, 38)).identity(),
    Capability::sized(T::Decimal, "DECIMAL({size})", 1, 38).identity(),
    Capability::of(T::Double, "FLOAT"),
    Capability::of(T::Guid, "CHAR(36) CHARACTER SET LATIN").warn("GUIDs are stored as CHAR(36) text"),
    Capability::of(T::Int16, "SMALLINT").identity(),
    Capability::of(T::Int32, "INTEGER").identity(),
    Capability::of(T::Int64, "BIGINT").identity(),
    Capability::of(T::SByte, "BYTEINT").identity(),
    Capability::of(T::Single, "FLOAT").warn("Teradata FLOAT is double precision"),
    Capability::sized(T::String, "VARCHAR({size}) CHARACTER SET UNICODE", 1, 32_000),
    Capability::of(T::String, "CLOB CHARACTER SET UNICODE").lob(),
    Capability::sized(T::StringFixedLength, "CHAR({size}) CHARACTER SET UNICODE", 1, 32_000),
    Capability::of(T::Time, "TIME(6)"),
    Capability::of(T::Xml, "XML").lob(),
];

static RESERVED: &[&str] = &[
    "ABORT", "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BEGIN", "BETWEEN", "BT", "BY",
    "BYTEINT", "CASE", "CHECK", "COLUMN", "COMMENT", "CONSTRAINT", "CREATE", "DATABASE", "DATE",
    "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "ET", "EXISTS", "FOREIGN",
    "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTO", "IS", "JOIN", "KEY",
    "LIKE", "LOCK", "MINUS", "NOT", "NULL", "ON", "OR", "ORDER", "PERM", "PRIMARY", "QUALIFY",
    "REFERENCES", "SAMPLE", "SEL", "SELECT", "SET", "TABLE", "THEN", "TITLE", "TO", "TOP", "TYPE",
    "UNION", "UNIQUE", "UPDATE", "USER", "VALUES", "WHEN", "WHERE", "WITH", "YEAR",
];

pub static TERADATA: Provider = Provider {
    name: "Teradata",
    capabilities: CAPABILITIES,
    quotes: ('"', '"'),
    parameters: ParameterStyle::Positional,
    max_identifier_length: Some(30),
    reserved_words: RESERVED,
    lob_not_first: true,
    identity: IdentitySyntax::TypeSuffix("GENERATED BY DEFAULT AS IDENTITY (START WITH 1 INCREMENT BY 1)"),
    row_version: None,
    boolean_literals: ("1", "0"),
    current_timestamp: "CURRENT_TIMESTAMP",
    explicit_null: false,
    add_column: "ADD",
    drop_column: "DROP",
    constraints: ConstraintStyle::AlterTable,
    indexes: IndexStyle::ColumnsFirst,
    table_exists_query: "SELECT COUNT(*) FROM DBC.TablesV \
                         WHERE DatabaseName = DATABASE AND TableName = ?",
};
