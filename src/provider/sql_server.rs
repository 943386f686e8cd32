use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR({size})", 1, 8000),
    Capability::of(T::AnsiString, "VARCHAR(MAX)").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size})", 1, 8000),
    Capability::sized(T::Binary, "VARBINARY({size})", 1, 8000),
    Capability::of(T::Binary, "VARBINARY(MAX)").lob(),
    Capability::of(T::Byte, "TINYINT").identity(),
    Capability::of(T::Boolean, "BIT"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "DATETIME"),
    Capability::of(T::DateTime2, "DATETIME2"),
    Capability::of(T::DateTimeOffset, "DATETIMEOFFSET"),
    Capability::scaled(T::Decimal, "DECIMAL({size},{scale})", (1, 38), (0, 38)).identity(),
    Capability::sized(T::Decimal, "DECIMAL({size})", 1, 38).identity(),
    Capability::of(T::Double, "FLOAT"),
    Capability::of(T::Guid, "UNIQUEIDENTIFIER"),
    Capability::of(T::Int16, "SMALLINT").identity(),
    Capability::of(T::Int32, "INT").identity(),
    Capability::of(T::Int64, "BIGINT").identity(),
    Capability::of(T::Single, "REAL"),
    Capability::sized(T::String, "NVARCHAR({size})", 1, 4000),
    Capability::of(T::String, "NVARCHAR(MAX)").lob(),
    Capability::sized(T::StringFixedLength, "NCHAR({size})", 1, 4000),
    Capability::of(T::Time, "TIME"),
    Capability::of(T::Xml, "XML").lob(),
];

static RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BACKUP", "BEGIN", "BETWEEN", "BY",
    "CASCADE", "CASE", "CHECK", "COLUMN", "COMMIT", "CONSTRAINT", "CREATE", "CROSS", "CURRENT",
    "DATABASE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXEC", "EXISTS",
    "FILE", "FOR", "FOREIGN", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "IDENTITY", "IN",
    "INDEX", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "NOT", "NULL", "OF",
    "ON", "OR", "ORDER", "OUTER", "PERCENT", "PRIMARY", "PROC", "PUBLIC", "REFERENCES", "RIGHT",
    "ROLLBACK", "ROWCOUNT", "SCHEMA", "SELECT", "SET", "TABLE", "THEN", "TO", "TOP",
    "TRANSACTION", "TRIGGER", "UNION", "UNIQUE", "UPDATE", "USER", "VALUES", "VIEW", "WHEN",
    "WHERE", "WITH",
];

pub static SQL_SERVER: Provider = Provider {
    name: "SqlServer",
    capabilities: CAPABILITIES,
    quotes: ('[', ']'),
    parameters: ParameterStyle::Named('@'),
    max_identifier_length: Some(128),
    reserved_words: RESERVED,
    lob_not_first: false,
    identity: IdentitySyntax::TypeSuffix("IDENTITY(1,1)"),
    row_version: Some("ROWVERSION"),
    boolean_literals: ("1", "0"),
    current_timestamp: "GETDATE()",
    explicit_null: true,
    add_column: "ADD",
    drop_column: "DROP COLUMN",
    constraints: ConstraintStyle::AlterTable,
    indexes: IndexStyle::DropOnTable,
    table_exists_query: "SELECT COUNT(*) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_NAME = @p1",
};
