use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR2({size})", 1, 4000),
    Capability::of(T::AnsiString, "CLOB").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size})", 1, 2000),
    Capability::sized(T::Binary, "RAW({size})", 1, 2000),
    Capability::of(T::Binary, "BLOB").lob(),
    Capability::of(T::Byte, "NUMBER(3)").identity(),
    Capability::of(T::Boolean, "NUMBER(1)"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "DATE"),
    Capability::of(T::DateTime2, "TIMESTAMP"),
    Capability::of(T::DateTimeOffset, "TIMESTAMP WITH TIME ZONE"),
    Capability::scaled(T::Decimal, "NUMBER({size},{scale})", (1, 38), (0, 127)).identity(),
    Capability::sized(T::Decimal, "NUMBER({size})", 1, 38).identity(),
    Capability::of(T::Double, "BINARY_DOUBLE"),
    Capability::of(T::Guid, "RAW(16)"),
    Capability::of(T::Int16, "NUMBER(5)").identity(),
    Capability::of(T::Int32, "NUMBER(10)").identity(),
    Capability::of(T::Int64, "NUMBER(19)").identity(),
    Capability::of(T::SByte, "NUMBER(3)").identity(),
    Capability::of(T::Single, "BINARY_FLOAT"),
    Capability::sized(T::String, "NVARCHAR2({size})", 1, 2000),
    Capability::of(T::String, "NCLOB").lob(),
    Capability::sized(T::StringFixedLength, "NCHAR({size})", 1, 1000),
    Capability::of(T::Xml, "XMLTYPE").lob(),
];

static RESERVED: &[&str] = &[
    "ACCESS", "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUDIT", "BETWEEN", "BY", "CHAR",
    "CHECK", "CLUSTER", "COLUMN", "COMMENT", "COMPRESS", "CONNECT", "CREATE", "CURRENT", "DATE",
    "DECIMAL", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "EXCLUSIVE", "EXISTS",
    "FILE", "FLOAT", "FOR", "FROM", "GRANT", "GROUP", "HAVING", "IDENTIFIED", "IMMEDIATE", "IN",
    "INCREMENT", "INDEX", "INITIAL", "INSERT", "INTEGER", "INTERSECT", "INTO", "IS", "LEVEL",
    "LIKE", "LOCK", "LONG", "MINUS", "MODE", "MODIFY", "NOT", "NUMBER", "NULL", "OF", "ON",
    "OPTION", "OR", "ORDER", "PRIOR", "PUBLIC", "RAW", "RENAME", "RESOURCE", "ROW", "ROWID",
    "ROWNUM", "ROWS", "SELECT", "SESSION", "SET", "SIZE", "START", "SYNONYM", "SYSDATE", "TABLE",
    "THEN", "TO", "TRIGGER", "UID", "UNION", "UNIQUE", "UPDATE", "USER", "VALUES", "VARCHAR",
    "VARCHAR2", "VIEW", "WHERE", "WITH",
];

pub static ORACLE: Provider = Provider {
    name: "Oracle",
    capabilities: CAPABILITIES,
    quotes: ('"', '"'),
    parameters: ParameterStyle::Named(':'),
    max_identifier_length: Some(30),
    reserved_words: RESERVED,
    lob_not_first: false,
    identity: IdentitySyntax::TypeSuffix("GENERATED BY DEFAULT AS IDENTITY"),
    row_version: None,
    boolean_literals: ("1", "0"),
    current_timestamp: "SYSTIMESTAMP",
    explicit_null: true,
    add_column: "ADD",
    drop_column: "DROP COLUMN",
    constraints: ConstraintStyle::AlterTable,
    indexes: IndexStyle::Standard,
    table_exists_query: "SELECT COUNT(*) FROM user_tables WHERE table_name = :p1",
};
