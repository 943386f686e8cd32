use super::{Capability, ConstraintStyle, IdentitySyntax, IndexStyle, ParameterStyle, Provider};
use crate::model::LogicalType as T;

const MAX_VARCHAR: u32 = 10_485_760;

static CAPABILITIES: &[Capability] = &[
    Capability::sized(T::AnsiString, "VARCHAR({size})", 1, MAX_VARCHAR),
    Capability::of(T::AnsiString, "TEXT").lob(),
    Capability::sized(T::AnsiStringFixedLength, "CHAR({size})", 1, MAX_VARCHAR),
    Capability::of(T::Binary, "BYTEA").lob(),
    Capability::of(T::Byte, "SMALLINT").warn("PostgreSQL has no one-byte integer; stored as SMALLINT"),
    Capability::of(T::Boolean, "BOOLEAN"),
    Capability::of(T::Date, "DATE"),
    Capability::of(T::DateTime, "TIMESTAMP"),
    Capability::of(T::DateTime2, "TIMESTAMP"),
    Capability::of(T::DateTimeOffset, "TIMESTAMPTZ")
        .warn("TIMESTAMPTZ normalizes to UTC; the original offset is not kept"),
    Capability::scaled(T::Decimal, "NUMERIC({size},{scale})", (1, 1000), (0, 1000)),
    Capability::sized(T::Decimal, "NUMERIC({size})", 1, 1000),
    Capability::of(T::Double, "DOUBLE PRECISION"),
    Capability::of(T::Guid, "UUID"),
    Capability::of(T::Int16, "SMALLINT").identity(),
    Capability::of(T::Int32, "INTEGER").identity(),
    Capability::of(T::Int64, "BIGINT").identity(),
    Capability::of(T::SByte, "SMALLINT").warn("PostgreSQL has no one-byte integer; stored as SMALLINT"),
    Capability::of(T::Single, "REAL"),
    Capability::sized(T::String, "VARCHAR({size})", 1, MAX_VARCHAR),
    Capability::of(T::String, "TEXT").lob(),
    Capability::sized(T::StringFixedLength, "CHAR({size})", 1, MAX_VARCHAR),
    Capability::of(T::Time, "TIME"),
    Capability::of(T::Xml, "XML").lob(),
];

static RESERVED: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC", "BOTH", "CASE",
    "CAST", "CHECK", "COLLATE", "COLUMN", "CONSTRAINT", "CREATE", "CURRENT_DATE", "CURRENT_ROLE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "DEFAULT", "DEFERRABLE", "DESC",
    "DISTINCT", "DO", "ELSE", "END", "EXCEPT", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "GRANT",
    "GROUP", "HAVING", "IN", "INITIALLY", "INTERSECT", "INTO", "LATERAL", "LEADING", "LIMIT",
    "LOCALTIME", "LOCALTIMESTAMP", "NOT", "NULL", "OFFSET", "ON", "ONLY", "OR", "ORDER",
    "PLACING", "PRIMARY", "REFERENCES", "RETURNING", "SELECT", "SESSION_USER", "SOME",
    "SYMMETRIC", "TABLE", "THEN", "TO", "TRAILING", "TRUE", "UNION", "UNIQUE", "USER", "USING",
    "VARIADIC", "WHEN", "WHERE", "WINDOW", "WITH",
];

pub static POSTGRESQL: Provider = Provider {
    name: "PostgreSQL",
    capabilities: CAPABILITIES,
    quotes: ('"', '"'),
    parameters: ParameterStyle::Dollar,
    max_identifier_length: Some(63),
    reserved_words: RESERVED,
    lob_not_first: false,
    identity: IdentitySyntax::TypeSuffix("GENERATED BY DEFAULT AS IDENTITY"),
    row_version: None,
    boolean_literals: ("TRUE", "FALSE"),
    current_timestamp: "CURRENT_TIMESTAMP",
    explicit_null: false,
    add_column: "ADD COLUMN",
    drop_column: "DROP COLUMN",
    constraints: ConstraintStyle::AlterTable,
    indexes: IndexStyle::Standard,
    table_exists_query: "SELECT COUNT(*) FROM information_schema.tables \
                         WHERE table_schema = current_schema() AND table_name::text = $1",
};
