//! SQL text for individual statements.
//!
//! Functions here only format; every name and type they receive has already
//! been validated by the scripter.

use crate::model::DefaultValue;
use crate::provider::{ConstraintStyle, IndexStyle, Provider};

pub(super) fn column_list(provider: &Provider, columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| provider.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn default_literal(provider: &Provider, value: &DefaultValue) -> String {
    match value {
        DefaultValue::Integer(v) => v.to_string(),
        DefaultValue::Boolean(v) => provider.boolean_literal(*v).to_string(),
        DefaultValue::Text(v) => format!("'{}'", v.replace('\'', "''")),
        DefaultValue::CurrentDateTime => provider.current_timestamp().to_string(),
        DefaultValue::Expression(v) => v.clone(),
    }
}

/// `CREATE TABLE` with one definition per line
pub(super) fn create_table(provider: &Provider, table: &str, definitions: &[String]) -> String {
    let body = definitions
        .iter()
        .map(|d| format!("    {d}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE TABLE {} (\n{}\n)",
        provider.quote_identifier(table),
        body
    )
}

pub(super) fn primary_key_constraint(provider: &Provider, name: &str, columns: &[String]) -> String {
    format!(
        "CONSTRAINT {} PRIMARY KEY ({})",
        provider.quote_identifier(name),
        column_list(provider, columns)
    )
}

pub(super) fn unique_constraint(provider: &Provider, name: &str, columns: &[String]) -> String {
    format!(
        "CONSTRAINT {} UNIQUE ({})",
        provider.quote_identifier(name),
        column_list(provider, columns)
    )
}

pub(super) fn create_index(
    provider: &Provider,
    table: &str,
    name: &str,
    columns: &[String],
    unique: bool,
) -> String {
    let unique = if unique { "UNIQUE " } else { "" };
    let name = provider.quote_identifier(name);
    let table = provider.quote_identifier(table);
    let columns = column_list(provider, columns);
    match provider.indexes {
        IndexStyle::ColumnsFirst => format!("CREATE {unique}INDEX {name} ({columns}) ON {table}"),
        IndexStyle::Standard | IndexStyle::DropOnTable => {
            format!("CREATE {unique}INDEX {name} ON {table} ({columns})")
        }
    }
}

pub(super) fn drop_index(provider: &Provider, table: &str, name: &str) -> String {
    match provider.indexes {
        IndexStyle::Standard => format!("DROP INDEX {}", provider.quote_identifier(name)),
        IndexStyle::DropOnTable | IndexStyle::ColumnsFirst => format!(
            "DROP INDEX {} ON {}",
            provider.quote_identifier(name),
            provider.quote_identifier(table)
        ),
    }
}

pub(super) fn add_column(provider: &Provider, table: &str, definition: &str) -> String {
    format!(
        "ALTER TABLE {} {} {definition}",
        provider.quote_identifier(table),
        provider.add_column
    )
}

pub(super) fn drop_column(provider: &Provider, table: &str, column: &str) -> String {
    format!(
        "ALTER TABLE {} {} {}",
        provider.quote_identifier(table),
        provider.drop_column,
        provider.quote_identifier(column)
    )
}

pub(super) fn add_unique_constraint(
    provider: &Provider,
    table: &str,
    name: &str,
    columns: &[String],
) -> String {
    match provider.constraints {
        ConstraintStyle::IndexOnly => create_index(provider, table, name, columns, true),
        ConstraintStyle::AlterTable | ConstraintStyle::MySql => format!(
            "ALTER TABLE {} ADD {}",
            provider.quote_identifier(table),
            unique_constraint(provider, name, columns)
        ),
    }
}

pub(super) fn drop_unique_constraint(provider: &Provider, table: &str, name: &str) -> String {
    match provider.constraints {
        ConstraintStyle::IndexOnly => format!("DROP INDEX {}", provider.quote_identifier(name)),
        ConstraintStyle::MySql => format!(
            "ALTER TABLE {} DROP INDEX {}",
            provider.quote_identifier(table),
            provider.quote_identifier(name)
        ),
        ConstraintStyle::AlterTable => drop_constraint(provider, table, name),
    }
}

pub(super) fn add_foreign_key(
    provider: &Provider,
    table: &str,
    name: &str,
    referenced_table: &str,
    pairs: &[(String, String)],
) -> String {
    let (columns, referenced): (Vec<String>, Vec<String>) = pairs.iter().cloned().unzip();
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        provider.quote_identifier(table),
        provider.quote_identifier(name),
        column_list(provider, &columns),
        provider.quote_identifier(referenced_table),
        column_list(provider, &referenced)
    )
}

pub(super) fn drop_foreign_key(provider: &Provider, table: &str, name: &str) -> String {
    match provider.constraints {
        ConstraintStyle::MySql => format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            provider.quote_identifier(table),
            provider.quote_identifier(name)
        ),
        ConstraintStyle::AlterTable | ConstraintStyle::IndexOnly => {
            drop_constraint(provider, table, name)
        }
    }
}

fn drop_constraint(provider: &Provider, table: &str, name: &str) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {}",
        provider.quote_identifier(table),
        provider.quote_identifier(name)
    )
}

pub(super) fn drop_table(provider: &Provider, table: &str) -> String {
    format!("DROP TABLE {}", provider.quote_identifier(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MYSQL, POSTGRESQL, SQLITE, SQL_SERVER, TERADATA};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_default_literals() {
        assert_eq!(default_literal(&POSTGRESQL, &DefaultValue::Boolean(true)), "TRUE");
        assert_eq!(default_literal(&SQL_SERVER, &DefaultValue::Boolean(true)), "1");
        assert_eq!(default_literal(&SQL_SERVER, &DefaultValue::Text("it's".into())), "'it''s'");
        assert_eq!(default_literal(&SQL_SERVER, &DefaultValue::CurrentDateTime), "GETDATE()");
    }

    #[test]
    fn test_index_layouts() {
        let c = cols(&["Name"]);
        assert_eq!(
            create_index(&POSTGRESQL, "W", "IX_W_Name", &c, false),
            "CREATE INDEX \"IX_W_Name\" ON \"W\" (\"Name\")"
        );
        assert_eq!(
            create_index(&TERADATA, "W", "IX_W_Name", &c, false),
            "CREATE INDEX \"IX_W_Name\" (\"Name\") ON \"W\""
        );
        assert_eq!(drop_index(&POSTGRESQL, "W", "IX"), "DROP INDEX \"IX\"");
        assert_eq!(drop_index(&SQL_SERVER, "W", "IX"), "DROP INDEX [IX] ON [W]");
    }

    #[test]
    fn test_constraint_styles() {
        let c = cols(&["A", "B"]);
        assert_eq!(
            add_unique_constraint(&SQLITE, "T", "UQ", &c),
            "CREATE UNIQUE INDEX \"UQ\" ON \"T\" (\"A\", \"B\")"
        );
        assert_eq!(
            add_unique_constraint(&POSTGRESQL, "T", "UQ", &c),
            "ALTER TABLE \"T\" ADD CONSTRAINT \"UQ\" UNIQUE (\"A\", \"B\")"
        );
        assert_eq!(drop_unique_constraint(&MYSQL, "T", "UQ"), "ALTER TABLE `T` DROP INDEX `UQ`");
        assert_eq!(
            drop_foreign_key(&MYSQL, "T", "FK"),
            "ALTER TABLE `T` DROP FOREIGN KEY `FK`"
        );
        assert_eq!(
            drop_foreign_key(&SQL_SERVER, "T", "FK"),
            "ALTER TABLE [T] DROP CONSTRAINT [FK]"
        );
    }

    #[test]
    fn test_foreign_key_pairs() {
        let pairs = vec![("CustomerId".to_string(), "Id".to_string())];
        assert_eq!(
            add_foreign_key(&POSTGRESQL, "Orders", "FK_Orders_Customers", "Customers", &pairs),
            "ALTER TABLE \"Orders\" ADD CONSTRAINT \"FK_Orders_Customers\" \
             FOREIGN KEY (\"CustomerId\") REFERENCES \"Customers\" (\"Id\")"
        );
    }

    #[test]
    fn test_create_table_layout() {
        let sql = create_table(&SQLITE, "T", &["\"A\" INTEGER".to_string(), "\"B\" TEXT".to_string()]);
        assert_eq!(sql, "CREATE TABLE \"T\" (\n    \"A\" INTEGER,\n    \"B\" TEXT\n)");
    }
}
