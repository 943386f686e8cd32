//! Scripting properties that must hold for every registered provider.

use strata::model::{Database, IndexSpec, LogicalType};
use strata::provider::{Provider, ProviderRegistry, POSTGRESQL, SQL_SERVER};
use strata::scripter::{script, Command};

fn providers() -> Vec<&'static Provider> {
    ProviderRegistry::global().iter().collect()
}

fn widgets() -> Database {
    let mut db = Database::new();
    db.create_table("Widgets")
        .with_primary_key_column("Id", LogicalType::Int32)
        .as_identity()
        .with_not_nullable_column("Name", LogicalType::String)
        .of_size(50);
    db
}

/// Orders and Customers reference each other; Orders is declared first.
fn circular_model() -> Database {
    let mut db = Database::new();
    db.create_table("Orders")
        .with_primary_key_column("Id", LogicalType::Int32)
        .with_not_nullable_column("CustomerId", LogicalType::Int32);
    db.table("Orders")
        .add_foreign_key_to("Customers")
        .through("CustomerId", "Id");
    db.create_table("Customers")
        .with_primary_key_column("Id", LogicalType::Int32)
        .with_nullable_column("LastOrderId", LogicalType::Int32)
        .with_index(IndexSpec::on(&["LastOrderId"]));
    db.table("Customers")
        .add_foreign_key_to("Orders")
        .named("FK_Customers_LastOrder")
        .through("LastOrderId", "Id");
    db
}

#[test]
fn test_widgets_round_trip_on_every_provider() {
    for provider in providers() {
        let output = script(&widgets(), provider);
        assert!(output.errors.is_empty(), "{}: {:?}", provider.name(), output.errors);
        assert_eq!(output.commands.len(), 1, "{}", provider.name());

        let sql = output.commands[0].text().unwrap().to_string();
        let id = provider.quote_identifier("Id");
        let name = provider.quote_identifier("Name");
        let id_at = sql.find(&id).unwrap();
        let name_at = sql.find(&name).unwrap();
        assert!(id_at < name_at, "{}: columns out of order", provider.name());

        let id_line = sql.lines().find(|l| l.contains(&id)).unwrap();
        assert!(id_line.contains("PRIMARY KEY"), "{}: {id_line}", provider.name());
        assert!(
            id_line.contains("IDENTITY") || id_line.contains("AUTO")
                || id_line.contains("GENERATED"),
            "{}: {id_line}",
            provider.name()
        );
    }
}

#[test]
fn test_primary_keys_never_carry_not_null() {
    let mut db = Database::new();
    db.create_table("Lines")
        .with_primary_key_column("OrderId", LogicalType::Int32)
        .with_primary_key_column("LineNo", LogicalType::Int16)
        .with_not_nullable_column("Sku", LogicalType::AnsiString)
        .of_size(20);
    db.create_table("Tags")
        .with_primary_key_column("Code", LogicalType::AnsiString)
        .of_size(10);

    for provider in providers() {
        let output = script(&db, provider);
        assert!(output.errors.is_empty(), "{}: {:?}", provider.name(), output.errors);
        for text in output.sql() {
            for line in text.lines() {
                if line.contains("PRIMARY KEY") {
                    assert!(!line.contains("NOT NULL"), "{}: {line}", provider.name());
                }
            }
            let key_columns = ["OrderId", "LineNo", "Code"].map(|c| provider.quote_identifier(c));
            for line in text.lines() {
                let trimmed = line.trim_start();
                if key_columns.iter().any(|k| trimmed.starts_with(k.as_str())) {
                    assert!(!line.contains("NOT NULL"), "{}: {line}", provider.name());
                }
            }
        }
    }
}

#[test]
fn test_foreign_keys_follow_every_table_creation() {
    for provider in [&SQL_SERVER, &POSTGRESQL] {
        let output = script(&circular_model(), provider);
        assert!(output.errors.is_empty(), "{}: {:?}", provider.name(), output.errors);

        let texts = output.sql();
        let last_create = texts
            .iter()
            .rposition(|t| t.starts_with("CREATE TABLE"))
            .unwrap();
        let first_foreign_key = texts
            .iter()
            .position(|t| t.contains("FOREIGN KEY"))
            .unwrap();
        assert!(last_create < first_foreign_key, "{}: {texts:#?}", provider.name());
        assert_eq!(texts.iter().filter(|t| t.contains("FOREIGN KEY")).count(), 2);
    }
}

#[test]
fn test_scripting_twice_is_byte_identical() {
    for provider in providers() {
        let model = widgets();
        let first = script(&model, provider);
        let second = script(&model, provider);
        assert_eq!(first.sql(), second.sql(), "{}", provider.name());
    }
}

#[test]
fn test_unsupported_type_yields_no_commands() {
    let mut db = widgets();
    db.create_table("Documents")
        .with_primary_key_column("Id", LogicalType::Int32)
        .with_nullable_column("Body", LogicalType::Xml);

    for provider in providers() {
        if provider.supports(LogicalType::Xml) {
            continue;
        }
        let output = script(&db, provider);
        assert!(output.commands.is_empty(), "{}", provider.name());
        let error = output
            .errors
            .iter()
            .find(|e| e.column.as_deref() == Some("Body"))
            .unwrap();
        assert_eq!(error.table, "Documents");
    }
}

#[test]
fn test_deferred_raw_commands_are_not_rendered() {
    let mut db = widgets();
    db.execute(|_| Ok(()));
    let output = script(&db, &POSTGRESQL);
    assert_eq!(output.commands.len(), 2);
    assert!(matches!(output.commands[1], Command::Deferred(_)));
}
