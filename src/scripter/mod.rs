//! Command scripter: renders a [`Database`] model into ordered commands for
//! one [`Provider`].
//!
//! Scripting is a pure function of the model and the provider. Every problem
//! in the model is collected instead of stopping at the first; when any
//! [`ValidationError`] is found no commands are returned at all, so nothing
//! is ever executed for a model that cannot be fully scripted.
//!
//! Ordering:
//!
//! - operations are scripted in declaration order;
//! - a created table's non-unique indexes follow its `CREATE TABLE`;
//! - every added foreign key is deferred to the very end, so forward and
//!   circular references need no table sorting.
//!
//! ```rust
//! use strata::model::{Database, LogicalType};
//! use strata::provider::SQL_SERVER;
//! use strata::scripter::script;
//!
//! let mut db = Database::new();
//! db.create_table("Widgets")
//!     .with_primary_key_column("Id", LogicalType::Int32)
//!     .as_identity()
//!     .with_not_nullable_column("Name", LogicalType::String)
//!     .of_size(50);
//!
//! let output = script(&db, &SQL_SERVER);
//! assert!(output.errors.is_empty());
//! assert_eq!(
//!     output.sql(),
//!     vec!["CREATE TABLE [Widgets] (\n    [Id] INT IDENTITY(1,1) PRIMARY KEY,\n    [Name] NVARCHAR(50) NOT NULL\n)"]
//! );
//! ```

mod render;
mod validation;

pub use validation::{ScriptWarning, ValidationError, ValidationErrorKind};

use crate::model::{
    ColumnKind, ColumnSpec, Database, ForeignKeySpec, IndexSpec, Operation, RawCallback,
    RawCommand, TableSpec, UniqueConstraint, UniqueConstraintSpec,
};
use crate::provider::{ConstraintStyle, IdentitySyntax, Provider, ResolveError};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A statement with the table and column it was generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlCommand {
    pub text: String,
    pub table: Option<String>,
    pub column: Option<String>,
}

/// One executable unit of a script
#[derive(Clone)]
pub enum Command {
    Sql(SqlCommand),
    /// Raw callback, resolved against the live transaction at execution time
    Deferred(RawCallback),
}

impl Command {
    /// SQL text, or `None` for deferred commands
    pub fn text(&self) -> Option<&str> {
        match self {
            Command::Sql(cmd) => Some(&cmd.text),
            Command::Deferred(_) => None,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Sql(cmd) => f.debug_tuple("Sql").field(&cmd.text).finish(),
            Command::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Sql(cmd) => f.write_str(&cmd.text),
            Command::Deferred(_) => f.write_str("<deferred raw command>"),
        }
    }
}

/// Result of scripting a model
#[derive(Debug, Clone, Default)]
pub struct ScriptOutput {
    /// Empty whenever `errors` is not
    pub commands: Vec<Command>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ScriptWarning>,
}

impl ScriptOutput {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Text of every non-deferred command, in order
    pub fn sql(&self) -> Vec<&str> {
        self.commands.iter().filter_map(Command::text).collect()
    }
}

/// Script `database` for `provider`
pub fn script(database: &Database, provider: &Provider) -> ScriptOutput {
    let mut session = Session {
        provider,
        commands: Vec::new(),
        foreign_keys: Vec::new(),
        tables: HashMap::new(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    for operation in database.operations() {
        session.operation(operation);
    }

    let Session {
        mut commands,
        foreign_keys,
        errors,
        warnings,
        ..
    } = session;

    for warning in &warnings {
        log::warn!("{provider}: {warning}");
    }

    if errors.is_empty() {
        commands.extend(foreign_keys);
    } else {
        commands.clear();
    }

    ScriptOutput {
        commands,
        errors,
        warnings,
    }
}

/// A column definition ready for `CREATE TABLE` or `ADD COLUMN`
struct ColumnDefinition {
    text: String,
    large_object: bool,
}

/// Columns a table is known to have at this point of the script
#[derive(Default)]
struct KnownColumns {
    names: HashSet<String>,
    identity: Option<String>,
}

struct Session<'p> {
    provider: &'p Provider,
    commands: Vec<Command>,
    foreign_keys: Vec<Command>,
    tables: HashMap<String, KnownColumns>,
    errors: Vec<ValidationError>,
    warnings: Vec<ScriptWarning>,
}

impl Session<'_> {
    fn error(&mut self, table: &str, column: Option<&str>, kind: ValidationErrorKind) {
        self.errors.push(ValidationError {
            table: table.to_string(),
            column: column.map(str::to_string),
            kind,
        });
    }

    fn warn(&mut self, table: &str, column: Option<&str>, message: impl Into<String>) {
        self.warnings.push(ScriptWarning {
            table: table.to_string(),
            column: column.map(str::to_string),
            message: message.into(),
        });
    }

    fn sql(&mut self, text: String, table: &str, column: Option<&str>) {
        self.commands.push(Command::Sql(SqlCommand {
            text,
            table: Some(table.to_string()),
            column: column.map(str::to_string),
        }));
    }

    /// Length and reserved-word checks for a name the script will emit
    fn identifier(&mut self, identifier: &str, table: &str, column: Option<&str>) {
        if let Some(max) = self.provider.max_identifier_length() {
            if identifier.chars().count() > max {
                self.error(
                    table,
                    column,
                    ValidationErrorKind::IdentifierTooLong {
                        identifier: identifier.to_string(),
                        max,
                    },
                );
            }
        }
        if self.provider.is_reserved(identifier) {
            self.warn(
                table,
                column,
                format!("'{identifier}' is a reserved word and is always quoted"),
            );
        }
    }

    fn operation(&mut self, operation: &Operation) {
        let provider = self.provider;
        match operation {
            Operation::CreateTable(table) => self.create_table(table),
            Operation::AddColumn { table, column } => self.add_column(table, column),
            Operation::AddIndex { table, index } => self.add_index(table, index),
            Operation::AddUniqueConstraint { table, constraint } => {
                self.add_unique_constraint(table, constraint)
            }
            Operation::AddForeignKey(foreign_key) => self.add_foreign_key(foreign_key),
            Operation::ExecuteRaw(RawCommand::Sql(text)) => {
                self.commands.push(Command::Sql(SqlCommand {
                    text: text.clone(),
                    table: None,
                    column: None,
                }));
            }
            Operation::ExecuteRaw(RawCommand::Callback(callback)) => {
                self.commands.push(Command::Deferred(callback.clone()));
            }
            Operation::DropTable { table } => {
                self.tables.remove(table);
                self.sql(render::drop_table(provider, table), table, None);
            }
            Operation::DropColumn { table, column } => {
                if let Some(known) = self.tables.get_mut(table) {
                    known.names.remove(column);
                    if known.identity.as_deref() == Some(column.as_str()) {
                        known.identity = None;
                    }
                }
                self.sql(render::drop_column(provider, table, column), table, Some(column));
            }
            Operation::DropIndex { table, name } => {
                self.sql(render::drop_index(provider, table, name), table, None);
            }
            Operation::DropUniqueConstraint { table, name } => {
                self.sql(render::drop_unique_constraint(provider, table, name), table, None);
            }
            Operation::DropForeignKey { table, name } => {
                if provider.constraints == ConstraintStyle::IndexOnly {
                    self.error(
                        table,
                        None,
                        ValidationErrorKind::UnsupportedOperation(format!(
                            "dropping foreign key '{name}'"
                        )),
                    );
                } else {
                    self.sql(render::drop_foreign_key(provider, table, name), table, None);
                }
            }
        }
    }

    fn create_table(&mut self, table: &TableSpec) {
        let provider = self.provider;
        let name = table.name.as_str();
        self.identifier(name, name, None);

        if table.columns.is_empty() {
            self.error(name, None, ValidationErrorKind::NoColumns);
        }

        let mut known = KnownColumns::default();
        for column in &table.columns {
            if !known.names.insert(column.name.clone()) {
                self.error(name, Some(&column.name), ValidationErrorKind::DuplicateColumn);
            }
            if column.identity {
                if known.identity.is_some() {
                    self.error(name, Some(&column.name), ValidationErrorKind::MultipleIdentity);
                } else {
                    known.identity = Some(column.name.clone());
                }
            }
        }
        self.tables.insert(name.to_string(), known);

        let primary_key: Vec<String> = table
            .primary_key_columns()
            .map(|c| c.name.clone())
            .collect();
        let inline_key = primary_key.len() == 1;

        let mut definitions = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            if let Some(definition) = self.column_definition(name, column, inline_key) {
                definitions.push(definition);
            }
        }
        if provider.lob_not_first() {
            // stable: relative order within each group is preserved
            definitions.sort_by_key(|d| d.large_object);
        }
        let mut lines: Vec<String> = definitions.into_iter().map(|d| d.text).collect();

        if primary_key.len() > 1 {
            let constraint = format!("PK_{name}");
            self.identifier(&constraint, name, None);
            lines.push(render::primary_key_constraint(provider, &constraint, &primary_key));
        }

        for (constraint, columns) in self.unique_constraints(table) {
            lines.push(render::unique_constraint(provider, &constraint, &columns));
        }

        self.sql(render::create_table(provider, name, &lines), name, None);

        for index in table.indexes.iter().filter(|i| !i.unique) {
            if let Some((index_name, columns)) = self.index_target(name, index, Some(table)) {
                self.sql(
                    render::create_index(provider, name, &index_name, &columns, false),
                    name,
                    None,
                );
            }
        }
    }

    /// Inline unique constraints of a created table: column-level ones first
    /// (named groups in order of first use), then unique indexes
    fn unique_constraints(&mut self, table: &TableSpec) -> Vec<(String, Vec<String>)> {
        let name = table.name.as_str();
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();

        for column in &table.columns {
            match &column.unique {
                None => {}
                Some(UniqueConstraint::Anonymous) => {
                    groups.push((format!("UQ_{name}_{}", column.name), vec![column.name.clone()]));
                }
                Some(UniqueConstraint::Named(constraint)) => {
                    match groups.iter_mut().find(|(n, _)| n == constraint) {
                        Some((_, columns)) => columns.push(column.name.clone()),
                        None => groups.push((constraint.clone(), vec![column.name.clone()])),
                    }
                }
            }
        }

        for index in table.indexes.iter().filter(|i| i.unique) {
            if let Some(target) = self.index_target(name, index, Some(table)) {
                groups.push(target);
            }
        }

        for (constraint, _) in &groups {
            self.identifier(constraint, name, None);
        }
        groups
    }

    /// Validated name and columns of an index; derives the name when allowed
    fn index_target(
        &mut self,
        table: &str,
        index: &IndexSpec,
        created: Option<&TableSpec>,
    ) -> Option<(String, Vec<String>)> {
        if index.columns.is_empty() {
            self.error(table, None, ValidationErrorKind::InvalidIndex("no columns".to_string()));
            return None;
        }
        if let Some(spec) = created {
            for column in &index.columns {
                if !spec.columns.iter().any(|c| &c.name == column) {
                    self.error(
                        table,
                        Some(column),
                        ValidationErrorKind::InvalidIndex(format!("unknown column '{column}'")),
                    );
                    return None;
                }
            }
        }
        let name = match &index.name {
            Some(name) => name.clone(),
            None if index.unique && index.columns.len() > 1 => {
                self.error(table, None, ValidationErrorKind::UniqueNameRequired);
                return None;
            }
            None => {
                let prefix = if index.unique { "UQ" } else { "IX" };
                format!("{prefix}_{table}_{}", index.columns.join("_"))
            }
        };
        self.identifier(&name, table, None);
        Some((name, index.columns.clone()))
    }

    fn column_definition(
        &mut self,
        table: &str,
        column: &ColumnSpec,
        inline_key: bool,
    ) -> Option<ColumnDefinition> {
        let provider = self.provider;
        let name = column.name.as_str();
        self.identifier(name, table, Some(name));
        let quoted = provider.quote_identifier(name);

        if column.kind == ColumnKind::RowVersion {
            if column.identity || column.unique.is_some() || column.default.is_some() {
                self.error(table, Some(name), ValidationErrorKind::RowVersionConflict);
            }
            return match provider.row_version {
                Some(native) => Some(ColumnDefinition {
                    text: format!("{quoted} {native}"),
                    large_object: false,
                }),
                None => {
                    self.error(table, Some(name), ValidationErrorKind::RowVersionUnsupported);
                    None
                }
            };
        }

        let Some(logical_type) = column.logical_type else {
            self.error(table, Some(name), ValidationErrorKind::MissingType);
            return None;
        };

        let resolved = match provider.resolve(logical_type, column.size, column.scale) {
            Ok(resolved) => resolved,
            Err(e) => {
                let kind = match e {
                    ResolveError::Unsupported => ValidationErrorKind::UnsupportedType(logical_type),
                    ResolveError::SizeRequired => ValidationErrorKind::SizeRequired(logical_type),
                    ResolveError::SizeNotAllowed => {
                        ValidationErrorKind::SizeNotAllowed(logical_type)
                    }
                    ResolveError::ScaleNotAllowed => {
                        ValidationErrorKind::ScaleNotAllowed(logical_type)
                    }
                    ResolveError::SizeOutOfRange { size, min, max } => {
                        ValidationErrorKind::SizeOutOfRange { size, min, max }
                    }
                    ResolveError::ScaleOutOfRange { scale, min, max } => {
                        ValidationErrorKind::ScaleOutOfRange { scale, min, max }
                    }
                };
                self.error(table, Some(name), kind);
                return None;
            }
        };
        let capability = resolved.capability;
        if let Some(warning) = capability.warning {
            self.warn(table, Some(name), warning);
        }

        let primary_key = column.is_primary_key();
        if primary_key && !capability.primary_key {
            self.error(
                table,
                Some(name),
                ValidationErrorKind::PrimaryKeyNotSupported(logical_type),
            );
        }

        let mut text = format!("{quoted} {}", resolved.native);
        let mut identity_after_key = None;
        if column.identity {
            if !capability.identity {
                self.error(
                    table,
                    Some(name),
                    ValidationErrorKind::IdentityNotSupported(logical_type),
                );
            }
            match provider.identity {
                IdentitySyntax::TypeSuffix(clause) => {
                    text.push(' ');
                    text.push_str(clause);
                }
                IdentitySyntax::AfterPrimaryKey(keyword) => {
                    if primary_key && inline_key {
                        identity_after_key = Some(keyword);
                    } else {
                        self.error(table, Some(name), ValidationErrorKind::IdentityPlacement);
                    }
                }
            }
        }

        if let Some(default) = &column.default {
            text.push_str(" DEFAULT ");
            text.push_str(&render::default_literal(provider, default));
        }

        if primary_key {
            if inline_key {
                text.push_str(" PRIMARY KEY");
                if let Some(keyword) = identity_after_key {
                    text.push(' ');
                    text.push_str(keyword);
                }
            }
        } else if column.is_nullable() {
            if provider.explicit_null {
                text.push_str(" NULL");
            }
        } else {
            text.push_str(" NOT NULL");
        }

        Some(ColumnDefinition {
            text,
            large_object: capability.large_object,
        })
    }

    fn add_column(&mut self, table: &str, column: &ColumnSpec) {
        let provider = self.provider;
        self.identifier(table, table, None);

        let known = self.tables.entry(table.to_string()).or_default();
        let duplicate = !known.names.insert(column.name.clone());
        let second_identity = column.identity && known.identity.is_some();
        if column.identity && known.identity.is_none() {
            known.identity = Some(column.name.clone());
        }
        if duplicate {
            self.error(table, Some(&column.name), ValidationErrorKind::DuplicateColumn);
        }
        if second_identity {
            self.error(table, Some(&column.name), ValidationErrorKind::MultipleIdentity);
        }

        if column.identity {
            if let IdentitySyntax::AfterPrimaryKey(_) = provider.identity {
                self.error(table, Some(&column.name), ValidationErrorKind::IdentityPlacement);
                return;
            }
        }
        if let Some(definition) = self.column_definition(table, column, false) {
            self.sql(
                render::add_column(provider, table, &definition.text),
                table,
                Some(&column.name),
            );
        }
    }

    fn add_index(&mut self, table: &str, index: &IndexSpec) {
        let provider = self.provider;
        if let Some((name, columns)) = self.index_target(table, index, None) {
            self.sql(
                render::create_index(provider, table, &name, &columns, index.unique),
                table,
                None,
            );
        }
    }

    fn add_unique_constraint(&mut self, table: &str, constraint: &UniqueConstraintSpec) {
        let provider = self.provider;
        let index = IndexSpec {
            name: constraint.name.clone(),
            columns: constraint.columns.clone(),
            unique: true,
        };
        if let Some((name, columns)) = self.index_target(table, &index, None) {
            self.sql(
                render::add_unique_constraint(provider, table, &name, &columns),
                table,
                None,
            );
        }
    }

    fn add_foreign_key(&mut self, foreign_key: &ForeignKeySpec) {
        let provider = self.provider;
        let table = foreign_key.table.as_str();

        if provider.constraints == ConstraintStyle::IndexOnly {
            self.error(
                table,
                None,
                ValidationErrorKind::UnsupportedOperation(format!(
                    "adding a foreign key to '{}'",
                    foreign_key.referenced_table
                )),
            );
            return;
        }
        if foreign_key.columns.is_empty() {
            self.error(
                table,
                None,
                ValidationErrorKind::InvalidForeignKey("no column pairs".to_string()),
            );
            return;
        }
        if let Some((column, _)) = foreign_key
            .columns
            .iter()
            .find(|(c, r)| c.is_empty() || r.is_empty())
        {
            self.error(
                table,
                Some(column),
                ValidationErrorKind::InvalidForeignKey("column names cannot be empty".to_string()),
            );
            return;
        }

        let name = foreign_key
            .name
            .clone()
            .unwrap_or_else(|| format!("FK_{table}_{}", foreign_key.referenced_table));
        self.identifier(&name, table, None);

        self.foreign_keys.push(Command::Sql(SqlCommand {
            text: render::add_foreign_key(
                provider,
                table,
                &name,
                &foreign_key.referenced_table,
                &foreign_key.columns,
            ),
            table: Some(table.to_string()),
            column: None,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndexSpec, LogicalType};
    use crate::provider::{MYSQL, ORACLE, POSTGRESQL, SQLITE, SQL_SERVER, TERADATA};

    fn widgets() -> Database {
        let mut db = Database::new();
        db.create_table("Widgets")
            .with_primary_key_column("Id", LogicalType::Int32)
            .as_identity()
            .with_not_nullable_column("Name", LogicalType::String)
            .of_size(50);
        db
    }

    #[test]
    fn test_widgets_on_postgres() {
        let output = script(&widgets(), &POSTGRESQL);
        assert!(output.is_valid(), "{:?}", output.errors);
        assert_eq!(
            output.sql(),
            vec![
                "CREATE TABLE \"Widgets\" (\n    \"Id\" INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,\n    \"Name\" VARCHAR(50) NOT NULL\n)"
            ]
        );
    }

    #[test]
    fn test_widgets_on_sqlite_uses_autoincrement() {
        let output = script(&widgets(), &SQLITE);
        assert_eq!(
            output.sql()[0],
            "CREATE TABLE \"Widgets\" (\n    \"Id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \"Name\" VARCHAR(50) NOT NULL\n)"
        );
    }

    #[test]
    fn test_sqlite_identity_requires_single_key() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("A", LogicalType::Int32)
            .with_primary_key_column("B", LogicalType::Int32)
            .as_identity();
        let output = script(&db, &SQLITE);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::IdentityPlacement);
        assert!(output.commands.is_empty());
    }

    #[test]
    fn test_composite_key_is_table_constraint() {
        let mut db = Database::new();
        db.create_table("Lines")
            .with_primary_key_column("OrderId", LogicalType::Int64)
            .with_primary_key_column("LineNo", LogicalType::Int16)
            .with_nullable_column("Note", LogicalType::String)
            .of_size(200);
        let sql = script(&db, &SQL_SERVER).sql()[0].to_string();
        assert!(sql.contains("[OrderId] BIGINT,"));
        assert!(sql.contains("[Note] NVARCHAR(200) NULL,"));
        assert!(sql.contains("CONSTRAINT [PK_Lines] PRIMARY KEY ([OrderId], [LineNo])"));
        assert!(!sql.contains("NOT NULL"));
    }

    #[test]
    fn test_unique_constraints_are_inline() {
        let mut db = Database::new();
        db.create_table("Accounts")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_not_nullable_column("Email", LogicalType::String)
            .of_size(100)
            .unique()
            .with_not_nullable_column("Tenant", LogicalType::Int32)
            .unique_named("UQ_Accounts_Login")
            .with_not_nullable_column("Login", LogicalType::String)
            .of_size(40)
            .unique_named("UQ_Accounts_Login")
            .with_index(IndexSpec::on(&["Tenant"]).unique().named("UQ_Tenant"));

        let output = script(&db, &POSTGRESQL);
        assert_eq!(output.commands.len(), 1);
        let sql = output.sql()[0];
        assert!(sql.contains("CONSTRAINT \"UQ_Accounts_Email\" UNIQUE (\"Email\")"));
        assert!(sql.contains("CONSTRAINT \"UQ_Accounts_Login\" UNIQUE (\"Tenant\", \"Login\")"));
        assert!(sql.contains("CONSTRAINT \"UQ_Tenant\" UNIQUE (\"Tenant\")"));
    }

    #[test]
    fn test_secondary_indexes_follow_create() {
        let mut db = Database::new();
        db.create_table("Orders")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_nullable_column("Placed", LogicalType::DateTime)
            .with_nullable_column("Region", LogicalType::String)
            .of_size(8)
            .with_index(IndexSpec::on(&["Placed"]))
            .with_index(IndexSpec::on(&["Region", "Placed"]).named("IX_Region"));
        db.create_table("Other")
            .with_primary_key_column("Id", LogicalType::Int32);

        let output = script(&db, &POSTGRESQL);
        let sql = output.sql();
        assert_eq!(sql.len(), 4);
        assert!(sql[0].starts_with("CREATE TABLE \"Orders\""));
        assert_eq!(sql[1], "CREATE INDEX \"IX_Orders_Placed\" ON \"Orders\" (\"Placed\")");
        assert_eq!(sql[2], "CREATE INDEX \"IX_Region\" ON \"Orders\" (\"Region\", \"Placed\")");
        assert!(sql[3].starts_with("CREATE TABLE \"Other\""));
    }

    #[test]
    fn test_unnamed_multi_column_unique_index_is_rejected() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("A", LogicalType::Int32)
            .with_not_nullable_column("B", LogicalType::Int32)
            .with_index(IndexSpec::on(&["A", "B"]).unique());
        let output = script(&db, &POSTGRESQL);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::UniqueNameRequired);
    }

    #[test]
    fn test_foreign_keys_are_deferred_to_the_end() {
        let mut db = Database::new();
        db.table("Orders")
            .add_foreign_key_to("Customers")
            .through("CustomerId", "Id");
        db.create_table("Customers")
            .with_primary_key_column("Id", LogicalType::Int32);
        db.create_table("Orders")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_not_nullable_column("CustomerId", LogicalType::Int32);

        let output = script(&db, &SQL_SERVER);
        let sql = output.sql();
        assert_eq!(sql.len(), 3);
        assert!(sql[0].starts_with("CREATE TABLE [Customers]"));
        assert!(sql[1].starts_with("CREATE TABLE [Orders]"));
        assert_eq!(
            sql[2],
            "ALTER TABLE [Orders] ADD CONSTRAINT [FK_Orders_Customers] FOREIGN KEY ([CustomerId]) REFERENCES [Customers] ([Id])"
        );
    }

    #[test]
    fn test_foreign_keys_unsupported_on_sqlite() {
        let mut db = Database::new();
        db.table("Orders")
            .add_foreign_key_to("Customers")
            .through("CustomerId", "Id");
        let output = script(&db, &SQLITE);
        assert!(matches!(
            output.errors[0].kind,
            ValidationErrorKind::UnsupportedOperation(_)
        ));
    }

    #[test]
    fn test_foreign_key_without_pairs_is_invalid() {
        let mut db = Database::new();
        db.table("Orders").add_foreign_key_to("Customers");
        let output = script(&db, &POSTGRESQL);
        assert!(matches!(
            output.errors[0].kind,
            ValidationErrorKind::InvalidForeignKey(_)
        ));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .as_identity()
            .with_nullable_column("Id", LogicalType::Int32)
            .with_nullable_column("Doc", LogicalType::Xml)
            .with_nullable_column("Code", LogicalType::String)
            .of_size(20_000)
            .with_nullable_column("Seq", LogicalType::Int64)
            .as_identity();

        let output = script(&db, &MYSQL);
        let kinds: Vec<_> = output.errors.iter().map(|e| &e.kind).collect();
        assert!(kinds.contains(&&ValidationErrorKind::DuplicateColumn));
        assert!(kinds.contains(&&ValidationErrorKind::UnsupportedType(LogicalType::Xml)));
        assert!(kinds.contains(&&ValidationErrorKind::SizeOutOfRange {
            size: 20_000,
            min: 1,
            max: 16_383
        }));
        assert!(kinds.contains(&&ValidationErrorKind::MultipleIdentity));
        assert!(output.commands.is_empty());
    }

    #[test]
    fn test_added_identity_conflicts_with_created_identity() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .as_identity();
        db.table("T")
            .add_not_nullable_column("Seq", LogicalType::Int64)
            .as_identity();

        let output = script(&db, &POSTGRESQL);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::MultipleIdentity);
        assert_eq!(output.errors[0].column.as_deref(), Some("Seq"));
        assert!(output.commands.is_empty());
    }

    #[test]
    fn test_two_added_identity_columns_conflict() {
        let mut db = Database::new();
        db.table("T")
            .add_not_nullable_column("A", LogicalType::Int64)
            .as_identity();
        db.table("T")
            .add_not_nullable_column("B", LogicalType::Int64)
            .as_identity();

        let output = script(&db, &SQL_SERVER);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::MultipleIdentity);
        assert_eq!(output.errors[0].column.as_deref(), Some("B"));
    }

    #[test]
    fn test_added_column_duplicates_created_column() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_nullable_column("Name", LogicalType::String)
            .of_size(20);
        db.table("T")
            .add_nullable_column("Name", LogicalType::String)
            .of_size(10);

        let output = script(&db, &POSTGRESQL);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::DuplicateColumn);
        assert_eq!(output.errors[0].column.as_deref(), Some("Name"));
        assert!(output.commands.is_empty());
    }

    #[test]
    fn test_dropped_columns_can_be_added_again() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_nullable_column("Seq", LogicalType::Int64)
            .as_identity();
        db.table("T").drop_column("Seq");
        db.table("T")
            .add_not_nullable_column("Seq", LogicalType::Int64)
            .as_identity();
        db.table("U").drop();
        db.table("T").drop();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .as_identity();

        let output = script(&db, &POSTGRESQL);
        assert!(output.is_valid(), "{:?}", output.errors);
        assert_eq!(output.commands.len(), 6);
    }

    #[test]
    fn test_identity_on_non_integral_type() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Decimal)
            .of_size(10)
            .as_identity();
        let output = script(&db, &POSTGRESQL);
        assert_eq!(
            output.errors[0].kind,
            ValidationErrorKind::IdentityNotSupported(LogicalType::Decimal)
        );
        assert!(script(&db, &SQL_SERVER).is_valid());
    }

    #[test]
    fn test_row_version_support() {
        let mut db = Database::new();
        db.create_table("T")
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_row_version_column("Version");

        let sql = script(&db, &SQL_SERVER).sql()[0].to_string();
        assert!(sql.contains("[Version] ROWVERSION"));

        let output = script(&db, &POSTGRESQL);
        assert_eq!(output.errors[0].kind, ValidationErrorKind::RowVersionUnsupported);
        assert_eq!(output.errors[0].column.as_deref(), Some("Version"));
    }

    #[test]
    fn test_lob_columns_move_last_only_when_required() {
        let mut db = Database::new();
        db.create_table("Docs")
            .with_nullable_column("Body", LogicalType::String)
            .with_primary_key_column("Id", LogicalType::Int32)
            .with_nullable_column("Title", LogicalType::String)
            .of_size(10);

        let teradata = script(&db, &TERADATA).sql()[0].to_string();
        let body = teradata.find("\"Body\"").unwrap_or_default();
        let id = teradata.find("\"Id\"").unwrap_or_default();
        let title = teradata.find("\"Title\"").unwrap_or_default();
        assert!(id < title && title < body, "{teradata}");

        let postgres = script(&db, &POSTGRESQL).sql()[0].to_string();
        assert!(postgres.find("\"Body\"") < postgres.find("\"Id\""));
    }

    #[test]
    fn test_identifier_length_limit() {
        let mut db = Database::new();
        db.create_table("ThisTableNameIsFarTooLongForOracle")
            .with_primary_key_column("Id", LogicalType::Int32);
        let output = script(&db, &ORACLE);
        assert!(matches!(
            output.errors[0].kind,
            ValidationErrorKind::IdentifierTooLong { max: 30, .. }
        ));
        assert!(script(&db, &POSTGRESQL).is_valid());
    }

    #[test]
    fn test_reserved_words_warn_but_script() {
        let mut db = Database::new();
        db.create_table("Order")
            .with_primary_key_column("Id", LogicalType::Int32);
        let output = script(&db, &SQL_SERVER);
        assert!(output.is_valid());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.sql()[0].lines().next(), Some("CREATE TABLE [Order] ("));
    }

    #[test]
    fn test_capability_warning_is_reported() {
        let mut db = Database::new();
        db.table("T").add_nullable_column("Key", LogicalType::Guid);
        let output = script(&db, &MYSQL);
        assert!(output.is_valid());
        assert!(output.warnings.iter().any(|w| w.message.contains("CHAR(36)")));
    }

    #[test]
    fn test_add_and_drop_operations() {
        let mut db = Database::new();
        db.table("Widgets")
            .add_not_nullable_column("Price", LogicalType::Decimal)
            .of_size_and_scale(10, 2)
            .having_default(0);
        db.table("Widgets")
            .add_unique_constraint(UniqueConstraintSpec::on(&["Price"]))
            .drop_unique_constraint("UQ_Widgets_Price")
            .drop_column("Price")
            .drop();

        let output = script(&db, &POSTGRESQL);
        assert_eq!(
            output.sql(),
            vec![
                "ALTER TABLE \"Widgets\" ADD COLUMN \"Price\" NUMERIC(10,2) DEFAULT 0 NOT NULL",
                "ALTER TABLE \"Widgets\" ADD CONSTRAINT \"UQ_Widgets_Price\" UNIQUE (\"Price\")",
                "ALTER TABLE \"Widgets\" DROP CONSTRAINT \"UQ_Widgets_Price\"",
                "ALTER TABLE \"Widgets\" DROP COLUMN \"Price\"",
                "DROP TABLE \"Widgets\"",
            ]
        );
        let Command::Sql(first) = &output.commands[0] else {
            panic!("expected SQL command");
        };
        assert_eq!(first.column.as_deref(), Some("Price"));
    }

    #[test]
    fn test_raw_commands_keep_their_position() {
        let mut db = Database::new();
        db.execute_sql("UPDATE x SET y = 1");
        db.table("A").add_foreign_key_to("B").through("BId", "Id");
        db.execute(|_| Ok(()));
        db.table("A").drop_index("IX_A");

        let output = script(&db, &POSTGRESQL);
        let shape: Vec<_> = output
            .commands
            .iter()
            .map(|c| c.text().map(|t| t.split(' ').next().unwrap_or_default()))
            .collect();
        assert_eq!(
            shape,
            vec![Some("UPDATE"), None, Some("DROP"), Some("ALTER")]
        );
    }

    #[test]
    fn test_scripting_is_deterministic() {
        let db = widgets();
        for provider in [&SQL_SERVER, &POSTGRESQL, &MYSQL, &SQLITE, &ORACLE, &TERADATA] {
            assert_eq!(script(&db, provider).sql(), script(&db, provider).sql());
        }
    }
}
