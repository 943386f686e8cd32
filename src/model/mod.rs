//! Dialect-independent schema mutation model.
//!
//! A migration's `up()`/`down()` records declarative operations into a fresh
//! [`Database`]. Nothing runs at record time; the [`crate::scripter`] later
//! renders the operations for a concrete provider, so the same model can be
//! scripted against any dialect.
//!
//! # Example
//!
//! ```rust
//! use strata::model::{Database, IndexSpec, LogicalType};
//!
//! let mut db = Database::new();
//! db.create_table("Customers")
//!     .with_primary_key_column("Id", LogicalType::Int32)
//!     .as_identity()
//!     .with_not_nullable_column("Email", LogicalType::String)
//!     .of_size(255)
//!     .unique()
//!     .with_nullable_column("Region", LogicalType::String)
//!     .of_size(32)
//!     .with_index(IndexSpec::on(&["Region"]));
//!
//! db.table("Orders")
//!     .add_foreign_key_to("Customers")
//!     .through("CustomerId", "Id");
//!
//! assert_eq!(db.operations().len(), 2);
//! ```

pub mod column;
pub mod raw;
pub mod table;
pub mod types;

pub use column::{ColumnKind, ColumnSpec, DefaultValue, UniqueConstraint};
pub use raw::{RawCallback, RawCommand, RawContext};
pub use table::{
    AddedColumn, CreatedColumn, CreatedTable, ExistingTable, ForeignKeyBuilder, ForeignKeySpec,
    IndexSpec, TableSpec, UniqueConstraintSpec,
};
pub use types::LogicalType;

use crate::executor::DbError;
use std::sync::Arc;

/// One recorded schema operation
#[derive(Debug, Clone)]
pub enum Operation {
    CreateTable(TableSpec),
    AddColumn { table: String, column: ColumnSpec },
    AddIndex { table: String, index: IndexSpec },
    AddUniqueConstraint { table: String, constraint: UniqueConstraintSpec },
    AddForeignKey(ForeignKeySpec),
    ExecuteRaw(RawCommand),
    DropTable { table: String },
    DropColumn { table: String, column: String },
    DropIndex { table: String, name: String },
    DropUniqueConstraint { table: String, name: String },
    DropForeignKey { table: String, name: String },
}

impl Operation {
    /// Table the operation targets, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            Operation::CreateTable(t) => Some(&t.name),
            Operation::AddForeignKey(fk) => Some(&fk.table),
            Operation::AddColumn { table, .. }
            | Operation::AddIndex { table, .. }
            | Operation::AddUniqueConstraint { table, .. }
            | Operation::DropTable { table }
            | Operation::DropColumn { table, .. }
            | Operation::DropIndex { table, .. }
            | Operation::DropUniqueConstraint { table, .. }
            | Operation::DropForeignKey { table, .. } => Some(table),
            Operation::ExecuteRaw(_) => None,
        }
    }
}

/// Ordered list of schema operations recorded by one migration direction
#[derive(Debug, Clone, Default)]
pub struct Database {
    operations: Vec<Operation>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations, in declaration order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Record a `CREATE TABLE`; declare its columns on the returned handle
    pub fn create_table(&mut self, name: impl Into<String>) -> CreatedTable<'_> {
        self.operations.push(Operation::CreateTable(TableSpec::new(name)));
        let Some(Operation::CreateTable(table)) = self.operations.last_mut() else {
            unreachable!("create_table just pushed a CreateTable operation");
        };
        CreatedTable { table }
    }

    /// Address a table that already exists in the target database
    pub fn table(&mut self, name: impl Into<String>) -> ExistingTable<'_> {
        ExistingTable {
            db: self,
            name: name.into(),
        }
    }

    /// Record static SQL executed verbatim inside the step's transaction
    pub fn execute_sql(&mut self, sql: impl Into<String>) {
        self.operations
            .push(Operation::ExecuteRaw(RawCommand::Sql(sql.into())));
    }

    /// Record a callback that issues dialect-aware SQL at execution time
    ///
    /// # Example
    ///
    /// ```rust
    /// use strata::executor::DbExecutor;
    /// use strata::model::Database;
    ///
    /// let mut db = Database::new();
    /// db.execute(|ctx| {
    ///     let sql = format!(
    ///         "UPDATE {} SET {} = {}",
    ///         ctx.provider().quote_identifier("Widgets"),
    ///         ctx.provider().quote_identifier("Name"),
    ///         ctx.provider().parameter_marker(1),
    ///     );
    ///     ctx.transaction().execute(&sql, &["unnamed".into()])?;
    ///     Ok(())
    /// });
    /// ```
    pub fn execute<F>(&mut self, callback: F)
    where
        F: Fn(&RawContext<'_>) -> Result<(), DbError> + Send + Sync + 'static,
    {
        self.operations
            .push(Operation::ExecuteRaw(RawCommand::Callback(Arc::new(callback))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_database_is_empty() {
        assert!(Database::new().is_empty());
    }

    #[test]
    fn test_operations_keep_declaration_order() {
        let mut db = Database::new();
        db.execute_sql("SELECT 1");
        db.create_table("A")
            .with_primary_key_column("Id", LogicalType::Int32);
        db.table("A").add_index(IndexSpec::on(&["Id"]));
        db.execute(|_| Ok(()));

        let kinds: Vec<_> = db
            .operations()
            .iter()
            .map(|op| match op {
                Operation::ExecuteRaw(RawCommand::Sql(_)) => "sql",
                Operation::CreateTable(_) => "create",
                Operation::AddIndex { .. } => "index",
                Operation::ExecuteRaw(RawCommand::Callback(_)) => "callback",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["sql", "create", "index", "callback"]);
    }

    #[test]
    fn test_duplicate_columns_are_recorded_not_rejected() {
        let mut db = Database::new();
        db.create_table("T")
            .with_nullable_column("A", LogicalType::Int32)
            .with_nullable_column("A", LogicalType::Int32);
        let Operation::CreateTable(t) = &db.operations()[0] else {
            panic!("expected CreateTable");
        };
        assert_eq!(t.columns.len(), 2);
    }

    #[test]
    fn test_operation_table_targets() {
        let mut db = Database::new();
        db.table("Orders").drop_foreign_key("FK_Orders_Customers");
        db.execute_sql("SELECT 1");
        assert_eq!(db.operations()[0].table(), Some("Orders"));
        assert_eq!(db.operations()[1].table(), None);
    }
}
