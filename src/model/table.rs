//! Table-level specifications and the fluent builders that record them.

use super::column::{ColumnKind, ColumnSpec, DefaultValue, UniqueConstraint};
use super::types::LogicalType;
use super::{Database, Operation};

/// A table created by a migration
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub indexes: Vec<IndexSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Columns of the primary key, in declaration order
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_primary_key())
    }
}

/// An index over one or more columns
///
/// A name is optional for non-unique indexes and single-column unique
/// indexes; the scripter derives one when absent. A unique index spanning
/// several columns must be named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexSpec {
    pub fn on(columns: &[&str]) -> Self {
        Self {
            name: None,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            unique: false,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A unique constraint added to an existing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraintSpec {
    pub name: Option<String>,
    pub columns: Vec<String>,
}

impl UniqueConstraintSpec {
    pub fn on(columns: &[&str]) -> Self {
        Self {
            name: None,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A foreign key from `table` to `referenced_table`
///
/// `columns` holds (source column, referenced column) pairs in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    pub table: String,
    pub referenced_table: String,
    pub name: Option<String>,
    pub columns: Vec<(String, String)>,
}

/// Fluent handle returned by [`Database::create_table`]
pub struct CreatedTable<'a> {
    pub(super) table: &'a mut TableSpec,
}

impl<'a> CreatedTable<'a> {
    fn push_column(self, column: ColumnSpec) -> CreatedColumn<'a> {
        self.table.columns.push(column);
        CreatedColumn { table: self.table }
    }

    pub fn with_primary_key_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.push_column(ColumnSpec::new(name, logical_type, ColumnKind::PrimaryKey))
    }

    pub fn with_not_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.push_column(ColumnSpec::new(name, logical_type, ColumnKind::NotNullable))
    }

    pub fn with_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.push_column(ColumnSpec::new(name, logical_type, ColumnKind::Nullable))
    }

    pub fn with_row_version_column(self, name: impl Into<String>) -> CreatedColumn<'a> {
        self.push_column(ColumnSpec::row_version(name))
    }

    /// Declare an index on the table being created.
    ///
    /// Unique indexes are folded into the CREATE statement as constraints;
    /// other indexes become separate `CREATE INDEX` statements.
    pub fn with_index(self, index: IndexSpec) -> Self {
        self.table.indexes.push(index);
        self
    }

    /// Shorthand for `with_index(index.unique())`
    pub fn with_unique_index(self, index: IndexSpec) -> Self {
        self.with_index(index.unique())
    }
}

/// Fluent handle on the column most recently declared in a [`CreatedTable`]
pub struct CreatedColumn<'a> {
    table: &'a mut TableSpec,
}

impl<'a> CreatedColumn<'a> {
    fn update(self, f: impl FnOnce(&mut ColumnSpec)) -> Self {
        if let Some(column) = self.table.columns.last_mut() {
            f(column);
        }
        self
    }

    fn into_table(self) -> CreatedTable<'a> {
        CreatedTable { table: self.table }
    }

    pub fn of_size(self, size: u32) -> Self {
        self.update(|c| c.size = Some(size))
    }

    pub fn of_size_and_scale(self, size: u32, scale: u32) -> Self {
        self.update(|c| {
            c.size = Some(size);
            c.scale = Some(scale);
        })
    }

    pub fn as_identity(self) -> Self {
        self.update(|c| c.identity = true)
    }

    /// Single-column unique constraint with a derived name
    pub fn unique(self) -> Self {
        self.update(|c| c.unique = Some(UniqueConstraint::Anonymous))
    }

    /// Join the named unique constraint; columns sharing a name form one constraint
    pub fn unique_named(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.update(|c| c.unique = Some(UniqueConstraint::Named(name)))
    }

    pub fn having_default(self, value: impl Into<DefaultValue>) -> Self {
        let value = value.into();
        self.update(|c| c.default = Some(value))
    }

    pub fn with_primary_key_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.into_table().with_primary_key_column(name, logical_type)
    }

    pub fn with_not_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.into_table().with_not_nullable_column(name, logical_type)
    }

    pub fn with_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> CreatedColumn<'a> {
        self.into_table().with_nullable_column(name, logical_type)
    }

    pub fn with_row_version_column(self, name: impl Into<String>) -> CreatedColumn<'a> {
        self.into_table().with_row_version_column(name)
    }

    pub fn with_index(self, index: IndexSpec) -> CreatedTable<'a> {
        self.into_table().with_index(index)
    }

    pub fn with_unique_index(self, index: IndexSpec) -> CreatedTable<'a> {
        self.into_table().with_unique_index(index)
    }
}

/// Fluent handle returned by [`Database::table`] for tables that already exist
pub struct ExistingTable<'a> {
    pub(super) db: &'a mut Database,
    pub(super) name: String,
}

impl<'a> ExistingTable<'a> {
    fn add_column(self, column: ColumnSpec) -> AddedColumn<'a> {
        let ExistingTable { db, name } = self;
        db.operations.push(Operation::AddColumn { table: name, column });
        let Some(Operation::AddColumn { column, .. }) = db.operations.last_mut() else {
            unreachable!("add_column just pushed an AddColumn operation");
        };
        AddedColumn { column }
    }

    pub fn add_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> AddedColumn<'a> {
        self.add_column(ColumnSpec::new(name, logical_type, ColumnKind::Nullable))
    }

    pub fn add_not_nullable_column(
        self,
        name: impl Into<String>,
        logical_type: LogicalType,
    ) -> AddedColumn<'a> {
        self.add_column(ColumnSpec::new(name, logical_type, ColumnKind::NotNullable))
    }

    pub fn add_index(self, index: IndexSpec) -> Self {
        self.db.operations.push(Operation::AddIndex {
            table: self.name.clone(),
            index,
        });
        self
    }

    pub fn add_unique_constraint(self, constraint: UniqueConstraintSpec) -> Self {
        self.db.operations.push(Operation::AddUniqueConstraint {
            table: self.name.clone(),
            constraint,
        });
        self
    }

    /// Start a foreign key to `referenced_table`; add column pairs with
    /// [`ForeignKeyBuilder::through`].
    pub fn add_foreign_key_to(self, referenced_table: impl Into<String>) -> ForeignKeyBuilder<'a> {
        let ExistingTable { db, name } = self;
        db.operations.push(Operation::AddForeignKey(ForeignKeySpec {
            table: name,
            referenced_table: referenced_table.into(),
            name: None,
            columns: Vec::new(),
        }));
        let Some(Operation::AddForeignKey(foreign_key)) = db.operations.last_mut() else {
            unreachable!("add_foreign_key_to just pushed an AddForeignKey operation");
        };
        ForeignKeyBuilder { foreign_key }
    }

    pub fn drop_column(self, column: impl Into<String>) -> Self {
        self.db.operations.push(Operation::DropColumn {
            table: self.name.clone(),
            column: column.into(),
        });
        self
    }

    pub fn drop_index(self, name: impl Into<String>) -> Self {
        self.db.operations.push(Operation::DropIndex {
            table: self.name.clone(),
            name: name.into(),
        });
        self
    }

    pub fn drop_unique_constraint(self, name: impl Into<String>) -> Self {
        self.db.operations.push(Operation::DropUniqueConstraint {
            table: self.name.clone(),
            name: name.into(),
        });
        self
    }

    pub fn drop_foreign_key(self, name: impl Into<String>) -> Self {
        self.db.operations.push(Operation::DropForeignKey {
            table: self.name.clone(),
            name: name.into(),
        });
        self
    }

    pub fn drop(self) {
        self.db.operations.push(Operation::DropTable { table: self.name });
    }
}

/// Fluent handle on a column added to an existing table
pub struct AddedColumn<'a> {
    column: &'a mut ColumnSpec,
}

impl<'a> AddedColumn<'a> {
    pub fn of_size(self, size: u32) -> Self {
        self.column.size = Some(size);
        self
    }

    pub fn of_size_and_scale(self, size: u32, scale: u32) -> Self {
        self.column.size = Some(size);
        self.column.scale = Some(scale);
        self
    }

    pub fn as_identity(self) -> Self {
        self.column.identity = true;
        self
    }

    pub fn having_default(self, value: impl Into<DefaultValue>) -> Self {
        self.column.default = Some(value.into());
        self
    }
}

/// Fluent handle on a foreign key being declared
pub struct ForeignKeyBuilder<'a> {
    foreign_key: &'a mut ForeignKeySpec,
}

impl<'a> ForeignKeyBuilder<'a> {
    pub fn named(self, name: impl Into<String>) -> Self {
        self.foreign_key.name = Some(name.into());
        self
    }

    pub fn through(self, column: impl Into<String>, referenced_column: impl Into<String>) -> Self {
        self.foreign_key
            .columns
            .push((column.into(), referenced_column.into()));
        self
    }
}
