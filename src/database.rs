use bitvec::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    ast::{ColumnsSelect, CreateTable, DropTable, InsertInto, Select, Statement},
    catalog::Catalog,
    config::EngineConfig,
    error::{Error, Result},
    parser::Parser,
    result::QueryResult,
    table::Table,
};

/// The main entry point for the in-memory database engine.
/// It owns the catalog of tables and orchestrates statement execution.
///
/// Instances are independent: two databases never share tables.
#[derive(Default)]
pub struct Database {
    catalog: Catalog,
    config: EngineConfig,
}

impl Database {
    /// Creates a new, empty database instance with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty database instance with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Retrieves a reference to a table by name (case-insensitive).
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.catalog.get_table(name)
    }

    /// Returns the declared names of all tables, sorted.
    pub fn list_tables(&self) -> Vec<&str> {
        self.catalog.list_tables()
    }

    /// Bytes of heap memory owned by the catalog: schemas, rows and text.
    pub fn memory_usage(&self) -> usize {
        allocative::size_of_unique_allocated_data(&self.catalog)
    }

    /// Executes one statement and returns its result.
    ///
    /// `SELECT` returns the selected rows; `CREATE TABLE`, `INSERT INTO` and
    /// `DROP TABLE` return an empty [QueryResult].
    ///
    /// # Errors
    /// Fails with the [Error] raised by the first violation found. An
    /// `INSERT` that fails on its k-th tuple keeps the tuples before it.
    ///
    /// # Example
    /// ```
    /// use minidb::{Database, Value};
    /// let mut db = Database::new();
    /// db.execute("CREATE TABLE users (id INT, name TEXT)").unwrap();
    /// db.execute("INSERT INTO users VALUES (1, 'Alice'), (2, 'Bob')").unwrap();
    ///
    /// let result = db.execute("SELECT name FROM users WHERE id > 1").unwrap();
    /// assert_eq!(result.columns, vec!["name"]);
    /// assert_eq!(result.rows, vec![vec![Value::Text("Bob".into())]]);
    /// ```
    pub fn execute(&mut self, sql: &str) -> Result<QueryResult> {
        let statement = Parser::new(sql, &self.config).parse().inspect_err(|err| {
            debug!(%err, "statement rejected");
        })?;
        debug!(kind = %statement.kind(), "executing statement");

        match statement {
            Statement::CreateTable(create) => self.create_table(create),
            Statement::InsertInto(insert) => self.insert(insert),
            Statement::Select(select) => self.select(select),
            Statement::DropTable(drop) => self.drop_table(drop),
        }
    }

    /// Executes a `SELECT` without requiring mutable access.
    ///
    /// # Errors
    /// Returns [Error::Syntax] for any statement other than a `SELECT`, plus
    /// every error [Database::execute] can raise for a `SELECT`.
    ///
    /// # Example
    ///
    /// ```
    /// use minidb::{Database, Value};
    ///
    /// let mut db = Database::new();
    /// db.execute("CREATE TABLE products (name TEXT, price INT)").unwrap();
    /// db.execute("INSERT INTO products VALUES ('Laptop', 1200)").unwrap();
    /// db.execute("INSERT INTO products VALUES ('Mouse', 25)").unwrap();
    ///
    /// let result = db.query("SELECT name FROM products").unwrap();
    ///
    /// assert_eq!(result.columns, vec!["name"]);
    /// assert_eq!(result.rows.len(), 2);
    /// assert_eq!(result.rows[0][0], Value::Text("Laptop".into()));
    /// assert_eq!(result.rows[1][0], Value::Text("Mouse".into()));
    /// ```
    pub fn query(&self, sql: &str) -> Result<QueryResult> {
        match Parser::new(sql, &self.config).parse()? {
            Statement::Select(select) => self.select(select),
            other => Err(Error::syntax(
                other.kind(),
                "only SELECT statements can run as a read-only query",
            )),
        }
    }

    /// Creates an empty table, silently replacing one with the same name.
    fn create_table(&mut self, create: CreateTable) -> Result<QueryResult> {
        let column_count = create.columns.len();
        let table = Table::new(create.name, create.columns);
        let name = table.name.clone();

        if self.catalog.create_table(table).is_some() {
            info!(table = %name, "replaced existing table");
        }
        info!(table = %name, columns = column_count, "created table");
        Ok(QueryResult::empty())
    }

    /// Appends tuples in order, validating each one as it goes.
    ///
    /// Tuples before a failing one stay committed.
    fn insert(&mut self, insert: InsertInto) -> Result<QueryResult> {
        let table = self.catalog.table_mut(&insert.table)?;
        let total = insert.rows.len();

        for (committed, row) in insert.rows.into_iter().enumerate() {
            if let Err(err) = table.insert(row) {
                if committed > 0 {
                    warn!(
                        table = %table.name,
                        committed,
                        total,
                        "INSERT failed part-way, earlier tuples stay committed"
                    );
                }
                return Err(err);
            }
        }

        debug!(table = %table.name, rows = total, "inserted rows");
        Ok(QueryResult::empty())
    }

    /// Filters, then projects, preserving insertion order.
    ///
    /// Result column names are the declared names of the selected columns,
    /// in selection order.
    fn select(&self, select: Select) -> Result<QueryResult> {
        let table = self.catalog.table(&select.table)?;

        // Resolve which columns need to be projected
        let projection: Vec<usize> = match &select.columns {
            ColumnsSelect::Star => (0..table.columns().len()).collect(),
            ColumnsSelect::ColumnsNames(names) => names
                .iter()
                .map(|name| {
                    table.column_index(name).ok_or_else(|| Error::UnknownColumn {
                        table: table.name.clone(),
                        column: name.clone(),
                    })
                })
                .collect::<Result<_>>()?,
        };

        let filter = select
            .where_clause
            .as_ref()
            .map(|predicate| predicate.bind(table.columns()))
            .filter(|filter| !filter.is_pass_through());

        let selected: BitVec = table
            .rows()
            .iter()
            .map(|row| filter.as_ref().is_none_or(|f| f.matches(row)))
            .collect();

        let rows = selected
            .iter_ones()
            .filter_map(|idx| table.get_row(idx))
            .map(|row| projection.iter().map(|&col| row[col].clone()).collect())
            .collect();

        Ok(QueryResult {
            columns: projection
                .iter()
                .map(|&col| table.columns()[col].name.clone())
                .collect(),
            rows,
        })
    }

    fn drop_table(&mut self, drop: DropTable) -> Result<QueryResult> {
        let table = self.catalog.drop_table(&drop.name)?;
        info!(table = %table.name, rows = table.row_count(), "dropped table");
        Ok(QueryResult::empty())
    }
}
