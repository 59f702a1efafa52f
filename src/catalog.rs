use std::collections::HashMap;

use allocative::Allocative;

use crate::column::fold_identifier;
use crate::error::{Error, Result};
use crate::table::Table;

/// Owns every table, keyed by lower-cased name.
///
/// Lookups are case-insensitive. Nothing outside the catalog keeps a
/// reference into a table between statements; query results are copies.
#[derive(Debug, Default, Allocative)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

fn key(name: &str) -> String {
    fold_identifier(name)
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `table`, replacing any table with the same case-insensitive name.
    ///
    /// Returns the replaced table, if any.
    pub fn create_table(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(key(&table.name), table)
    }

    /// Removes a table and all of its rows.
    ///
    /// # Errors
    /// Returns [Error::UnknownTable] if the table does not exist.
    pub fn drop_table(&mut self, name: &str) -> Result<Table> {
        self.tables
            .remove(&key(name))
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    /// Retrieves a reference to a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&key(name))
    }

    /// Retrieves a mutable reference to a table by name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(&key(name))
    }

    /// Like [Catalog::get_table], failing with [Error::UnknownTable].
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.get_table(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    /// Like [Catalog::get_table_mut], failing with [Error::UnknownTable].
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.get_table_mut(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    /// Returns the names of all tables as they were declared, sorted.
    pub fn list_tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.values().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}
