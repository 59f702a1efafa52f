use allocative::Allocative;

/// Type recorded for a column declared without one.
pub const DEFAULT_DECLARED_TYPE: &str = "TEXT";

/// Case folding applied to table and column names before comparing them.
pub fn fold_identifier(name: &str) -> String {
    name.to_lowercase()
}

/// Represents a column within a table schema.
///
/// The declared type is kept exactly as written and is never checked
/// against inserted values.
#[derive(Debug, Clone, PartialEq, Eq, Allocative)]
pub struct Column {
    /// The name of the column.
    pub name: String,
    /// The free-form type text from the `CREATE TABLE` statement.
    pub declared_type: String,
}

impl Column {
    /// Creates a new column definition.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Parses one column definition of the form `name [type words...]`.
    ///
    /// The type defaults to [DEFAULT_DECLARED_TYPE]. Multi-word types such as
    /// `DOUBLE PRECISION` are kept, joined by single spaces. Returns `None`
    /// for a blank definition.
    ///
    /// # Example
    /// ```
    /// # use minidb::Column;
    /// let col = Column::parse_def("  price   DECIMAL ").unwrap();
    /// assert_eq!(col.name, "price");
    /// assert_eq!(col.declared_type, "DECIMAL");
    ///
    /// let col = Column::parse_def("note").unwrap();
    /// assert_eq!(col.declared_type, "TEXT");
    /// ```
    pub fn parse_def(def: &str) -> Option<Self> {
        let mut words = def.split_whitespace();
        let name = words.next()?;
        let declared_type = words.collect::<Vec<_>>().join(" ");

        Some(Self::new(
            name,
            if declared_type.is_empty() {
                DEFAULT_DECLARED_TYPE.to_string()
            } else {
                declared_type
            },
        ))
    }

    /// Case-insensitive name comparison used for column resolution.
    pub fn matches(&self, name: &str) -> bool {
        fold_identifier(&self.name) == fold_identifier(name)
    }
}

/// Splits the body of a `CREATE TABLE (...)` on every comma.
///
/// Parentheses are not tracked, so a type such as `DECIMAL(10,2)` is cut in
/// two. Callers rely on this exact behavior.
pub fn split_column_defs(body: &str) -> Vec<&str> {
    body.split(',').map(str::trim).collect()
}
